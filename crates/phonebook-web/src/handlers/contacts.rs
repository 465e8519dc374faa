use super::Result;
use crate::data::{ContactWeb, EditContactPayload, IntoWeb, NewContactPayload, SuccessResponse};
use phonebook_api::data::contact::ContactId;
use phonebook_api::service::{self, ServiceContext};
use rocket::response::status;
use rocket::serde::json::{self, Json};
use rocket::{State, delete, get, post, put};

fn parse_contact_id(id: &str) -> service::Result<ContactId> {
    id.parse::<ContactId>()
        .map_err(|_| service::Error::Validation(format!("Invalid contact id: {id}")))
}

fn invalid_payload(e: json::Error<'_>) -> service::Error {
    service::Error::Validation(format!("Invalid contact payload: {e}"))
}

#[utoipa::path(
    tag = "Contacts",
    path = "/",
    description = "Returns all contacts ordered by name, optionally only those whose phone number contains the search term",
    params(
        ("q" = Option<String>, Query, description = "Phone number search term")
    ),
    responses(
        (status = 200, description = "List of contacts", body = Vec<ContactWeb>)
    )
)]
#[get("/?<q>")]
pub async fn return_contacts(
    state: &State<ServiceContext>,
    q: Option<&str>,
) -> Result<Json<Vec<ContactWeb>>> {
    let contacts = state.contact_service.get_contacts(q).await?;
    Ok(Json(contacts.into_iter().map(|c| c.into_web()).collect()))
}

#[utoipa::path(
    tag = "Contacts",
    path = "/{id}",
    description = "Returns the contact with the given id",
    params(
        ("id" = u64, Path, description = "Id of the contact")
    ),
    responses(
        (status = 200, description = "The contact", body = ContactWeb),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No contact with the given id")
    )
)]
#[get("/<id>")]
pub async fn return_contact(state: &State<ServiceContext>, id: &str) -> Result<Json<ContactWeb>> {
    let id = parse_contact_id(id)?;
    let contact = state.contact_service.get_contact(id).await?;
    Ok(Json(contact.into_web()))
}

#[utoipa::path(
    tag = "Contacts",
    path = "/",
    description = "Creates a new contact, the name has to be unique",
    request_body(description = "The new contact", content = NewContactPayload),
    responses(
        (status = 201, description = "The created contact", body = ContactWeb),
        (status = 400, description = "Name or phone number missing"),
        (status = 409, description = "A contact with that name already exists")
    )
)]
#[post("/", data = "<new_contact_payload>")]
pub async fn new_contact(
    state: &State<ServiceContext>,
    new_contact_payload: std::result::Result<Json<NewContactPayload>, json::Error<'_>>,
) -> Result<status::Created<Json<ContactWeb>>> {
    let payload = new_contact_payload.map_err(invalid_payload)?.0;

    let contact = state
        .contact_service
        .add_contact(payload.name, payload.phone_number)
        .await?;
    Ok(status::Created::new(format!("/{}", contact.id)).body(Json(contact.into_web())))
}

#[utoipa::path(
    tag = "Contacts",
    path = "/{id}",
    description = "Changes the name and/or phone number of a contact",
    params(
        ("id" = u64, Path, description = "Id of the contact")
    ),
    request_body(description = "The fields to change", content = EditContactPayload),
    responses(
        (status = 200, description = "The updated contact", body = ContactWeb),
        (status = 400, description = "Invalid id or payload"),
        (status = 404, description = "No contact with the given id"),
        (status = 409, description = "Another contact with that name already exists")
    )
)]
#[put("/<id>", data = "<edit_contact_payload>")]
pub async fn edit_contact(
    state: &State<ServiceContext>,
    id: &str,
    edit_contact_payload: std::result::Result<Json<EditContactPayload>, json::Error<'_>>,
) -> Result<Json<ContactWeb>> {
    let id = parse_contact_id(id)?;
    let payload = edit_contact_payload.map_err(invalid_payload)?.0;

    let contact = state
        .contact_service
        .update_contact(id, payload.name, payload.phone_number)
        .await?;
    Ok(Json(contact.into_web()))
}

#[utoipa::path(
    tag = "Contacts",
    path = "/{id}",
    description = "Deletes the contact with the given id, deleting an unknown id succeeds as well",
    params(
        ("id" = u64, Path, description = "Id of the contact")
    ),
    responses(
        (status = 200, description = "Contact deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id")
    )
)]
#[delete("/<id>")]
pub async fn remove_contact(
    state: &State<ServiceContext>,
    id: &str,
) -> Result<Json<SuccessResponse>> {
    let id = parse_contact_id(id)?;
    state.contact_service.delete(id).await?;
    Ok(Json(SuccessResponse::new()))
}
