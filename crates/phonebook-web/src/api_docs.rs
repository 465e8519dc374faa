use crate::data::{ContactWeb, EditContactPayload, NewContactPayload, SuccessResponse};
use crate::handlers;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Phonebook API",
        description = "Create, list, search, update and delete contacts"
    ),
    paths(
        handlers::contacts::return_contacts,
        handlers::contacts::return_contact,
        handlers::contacts::new_contact,
        handlers::contacts::edit_contact,
        handlers::contacts::remove_contact,
    ),
    components(schemas(ContactWeb, NewContactPayload, EditContactPayload, SuccessResponse))
)]
pub struct ApiDocs;
