use crate::api_docs::ApiDocs;
use crate::config::Config;
use crate::constants::MAX_JSON_BODY_BYTES;
use crate::handlers;
use log::info;
use phonebook_api::service::ServiceContext;
use rocket::data::ByteUnit;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Method, Status};
use rocket::serde::json::Json;
use rocket::{Build, Request, Response, Rocket, catch, catchers, routes};
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use serde::Serialize;
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize, Debug, Clone)]
pub struct ErrorResponse {
    error: &'static str,
    message: String,
    code: u16,
}

impl ErrorResponse {
    pub fn new(error: &'static str, message: String, code: u16) -> Self {
        Self {
            error,
            message,
            code,
        }
    }

    pub fn to_json_string(&self) -> String {
        json!({ "error": self.error, "message": self.message, "code": self.code }).to_string()
    }
}

/// Declares the charset on every JSON response
pub struct JsonCharset;

#[rocket::async_trait]
impl Fairing for JsonCharset {
    fn info(&self) -> Info {
        Info {
            name: "JSON charset",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _req: &'r Request<'_>, res: &mut Response<'r>) {
        if res.content_type().is_some_and(|ct| ct.is_json()) {
            res.set_raw_header("Content-Type", "application/json; charset=utf-8");
        }
    }
}

pub fn rocket_main(conf: Config, context: ServiceContext) -> Rocket<Build> {
    let config = Figment::from(rocket::Config::default())
        .merge(("limits.json", ByteUnit::Byte(MAX_JSON_BODY_BYTES)))
        .merge(("port", conf.http_port))
        .merge(("address", conf.http_address.to_owned()));

    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_headers(AllowedHeaders::all())
        .allowed_methods(
            vec![
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Options,
            ]
            .into_iter()
            .map(From::from)
            .collect(),
        )
        .to_cors()
        .expect("Cors setup failed");

    let rocket = rocket::custom(config)
        .attach(cors.clone())
        .attach(JsonCharset)
        // catchers for CORS and API errors
        .mount("/", rocket_cors::catch_all_options_routes())
        .register("/", catchers![bad_request, not_found, default_catcher])
        .manage(context)
        .manage(cors)
        .mount(
            "/",
            routes![
                handlers::contacts::return_contacts,
                handlers::contacts::new_contact,
                handlers::contacts::return_contact,
                handlers::contacts::edit_contact,
                handlers::contacts::remove_contact,
            ],
        )
        .mount(
            "/",
            SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", ApiDocs::openapi()),
        );

    info!("HTTP Server Listening on {}", conf.http_listen_url());

    rocket
}

#[catch(400)]
fn bad_request(req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "bad_request",
        format!("The request to '{}' could not be processed", req.uri()),
        400,
    ))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "not_found",
        format!("We couldn't find the requested path '{}'", req.uri()),
        404,
    ))
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> (Status, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse::new(
            "error",
            status.reason_lossy().to_string(),
            status.code,
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use phonebook_api::service::create_service_context;
    use phonebook_api::get_db_context;
    use rocket::http::{ContentType, Header};
    use rocket::local::asynchronous::{Client, LocalResponse};
    use serde_json::Value;

    const JSON_UTF8: &str = "application/json; charset=utf-8";

    async fn get_client() -> Client {
        let api_config = phonebook_api::Config::in_memory();
        let db = get_db_context(&api_config)
            .await
            .expect("could not create memory db");
        let context = create_service_context(db);
        let conf = Config::parse_from(["phonebook-web"]);
        Client::tracked(rocket_main(conf, context))
            .await
            .expect("valid rocket instance")
    }

    fn content_type<'a>(response: &'a LocalResponse<'_>) -> &'a str {
        response.headers().get_one("Content-Type").unwrap_or_default()
    }

    async fn list(client: &Client) -> Vec<Value> {
        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        response
            .into_json::<Vec<Value>>()
            .await
            .expect("list is an array")
    }

    async fn add(client: &Client, item: Value) -> Status {
        client.post("/").json(&item).dispatch().await.status()
    }

    async fn delete_all(client: &Client) {
        for item in list(client).await {
            let response = client
                .delete(format!("/{}", item["id"]))
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::Ok);
        }
    }

    async fn reset(client: &Client) {
        delete_all(client).await;
        let initial_items = [
            json!({ "name": "Cypress", "phone_number": "123456789" }),
            json!({ "name": "Presscy", "phone_number": "987654321" }),
        ];
        for item in initial_items {
            assert_eq!(add(client, item).await, Status::Created);
        }
    }

    fn assert_contact_keys(value: &Value) {
        let obj = value.as_object().expect("contact is an object");
        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["id", "name", "phone_number"]);
    }

    #[tokio::test]
    async fn list_header_status_and_body() {
        let client = get_client().await;
        reset(&client).await;

        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert!(content_type(&response).contains(JSON_UTF8));
        let body = response.into_json::<Value>().await.unwrap();
        assert!(body.is_array());

        let items = list(&client).await;
        assert_eq!(items.len(), 2);
        items.iter().for_each(assert_contact_keys);
    }

    #[tokio::test]
    async fn empty_list_is_an_empty_array() {
        let client = get_client().await;
        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn deleting_everything_empties_the_list() {
        let client = get_client().await;
        reset(&client).await;
        assert_eq!(list(&client).await.len(), 2);
        delete_all(&client).await;
        assert!(list(&client).await.is_empty());
    }

    #[tokio::test]
    async fn create_contact_scenarios() {
        let client = get_client().await;
        reset(&client).await;

        let response = client
            .post("/")
            .json(&json!({ "name": "Cypress3", "phone_number": "987654321" }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        assert!(content_type(&response).contains(JSON_UTF8));
        let created = response.into_json::<Value>().await.unwrap();
        assert_contact_keys(&created);
        assert_eq!(created["name"], "Cypress3");
        assert_eq!(list(&client).await.len(), 3);

        let duplicate = json!({ "name": "Cypress", "phone_number": "987654321" });
        assert_eq!(add(&client, duplicate).await, Status::Conflict);
        let same_pair = json!({ "name": "Presscy", "phone_number": "987654321" });
        assert_eq!(add(&client, same_pair).await, Status::Conflict);

        assert_eq!(
            add(&client, json!({ "name": "zupper" })).await,
            Status::BadRequest
        );
        assert_eq!(
            add(&client, json!({ "phone_number": "789456123" })).await,
            Status::BadRequest
        );
        assert_eq!(add(&client, json!({})).await, Status::BadRequest);
        assert_eq!(list(&client).await.len(), 3);
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_bad_request() {
        let client = get_client().await;
        let response = client
            .post("/")
            .header(ContentType::JSON)
            .body("{ not json")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(content_type(&response).contains(JSON_UTF8));

        let response = client
            .post("/")
            .json(&json!({ "name": 5, "phone_number": "123" }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(list(&client).await.is_empty());
    }

    #[tokio::test]
    async fn create_returns_values_as_submitted() {
        let client = get_client().await;
        let response = client
            .post("/")
            .json(&json!({ "name": " Ann ", "phone_number": " 123 " }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        let created = response.into_json::<Value>().await.unwrap();
        assert_eq!(created["name"], " Ann ");
        assert_eq!(created["phone_number"], " 123 ");

        let response = client.get(format!("/{}", created["id"])).dispatch().await;
        let fetched = response.into_json::<Value>().await.unwrap();
        assert_eq!(fetched["name"], " Ann ");

        let trimmed = json!({ "name": "Ann", "phone_number": "123" });
        assert_eq!(add(&client, trimmed).await, Status::Created);
        assert_eq!(list(&client).await.len(), 2);
    }

    #[tokio::test]
    async fn get_each_item_by_id() {
        let client = get_client().await;
        reset(&client).await;

        for item in list(&client).await {
            let response = client.get(format!("/{}", item["id"])).dispatch().await;
            assert_eq!(response.status(), Status::Ok);
            let body = response.into_json::<Value>().await.unwrap();
            assert_contact_keys(&body);
            assert_eq!(body, item);
        }
    }

    #[tokio::test]
    async fn get_invalid_id() {
        let client = get_client().await;
        reset(&client).await;

        let response = client.get("/999").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        assert!(content_type(&response).contains(JSON_UTF8));
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body["error"], "not_found");

        let response = client.get("/abc").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_a_no_op() {
        let client = get_client().await;
        reset(&client).await;

        let response = client.delete("/999").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(list(&client).await.len(), 2);

        let response = client.delete("/abc").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let client = get_client().await;
        reset(&client).await;
        let max_id = |items: &[Value]| items.iter().filter_map(|i| i["id"].as_u64()).max();
        let before = max_id(&list(&client).await).unwrap();

        delete_all(&client).await;
        reset(&client).await;
        let items = list(&client).await;
        assert!(items.iter().all(|i| i["id"].as_u64().unwrap() > before));
    }

    #[tokio::test]
    async fn update_contact() {
        let client = get_client().await;
        reset(&client).await;
        let items = list(&client).await;
        let cypress_id = items[0]["id"].clone();
        assert_eq!(items[0]["name"], "Cypress");

        let response = client
            .put(format!("/{cypress_id}"))
            .json(&json!({ "phone_number": "555" }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().await.unwrap();
        assert_eq!(
            body,
            json!({ "id": cypress_id.clone(), "name": "Cypress", "phone_number": "555" })
        );

        let response = client
            .put(format!("/{cypress_id}"))
            .json(&json!({ "name": "Presscy" }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Conflict);

        let response = client
            .put("/999")
            .json(&json!({ "name": "Nobody" }))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[tokio::test]
    async fn search_by_phone_number() {
        let client = get_client().await;
        reset(&client).await;

        let response = client.get("/?q=4567").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Vec<Value>>().await.unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["name"], "Cypress");

        let response = client.get("/?q=").dispatch().await;
        assert_eq!(response.into_json::<Vec<Value>>().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let client = get_client().await;
        let response = client.get("/no/such/path").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        assert!(content_type(&response).contains(JSON_UTF8));
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let client = get_client().await;
        let response = client
            .options("/")
            .header(Header::new("Origin", "http://localhost:3000"))
            .header(Header::new("Access-Control-Request-Method", "POST"))
            .dispatch()
            .await;
        assert!(response.status().class().is_success());
        assert!(
            response
                .headers()
                .get_one("Access-Control-Allow-Origin")
                .is_some()
        );
    }

    #[tokio::test]
    async fn serves_openapi_docs() {
        let client = get_client().await;
        let response = client.get("/api-docs/openapi.json").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().await.unwrap();
        assert!(body["paths"]["/"].is_object());
        assert!(body["paths"]["/{id}"].is_object());
    }
}
