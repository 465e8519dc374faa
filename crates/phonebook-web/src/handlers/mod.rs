use crate::router::ErrorResponse;
use log::error;
use phonebook_api::service::Error;
use rocket::Response;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use std::io::Cursor;

pub type Result<T> = std::result::Result<T, crate::error::Error>;

pub mod contacts;

impl<'r, 'o: 'r> Responder<'r, 'o> for crate::error::Error {
    fn respond_to(self, req: &rocket::Request) -> rocket::response::Result<'o> {
        match self {
            crate::error::Error::Service(e) => ServiceError(e).respond_to(req),
        }
    }
}

pub struct ServiceError(Error);

impl<'r, 'o: 'r> Responder<'r, 'o> for ServiceError {
    fn respond_to(self, _req: &rocket::Request) -> rocket::response::Result<'o> {
        match self.0 {
            Error::Validation(msg) => {
                build_error_response(Status::BadRequest, "validation_error", msg)
            }
            Error::Conflict(msg) => build_error_response(Status::Conflict, "conflict", msg),
            Error::NotFound => {
                build_error_response(Status::NotFound, "not_found", "not found".to_string())
            }
            // the caller can't do anything about persistence errors, so we only tell them
            // that something went wrong on our end
            Error::Persistence(e) => {
                error!("{e}");
                build_error_response(
                    Status::InternalServerError,
                    "internal_server_error",
                    "internal server error".to_string(),
                )
            }
        }
    }
}

fn build_error_response<'o>(
    status: Status,
    error: &'static str,
    msg: String,
) -> rocket::response::Result<'o> {
    let body = ErrorResponse::new(error, msg, status.code).to_json_string();
    Response::build()
        .status(status)
        .header(ContentType::JSON)
        .sized_body(body.len(), Cursor::new(body))
        .ok()
}
