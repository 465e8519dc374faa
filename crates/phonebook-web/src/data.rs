use phonebook_api::data::contact::Contact;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub trait IntoWeb<T> {
    fn into_web(self) -> T;
}

/// A dummy response type signaling success of a request
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ContactWeb {
    pub id: u64,
    pub name: String,
    pub phone_number: String,
}

impl IntoWeb<ContactWeb> for Contact {
    fn into_web(self) -> ContactWeb {
        ContactWeb {
            id: self.id,
            name: self.name,
            phone_number: self.phone_number,
        }
    }
}

/// Both fields are required, they are optional here so that missing fields are reported as
/// validation errors
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewContactPayload {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// Only the given, non-empty fields are changed
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditContactPayload {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}
