use serde::{Deserialize, Serialize};

pub mod env;
pub mod item;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Message returned to the caller after a successful write.
pub const INSERTED_MESSAGE: &str = "Successfully inserted data!";

/// JSON body of a successful response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InsertResponse {
    pub message: String,
}

impl InsertResponse {
    pub fn inserted() -> Self {
        InsertResponse {
            message: INSERTED_MESSAGE.to_string(),
        }
    }
}
