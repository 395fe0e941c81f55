use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod health;
pub(crate) mod posts;
pub(crate) mod users;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) success: bool,
    pub(crate) message: String,
}

impl MessageDto {
    pub(crate) fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
