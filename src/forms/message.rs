use crate::models;
use serde::Deserialize;
use serde_valid::Validate;

/// REST fallback body for sending a chat message when the socket is
/// unavailable.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessage {
    #[validate(min_length = 1)]
    pub email: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 4000)]
    pub content: String,
    pub sender: Option<models::SenderRole>,
}
