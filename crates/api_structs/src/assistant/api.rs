use crate::dtos::ChatMessageDTO;
use serde::{Deserialize, Serialize};

pub mod send_message {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct RequestBody {
        pub messages: Vec<ChatMessageDTO>,
    }

    #[derive(Serialize, Deserialize, Debug)]
    pub struct APIResponse {
        pub message: String,
        /// Names of the collections the assistant changed on the backend
        #[serde(default)]
        pub update: Vec<String>,
    }
}
