use crate::dtos::UserDTO;

pub mod get_me {
    use super::*;

    pub type APIResponse = UserDTO;
}
