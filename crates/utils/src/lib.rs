use rand::{distributions::Alphanumeric, Rng};

/// Length of the tokens identifying calendar invitations
pub const INVITATION_TOKEN_LEN: usize = 32;

/// Random token made of ascii letters and digits
pub fn create_random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn create_invitation_token() -> String {
    create_random_token(INVITATION_TOKEN_LEN)
}
