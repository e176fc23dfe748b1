pub mod fake_backend;
pub mod setup;
