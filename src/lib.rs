pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod types;
pub mod verify;
