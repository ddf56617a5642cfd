pub mod config;
pub mod manifest;
pub mod verify;
pub mod version;
