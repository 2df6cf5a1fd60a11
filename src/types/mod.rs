pub mod config;
pub mod profile;
pub mod question;
pub mod traits;
