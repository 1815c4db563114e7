pub mod auth;
pub mod errors;
pub mod media;
pub mod preferences;
pub mod social;
