pub mod admin;
pub mod auth;
pub mod health;
pub mod media;
pub mod pages;
pub mod preferences;
pub mod social;
