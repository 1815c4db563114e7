pub mod entity;
pub mod provider;
