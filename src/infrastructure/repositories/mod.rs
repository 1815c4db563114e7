pub mod sqlx_media_repository;
pub mod sqlx_social_repository;
