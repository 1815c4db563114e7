pub mod comment;
pub mod like;
pub mod repository;
pub mod toggle;
