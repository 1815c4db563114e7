pub mod supabase_storage_service;
pub mod traits;
