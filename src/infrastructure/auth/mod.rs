pub mod local_admin_provider;
pub mod supabase_auth_provider;
