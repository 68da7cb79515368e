pub mod admin_auth;
pub mod cors;

pub use admin_auth::AdminAuthMiddleware;
pub use cors::create_cors;
