pub mod admin_service;
pub mod draw_service;
pub mod questionnaire_service;

pub use admin_service::*;
pub use draw_service::*;
pub use questionnaire_service::*;
