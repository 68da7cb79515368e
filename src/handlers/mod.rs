pub mod draw;
pub mod prize;
pub mod questionnaire;
pub mod record;

pub use draw::draw_config;
pub use prize::prize_config;
pub use questionnaire::{questionnaire_admin_config, questionnaire_config};
pub use record::record_config;
