pub mod common;
pub mod draw;
pub mod prize;
pub mod questionnaire;
pub mod record;

pub use common::*;
pub use draw::*;
pub use prize::*;
pub use questionnaire::*;
pub use record::*;
