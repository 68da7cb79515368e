pub mod code_generator;
pub mod identifier;

pub use code_generator::generate_prize_id;
pub use identifier::normalize_identifier;
