pub mod inventory;
pub mod json_file;
pub mod ledger;
pub mod questionnaire;

pub use inventory::InventoryStore;
pub use json_file::{read_json_file, write_json_file};
pub use ledger::LedgerStore;
pub use questionnaire::QuestionnaireLog;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// 每个测试独立的临时目录
    pub fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lottery-backend-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
