use chrono::Local;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

use super::json_file::{read_json_file, write_json_file};

/// 已参与抽奖的标识集合
///
/// 每个标识最多出现一次，只有后台删除才会移除。磁盘上按排序后的数组保存。
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    records: HashSet<String>,
}

impl LedgerStore {
    /// 加载抽奖记录。读取失败不影响启动：降级为空集合并重新初始化文件，
    /// 损坏的旧文件会先改名备份。
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let records: Vec<String> = match read_json_file(&path).await {
            Ok(Some(records)) => records,
            Ok(None) => {
                log::warn!(
                    "Ledger {} not found, starting with an empty ledger",
                    path.display()
                );
                Self::reinitialize(&path).await;
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Failed to read ledger {}: {e}, starting with an empty ledger",
                    path.display()
                );
                Self::backup_unreadable(&path).await;
                Self::reinitialize(&path).await;
                Vec::new()
            }
        };

        let store = Self {
            path,
            records: records.into_iter().collect(),
        };
        log::info!("Loaded {} lottery records", store.records.len());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 是否已参与过抽奖
    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains(identifier)
    }

    /// 全部标识（已排序）
    pub fn list(&self) -> Vec<String> {
        let mut records: Vec<String> = self.records.iter().cloned().collect();
        records.sort();
        records
    }

    /// 写入一条记录并持久化。写盘失败时内存中已包含该标识。
    pub async fn add(&mut self, identifier: &str) -> AppResult<()> {
        self.records.insert(identifier.to_string());
        self.persist().await
    }

    pub async fn remove(&mut self, identifier: &str) -> AppResult<()> {
        if !self.records.remove(identifier) {
            return Err(AppError::NotFound(format!(
                "no lottery record for {identifier}"
            )));
        }
        self.persist().await
    }

    async fn persist(&self) -> AppResult<()> {
        write_json_file(&self.path, &self.list()).await
    }

    async fn reinitialize(path: &Path) {
        if let Err(e) = write_json_file(path, &Vec::<String>::new()).await {
            log::error!("Failed to initialize ledger {}: {e}", path.display());
        }
    }

    async fn backup_unreadable(path: &Path) {
        let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
        name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S")));
        let backup = path.with_file_name(name);
        match tokio::fs::rename(path, &backup).await {
            Ok(()) => log::warn!("Moved unreadable ledger to {}", backup.display()),
            Err(e) => log::error!("Failed to back up unreadable ledger: {e}"),
        }
    }
}
