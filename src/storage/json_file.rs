use serde::Serialize;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};

/// 读取 JSON 文件；文件不存在时返回 `None`，内容损坏时返回错误
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// 全量覆盖写入（先写临时文件再 rename，磁盘上不会留下半截文件）
pub async fn write_json_file<T: Serialize + ?Sized>(path: &Path, data: &T) -> AppResult<()> {
    write_atomically(path, data)
        .await
        .map_err(|e| AppError::PersistenceError(format!("{}: {e}", path.display())))
}

async fn write_atomically<T: Serialize + ?Sized>(path: &Path, data: &T) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(data)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let tmp = tmp_path(path);
    let mut file = fs::File::create(&tmp).await?;
    file.write_all(content.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, path).await?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
