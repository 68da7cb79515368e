use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::AppResult;
use crate::models::{QuestionnaireEntry, QuestionnaireTable};

/// 问卷表头：姓名、科室、职务/职位、单位、电话号码、电子邮件
pub const QUESTIONNAIRE_HEADER: [&str; 6] =
    ["姓名", "科室", "职务/职位", "单位", "电话号码", "电子邮件"];

/// 只追加的问卷数据文件（CSV，所有字段加引号）
#[derive(Debug)]
pub struct QuestionnaireLog {
    path: PathBuf,
}

impl QuestionnaireLog {
    /// 文件不存在时写入表头
    pub async fn init(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        match fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&path, encode_row(QUESTIONNAIRE_HEADER)).await?;
                log::info!("Created questionnaire file {}", path.display());
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件在运行期间被删除时重新创建并补写表头
    pub async fn append(&self, entry: &QuestionnaireEntry) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        if file.metadata().await?.len() == 0 {
            log::warn!(
                "Questionnaire file {} was missing, recreating header",
                self.path.display()
            );
            file.write_all(encode_row(QUESTIONNAIRE_HEADER).as_bytes())
                .await?;
        }
        file.write_all(encode_row(entry.fields()).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn read_all(&self) -> AppResult<QuestionnaireTable> {
        let content = fs::read_to_string(&self.path).await?;
        let mut rows = parse_rows(&content).into_iter();

        let Some(headers) = rows.next() else {
            return Ok(QuestionnaireTable::default());
        };
        let data: Vec<BTreeMap<String, String>> = rows
            .map(|values| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();

        if data.is_empty() {
            return Ok(QuestionnaireTable::default());
        }
        Ok(QuestionnaireTable { headers, data })
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn encode_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = fields.into_iter().map(quote).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// 解析 CSV，支持引号内的逗号、换行和转义引号；跳过空行
fn parse_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field).trim().to_string()),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field).trim().to_string());
                push_row(&mut rows, std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field.trim().to_string());
        push_row(&mut rows, row);
    }
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::scratch_dir;

    #[test]
    fn test_encode_row_escapes_quotes() {
        assert_eq!(encode_row(["a", "say \"hi\"", ""]), "\"a\",\"say \"\"hi\"\"\",\"\"\n");
    }

    #[test]
    fn test_parse_rows_handles_commas_and_blank_lines() {
        let rows = parse_rows("\"h1\",\"h2\"\n\n\"x, y\",\"z\"\r\n");
        assert_eq!(
            rows,
            vec![vec!["h1", "h2"], vec!["x, y", "z"]]
        );
    }

    #[tokio::test]
    async fn test_init_writes_header_once() {
        let path = scratch_dir().join("data.csv");
        QuestionnaireLog::init(&path).await.unwrap();
        QuestionnaireLog::init(&path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\"姓名\",\"科室\",\"职务/职位\",\"单位\",\"电话号码\",\"电子邮件\"\n"
        );
    }

    #[tokio::test]
    async fn test_header_only_reads_as_empty() {
        let log = QuestionnaireLog::init(scratch_dir().join("data.csv"))
            .await
            .unwrap();
        let table = log.read_all().await.unwrap();
        assert!(table.headers.is_empty());
        assert!(table.data.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_read() {
        let log = QuestionnaireLog::init(scratch_dir().join("data.csv"))
            .await
            .unwrap();
        log.append(&QuestionnaireEntry {
            name: Some("Li, Wei".into()),
            department: Some("Cardiology".into()),
            phone: Some("13800138000".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        let table = log.read_all().await.unwrap();
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.data.len(), 1);
        let row = &table.data[0];
        assert_eq!(row["姓名"], "Li, Wei");
        assert_eq!(row["电话号码"], "13800138000");
        assert_eq!(row["电子邮件"], "");
    }

    #[tokio::test]
    async fn test_append_recreates_removed_file() {
        let log = QuestionnaireLog::init(scratch_dir().join("data.csv"))
            .await
            .unwrap();
        std::fs::remove_file(log.path()).unwrap();

        log.append(&QuestionnaireEntry {
            name: Some("Wang".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        let table = log.read_all().await.unwrap();
        assert_eq!(table.headers, QUESTIONNAIRE_HEADER.to_vec());
        assert_eq!(table.data.len(), 1);
        assert_eq!(table.data[0]["姓名"], "Wang");
    }
}
