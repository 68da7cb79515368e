use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{QuestionnaireEntry, QuestionnaireTable};
use crate::storage::QuestionnaireLog;

/// 问卷数据，追加写入串行执行
#[derive(Clone)]
pub struct QuestionnaireService {
    log: Arc<Mutex<QuestionnaireLog>>,
}

impl QuestionnaireService {
    pub fn new(log: QuestionnaireLog) -> Self {
        Self {
            log: Arc::new(Mutex::new(log)),
        }
    }

    pub async fn submit(&self, entry: &QuestionnaireEntry) -> AppResult<()> {
        self.log.lock().await.append(entry).await?;
        log::info!(
            "Received questionnaire from {}",
            entry.phone.as_deref().unwrap_or("<no phone>")
        );
        Ok(())
    }

    pub async fn read_all(&self) -> AppResult<QuestionnaireTable> {
        self.log.lock().await.read_all().await
    }
}
