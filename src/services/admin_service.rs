use crate::error::AppResult;
use crate::models::{CreatePrizeRequest, Prize, UpdatePrizeRequest};
use crate::services::SharedLotteryState;
use crate::utils::normalize_identifier;

/// 后台管理：奖品增删改查与抽奖记录管理。
/// 与抽奖共用同一把状态锁，变更不会插入到某次抽奖中间。
#[derive(Clone)]
pub struct AdminService {
    state: SharedLotteryState,
}

impl AdminService {
    pub fn new(state: SharedLotteryState) -> Self {
        Self { state }
    }

    pub async fn list_prizes(&self) -> Vec<Prize> {
        self.state.lock().await.inventory.list().to_vec()
    }

    pub async fn add_prize(&self, request: CreatePrizeRequest) -> AppResult<Prize> {
        let prize = self.state.lock().await.inventory.add(request).await?;
        log::info!("Added prize {} ({})", prize.name, prize.id);
        Ok(prize)
    }

    pub async fn update_prize(&self, id: &str, request: UpdatePrizeRequest) -> AppResult<Prize> {
        let prize = self.state.lock().await.inventory.update(id, request).await?;
        log::info!(
            "Updated prize {} ({}): quantity={}, probability={}",
            prize.name,
            prize.id,
            prize.quantity,
            prize.probability
        );
        Ok(prize)
    }

    pub async fn delete_prize(&self, id: &str) -> AppResult<Prize> {
        let prize = self.state.lock().await.inventory.remove(id).await?;
        log::info!("Deleted prize {} ({})", prize.name, prize.id);
        Ok(prize)
    }

    pub async fn list_records(&self) -> Vec<String> {
        self.state.lock().await.ledger.list()
    }

    /// 删除抽奖记录，该标识可以再次抽奖
    pub async fn delete_record(&self, identifier: Option<&str>) -> AppResult<String> {
        let identifier = normalize_identifier(identifier)?;
        self.state.lock().await.ledger.remove(&identifier).await?;
        log::info!("Deleted lottery record for {identifier}");
        Ok(identifier)
    }
}
