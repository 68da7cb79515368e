use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{DrawOutcome, Prize};
use crate::storage::{InventoryStore, LedgerStore};
use crate::utils::normalize_identifier;

/// 库存与抽奖记录，同一把锁保护；抽奖与后台变更都经由这把锁串行执行
#[derive(Debug)]
pub struct LotteryState {
    pub inventory: InventoryStore,
    pub ledger: LedgerStore,
}

pub type SharedLotteryState = Arc<Mutex<LotteryState>>;

impl LotteryState {
    pub fn new(inventory: InventoryStore, ledger: LedgerStore) -> Self {
        Self { inventory, ledger }
    }

    pub fn into_shared(self) -> SharedLotteryState {
        Arc::new(Mutex::new(self))
    }

    /// 资格检查 + 可用奖品快照 + 加权选取，不修改任何状态
    pub fn select_prize<R: Rng + ?Sized>(&self, identifier: &str, rng: &mut R) -> AppResult<Prize> {
        if self.ledger.contains(identifier) {
            return Err(AppError::AlreadyParticipated);
        }

        // 每次抽奖都重新计算可用奖品
        let available = self.inventory.available();
        select_weighted(&available, rng)
            .cloned()
            .ok_or(AppError::PrizesExhausted)
    }

    /// 先扣减库存，再写入抽奖记录；两次写盘都完成后才算成功
    pub async fn commit(&mut self, identifier: &str, prize: &Prize) -> AppResult<DrawOutcome> {
        match self.inventory.decrement(&prize.id).await {
            Ok(()) => {}
            Err(AppError::NotFound(_)) | Err(AppError::OutOfStock(_)) => {
                return Err(AppError::PrizeVanished(format!(
                    "prize {} ({}) is no longer available",
                    prize.id, prize.name
                )));
            }
            Err(e) => return Err(e),
        }

        self.ledger.add(identifier).await?;

        Ok(DrawOutcome {
            prize_id: prize.id.clone(),
            prize_name: prize.name.clone(),
        })
    }
}

/// 轮盘选取：r ∈ [0, total)，按存储顺序累计权重，取第一个累计和 > r 的奖品。
/// 快照为空时返回 `None`。
pub fn select_weighted<'a, R: Rng + ?Sized>(available: &'a [Prize], rng: &mut R) -> Option<&'a Prize> {
    let total: f64 = available.iter().map(|p| p.probability).sum();
    let r = rng.r#gen::<f64>() * total;
    pick_at(available, r)
}

/// 按给定的随机点 r 选取奖品。
///
/// 浮点误差（或权重全为 0）可能导致没有累计和严格大于 r，
/// 此时退回快照中的最后一个奖品，选取结果始终有定义。
pub fn pick_at(available: &[Prize], r: f64) -> Option<&Prize> {
    let fallback = available.last()?;

    let mut cumulative = 0.0;
    for prize in available {
        cumulative += prize.probability;
        if r < cumulative {
            return Some(prize);
        }
    }
    Some(fallback)
}

#[derive(Clone)]
pub struct DrawService {
    state: SharedLotteryState,
    rng: Arc<std::sync::Mutex<StdRng>>,
}

impl DrawService {
    pub fn new(state: SharedLotteryState) -> Self {
        Self::with_rng(state, StdRng::from_entropy())
    }

    pub fn with_rng(state: SharedLotteryState, rng: StdRng) -> Self {
        Self {
            state,
            rng: Arc::new(std::sync::Mutex::new(rng)),
        }
    }

    /// 抽奖
    ///
    /// 流程:
    /// 1. 校验标识非空
    /// 2. 已参与过的标识直接拒绝
    /// 3. 过滤出可用奖品 (库存 > 0 或无限)，为空则奖品已抽完
    /// 4. 按权重随机选取
    /// 5. 扣减库存并写盘，再写入抽奖记录并写盘
    ///
    /// 整个过程持有状态锁，不会与其它抽奖或后台变更交错。
    pub async fn draw(&self, identifier: Option<&str>) -> AppResult<DrawOutcome> {
        let identifier = normalize_identifier(identifier)?;

        let mut state = self.state.lock().await;

        let prize = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AppError::InternalError("random source poisoned".to_string()))?;
            state.select_prize(&identifier, &mut *rng)?
        };

        let outcome = state.commit(&identifier, &prize).await?;
        log::info!(
            "Participant {identifier} won {} ({})",
            outcome.prize_name,
            outcome.prize_id
        );
        Ok(outcome)
    }
}
