use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, Prize, UNLIMITED_QUANTITY, UpdatePrizeRequest};
use crate::utils::generate_prize_id;

use super::json_file::{read_json_file, write_json_file};

/// 奖品库存
///
/// 内存中的奖品列表是唯一数据源，每次变更后整体覆盖写入磁盘。
/// 列表顺序即存储顺序，抽奖时按此顺序累计权重。
#[derive(Debug)]
pub struct InventoryStore {
    path: PathBuf,
    prizes: Vec<Prize>,
}

impl InventoryStore {
    /// 加载奖品库存。文件缺失、损坏或包含非法奖品都视为启动失败。
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let mut prizes: Vec<Prize> = match read_json_file(&path).await {
            Ok(Some(prizes)) => prizes,
            Ok(None) => {
                return Err(AppError::ConfigError(format!(
                    "prize inventory {} does not exist",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "failed to load prize inventory {}: {e}",
                    path.display()
                )));
            }
        };

        let mut assigned = 0;
        for prize in prizes.iter_mut().filter(|p| p.id.trim().is_empty()) {
            prize.id = generate_prize_id();
            assigned += 1;
        }

        let mut seen = HashSet::new();
        for prize in &prizes {
            validate_prize(prize).map_err(|e| {
                AppError::ConfigError(format!("invalid prize {:?} in inventory: {e}", prize.id))
            })?;
            if !seen.insert(prize.id.as_str()) {
                return Err(AppError::ConfigError(format!(
                    "duplicate prize id {:?} in inventory",
                    prize.id
                )));
            }
        }
        validate_total_weight(&prizes)
            .map_err(|e| AppError::ConfigError(format!("invalid prize inventory: {e}")))?;

        let store = Self { path, prizes };
        if assigned > 0 {
            log::info!("Assigned ids to {assigned} prizes without one");
            store.persist().await?;
        }

        log::info!(
            "Loaded {} prizes from {}",
            store.prizes.len(),
            store.path.display()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全部奖品（后台展示）
    pub fn list(&self) -> &[Prize] {
        &self.prizes
    }

    /// 当前可抽奖品快照，保持存储顺序
    pub fn available(&self) -> Vec<Prize> {
        self.prizes
            .iter()
            .filter(|p| p.is_available())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    /// 扣减一件库存。无限库存奖品不扣减也不写盘。
    pub async fn decrement(&mut self, id: &str) -> AppResult<()> {
        let prize = self
            .prizes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("prize {id} not found")))?;

        if prize.is_unlimited() {
            return Ok(());
        }
        if prize.quantity <= 0 {
            return Err(AppError::OutOfStock(format!("prize {id} is out of stock")));
        }

        prize.quantity -= 1;
        self.persist().await
    }

    pub async fn add(&mut self, request: CreatePrizeRequest) -> AppResult<Prize> {
        let (Some(name), Some(quantity), Some(probability)) =
            (request.name, request.quantity, request.probability)
        else {
            return Err(AppError::ValidationError(
                "name, quantity and probability are required".to_string(),
            ));
        };

        let prize = Prize {
            id: self.unique_id(),
            name: name.trim().to_string(),
            quantity,
            probability,
        };
        validate_prize(&prize)?;
        validate_total_weight(self.prizes.iter().chain(std::iter::once(&prize)))?;

        self.prizes.push(prize.clone());
        self.persist().await?;
        Ok(prize)
    }

    /// 部分更新；校验通过后才替换原奖品
    pub async fn update(&mut self, id: &str, request: UpdatePrizeRequest) -> AppResult<Prize> {
        let index = self
            .prizes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("prize {id} not found")))?;

        let mut updated = self.prizes[index].clone();
        if let Some(name) = request.name {
            updated.name = name.trim().to_string();
        }
        if let Some(quantity) = request.quantity {
            updated.quantity = quantity;
        }
        if let Some(probability) = request.probability {
            updated.probability = probability;
        }
        validate_prize(&updated)?;
        validate_total_weight(
            self.prizes
                .iter()
                .enumerate()
                .map(|(i, p)| if i == index { &updated } else { p }),
        )?;

        self.prizes[index] = updated.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn remove(&mut self, id: &str) -> AppResult<Prize> {
        let index = self
            .prizes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("prize {id} not found")))?;

        let removed = self.prizes.remove(index);
        self.persist().await?;
        Ok(removed)
    }

    fn unique_id(&self) -> String {
        loop {
            let id = generate_prize_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    async fn persist(&self) -> AppResult<()> {
        write_json_file(&self.path, &self.prizes).await
    }
}

/// 校验奖品字段
pub fn validate_prize(prize: &Prize) -> AppResult<()> {
    if prize.name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "prize name must not be empty".to_string(),
        ));
    }
    if prize.quantity < UNLIMITED_QUANTITY {
        return Err(AppError::ValidationError(format!(
            "prize quantity must be >= {UNLIMITED_QUANTITY}, got {}",
            prize.quantity
        )));
    }
    if !prize.probability.is_finite() || prize.probability < 0.0 {
        return Err(AppError::ValidationError(format!(
            "prize probability must be a non-negative number, got {}",
            prize.probability
        )));
    }
    Ok(())
}

/// 权重之和必须是有限数，否则轮盘选取的随机点溢出为 inf，只会落到最后一个奖品
pub fn validate_total_weight<'a>(prizes: impl IntoIterator<Item = &'a Prize>) -> AppResult<()> {
    let total: f64 = prizes.into_iter().map(|p| p.probability).sum();
    if !total.is_finite() {
        return Err(AppError::ValidationError(format!(
            "total prize probability must be finite, got {total}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::scratch_dir;

    async fn store_with(json: &str) -> InventoryStore {
        let path = scratch_dir().join("prizes.json");
        std::fs::write(&path, json).unwrap();
        InventoryStore::load(path).await.unwrap()
    }

    fn on_disk(store: &InventoryStore) -> Vec<Prize> {
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_fatal() {
        let path = scratch_dir().join("prizes.json");
        assert!(matches!(
            InventoryStore::load(path).await,
            Err(AppError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_fatal() {
        let path = scratch_dir().join("prizes.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();
        assert!(matches!(
            InventoryStore::load(path).await,
            Err(AppError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_negative_stock() {
        let path = scratch_dir().join("prizes.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"Mug","quantity":-5,"probability":1}]"#,
        )
        .unwrap();
        assert!(InventoryStore::load(path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_backfills_missing_ids() {
        let store = store_with(
            r#"[{"name":"Mug","quantity":2,"probability":1},
                {"id":"keep","name":"Pen","quantity":-1,"probability":3}]"#,
        )
        .await;

        let prizes = store.list();
        assert_eq!(prizes[0].id.len(), 16);
        assert_eq!(prizes[1].id, "keep");
        // 补齐的ID已写回磁盘
        assert_eq!(on_disk(&store), prizes.to_vec());
    }

    #[tokio::test]
    async fn test_available_filters_and_keeps_order() {
        let store = store_with(
            r#"[{"id":"a","name":"A","quantity":0,"probability":1},
                {"id":"b","name":"B","quantity":-1,"probability":1},
                {"id":"c","name":"C","quantity":4,"probability":2}]"#,
        )
        .await;

        let ids: Vec<_> = store.available().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(store.list().len(), 3);
    }

    #[tokio::test]
    async fn test_decrement_finite_persists() {
        let mut store =
            store_with(r#"[{"id":"a","name":"A","quantity":1,"probability":1}]"#).await;

        store.decrement("a").await.unwrap();
        assert_eq!(store.get("a").unwrap().quantity, 0);
        assert_eq!(on_disk(&store)[0].quantity, 0);

        // 库存不会变为负数
        assert!(matches!(
            store.decrement("a").await,
            Err(AppError::OutOfStock(_))
        ));
        assert_eq!(store.get("a").unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_decrement_unlimited_is_noop() {
        let mut store =
            store_with(r#"[{"id":"b","name":"B","quantity":-1,"probability":1}]"#).await;
        for _ in 0..3 {
            store.decrement("b").await.unwrap();
        }
        assert_eq!(store.get("b").unwrap().quantity, UNLIMITED_QUANTITY);
    }

    #[tokio::test]
    async fn test_decrement_unknown_is_not_found() {
        let mut store = store_with("[]").await;
        assert!(matches!(
            store.decrement("ghost").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_update_remove() {
        let mut store = store_with("[]").await;

        let created = store
            .add(CreatePrizeRequest {
                name: Some(" Umbrella ".into()),
                quantity: Some(5),
                probability: Some(0.5),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Umbrella");
        assert_eq!(on_disk(&store), vec![created.clone()]);

        let updated = store
            .update(
                &created.id,
                UpdatePrizeRequest {
                    quantity: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Umbrella");
        assert!(updated.is_unlimited());

        store.remove(&created.id).await.unwrap();
        assert!(store.list().is_empty());
        assert!(on_disk(&store).is_empty());
        assert!(matches!(
            store.remove(&created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_requires_all_fields() {
        let mut store = store_with("[]").await;
        let result = store
            .add(CreatePrizeRequest {
                name: Some("Cap".into()),
                quantity: None,
                probability: Some(1.0),
            })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_prize_untouched() {
        let mut store =
            store_with(r#"[{"id":"a","name":"A","quantity":3,"probability":1}]"#).await;

        let result = store
            .update(
                "a",
                UpdatePrizeRequest {
                    probability: Some(-2.0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(store.get("a").unwrap().probability, 1.0);
    }

    #[tokio::test]
    async fn test_load_rejects_overflowing_total_weight() {
        let path = scratch_dir().join("prizes.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"A","quantity":-1,"probability":1e308},
                {"id":"b","name":"B","quantity":-1,"probability":1e308}]"#,
        )
        .unwrap();
        assert!(matches!(
            InventoryStore::load(path).await,
            Err(AppError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_add_and_update_reject_overflowing_total_weight() {
        let mut store = store_with(
            r#"[{"id":"a","name":"A","quantity":-1,"probability":1e308},
                {"id":"b","name":"B","quantity":-1,"probability":1}]"#,
        )
        .await;

        let added = store
            .add(CreatePrizeRequest {
                name: Some("C".into()),
                quantity: Some(1),
                probability: Some(1e308),
            })
            .await;
        assert!(matches!(added, Err(AppError::ValidationError(_))));
        assert_eq!(store.list().len(), 2);

        let updated = store
            .update(
                "b",
                UpdatePrizeRequest {
                    probability: Some(1e308),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(updated, Err(AppError::ValidationError(_))));
        assert_eq!(store.get("b").unwrap().probability, 1.0);
        assert_eq!(on_disk(&store)[1].probability, 1.0);

        // 替换自身的权重不会被重复计入
        store
            .update(
                "a",
                UpdatePrizeRequest {
                    probability: Some(1.5e308),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
}
