use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::future::BoxFuture;
use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{TokenId, TokenRecord};

/// Simulated latency of the placeholder data source
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("token not found: {0}")]
    NotFound(TokenId),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Turns an identifier into a full record.
///
/// The returned future must not borrow from `self` so that callers can spawn it;
/// implementations clone whatever shared state they need.
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, id: &TokenId) -> BoxFuture<'static, Result<TokenRecord, ResolveError>>;
}

/// Resolver backed by an in-memory table behind an artificial delay
#[derive(Clone, Debug)]
pub struct StaticResolver {
    table: Arc<HashMap<TokenId, TokenRecord>>,
    delay: Duration,
}

impl StaticResolver {
    pub fn new(records: Vec<TokenRecord>, delay: Duration) -> Result<Self> {
        validate(&records)?;
        let table = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Ok(Self {
            table: Arc::new(table),
            delay,
        })
    }

    /// Placeholder table shipped with the app
    pub fn placeholder(delay: Duration) -> Self {
        let table = placeholder_records()
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        Self {
            table: Arc::new(table),
            delay,
        }
    }

    /// Load a JSON array of records
    pub fn from_file(path: &Path, delay: Duration) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取数据文件失败：{}", path.display()))?;
        let records: Vec<TokenRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("解析数据文件失败：{}", path.display()))?;
        tracing::info!(path = %path.display(), count = records.len(), "已加载代币数据");
        Self::new(records, delay)
    }

    /// Identifiers in the table, sorted
    pub fn ids(&self) -> Vec<TokenId> {
        self.table.keys().cloned().sorted().collect()
    }
}

impl TokenResolver for StaticResolver {
    fn resolve(&self, id: &TokenId) -> BoxFuture<'static, Result<TokenRecord, ResolveError>> {
        let table = Arc::clone(&self.table);
        let delay = self.delay;
        let id = id.clone();
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            table.get(&id).cloned().ok_or(ResolveError::NotFound(id))
        })
    }
}

fn validate(records: &[TokenRecord]) -> Result<()> {
    if let Some(dup) = records.iter().map(|r| &r.id).duplicates().next() {
        bail!("代币 ID 重复：{dup}");
    }
    for record in records {
        if record.id.is_empty() {
            bail!("代币 ID 不能为空");
        }
        if record.name.is_empty() {
            bail!("代币 {} 缺少名称", record.id);
        }
        for (field, value) in record.unsigned_fields() {
            if value < Decimal::ZERO {
                bail!("代币 {} 的 {field} 不能为负数：{value}", record.id);
            }
        }
    }
    Ok(())
}

fn placeholder_records() -> Vec<TokenRecord> {
    const ICON: &str = "/placeholder.svg?height=32&width=32";
    vec![
        TokenRecord {
            id: "1".into(),
            name: "DOGS".to_string(),
            icon: ICON.to_string(),
            price: dec!(0.1234),
            change_24h: dec!(5.67),
            market_cap: dec!(340000000),
            volume: dec!(217000000),
            supply: dec!(1000000000),
        },
        TokenRecord {
            id: "2".into(),
            name: "Scale".to_string(),
            icon: ICON.to_string(),
            price: dec!(2.3456),
            change_24h: dec!(-3.21),
            market_cap: dec!(340000000),
            volume: dec!(217000000),
            supply: dec!(500000000),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> TokenRecord {
        TokenRecord {
            id: id.into(),
            name: format!("T{id}"),
            icon: String::new(),
            price: dec!(1),
            change_24h: dec!(0),
            market_cap: dec!(1),
            volume: dec!(1),
            supply: dec!(1),
        }
    }

    #[tokio::test]
    async fn every_placeholder_id_resolves_to_itself() {
        let resolver = StaticResolver::placeholder(Duration::ZERO);
        for id in resolver.ids() {
            let record = resolver.resolve(&id).await.expect("known id");
            assert_eq!(record.id, id);
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let resolver = StaticResolver::placeholder(Duration::ZERO);
        let id = TokenId::new("999");
        let err = resolver.resolve(&id).await.expect_err("unknown id");
        assert_eq!(err, ResolveError::NotFound(id));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let resolver = StaticResolver::placeholder(DEFAULT_DELAY);
        let started = tokio::time::Instant::now();
        let record = resolver.resolve(&"1".into()).await.expect("known id");
        assert_eq!(record.name, "DOGS");
        assert!(started.elapsed() >= DEFAULT_DELAY);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = StaticResolver::new(vec![record("a"), record("a")], Duration::ZERO)
            .expect_err("duplicate ids");
        assert!(err.to_string().contains("重复"));
    }

    #[test]
    fn rejects_negative_supply() {
        let mut bad = record("a");
        bad.supply = dec!(-1);
        let err = StaticResolver::new(vec![bad], Duration::ZERO).expect_err("negative supply");
        assert!(err.to_string().contains("supply"));
    }

    #[test]
    fn loads_table_from_json_file() {
        let path = std::env::temp_dir().join(format!(
            "token-detail-table-{}.json",
            std::process::id()
        ));
        let json = serde_json::to_string(&vec![record("x"), record("y")]).expect("serialize");
        std::fs::write(&path, json).expect("write table");

        let resolver = StaticResolver::from_file(&path, Duration::ZERO);
        _ = std::fs::remove_file(&path);

        let resolver = resolver.expect("valid table");
        assert_eq!(resolver.ids(), vec![TokenId::new("x"), TokenId::new("y")]);
    }
}
