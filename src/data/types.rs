use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Token identifier
/// Opaque key naming a token or trading pair (e.g., `1`, `DOGS-USDT`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId {
    inner: String,
}

impl TokenId {
    pub fn new(id: &str) -> Self {
        Self {
            inner: id.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TokenId {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl std::str::FromStr for TokenId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Resolved token detail
///
/// Shared as `Arc<TokenRecord>` once resolved and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub id: TokenId,
    pub name: String,
    /// Icon URI, kept for richer frontends; the terminal renders a badge instead
    pub icon: String,
    pub price: Decimal,
    /// 24h change in percent, e.g. `5.67` for +5.67%
    #[serde(rename = "change24h")]
    pub change_24h: Decimal,
    pub market_cap: Decimal,
    pub volume: Decimal,
    pub supply: Decimal,
}

impl TokenRecord {
    /// Get display name, fallback to the identifier if name is empty
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Fields that must never be negative, paired with their names
    pub fn unsigned_fields(&self) -> [(&'static str, Decimal); 4] {
        [
            ("price", self.price),
            ("marketCap", self.market_cap),
            ("volume", self.volume),
            ("supply", self.supply),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenId, TokenRecord};
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "id": "7",
            "name": "TON",
            "icon": "/ton.svg",
            "price": "5.1",
            "change24h": -0.5,
            "marketCap": 12000000000,
            "volume": 310000000,
            "supply": "5100000000"
        }"#;
        let record: TokenRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.id, TokenId::new("7"));
        assert_eq!(record.price, dec!(5.1));
        assert_eq!(record.change_24h, dec!(-0.5));
        assert_eq!(record.market_cap, dec!(12000000000));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let record = TokenRecord {
            id: "42".into(),
            name: String::new(),
            icon: String::new(),
            price: dec!(0),
            change_24h: dec!(0),
            market_cap: dec!(0),
            volume: dec!(0),
            supply: dec!(0),
        };
        assert_eq!(record.display_name(), "42");
    }
}
