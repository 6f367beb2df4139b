use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TxnType {
    /// Acquiring units of a product
    #[default]
    Buy,
    /// Disposing of units of a product
    Sell,
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxnType::Buy => write!(f, "Buy"),
            TxnType::Sell => write!(f, "Sell"),
        }
    }
}

impl std::str::FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TxnType::Buy),
            "sell" => Ok(TxnType::Sell),
            other => Err(format!("unknown transaction type '{other}' (expected Buy or Sell)")),
        }
    }
}

/// Accepts `"Buy"`/`"Sell"` (any case) and the numeric enum form `0`/`1`
/// some backends emit when no string-enum converter is configured.
impl<'de> Deserialize<'de> for TxnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TxnTypeVisitor;

        impl Visitor<'_> for TxnTypeVisitor {
            type Value = TxnType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"Buy\", \"Sell\", 0 or 1")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TxnType, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TxnType, E> {
                match v {
                    0 => Ok(TxnType::Buy),
                    1 => Ok(TxnType::Sell),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TxnType, E> {
                match u64::try_from(v) {
                    Ok(u) => self.visit_u64(u),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(TxnTypeVisitor)
    }
}

/// A single buy/sell record as exchanged with the FIFO P&L API.
///
/// `id` is assigned by the backend. New transactions are sent with `id = 0`
/// and come back with the persisted id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Server-assigned identifier (0 until persisted)
    #[serde(default)]
    pub id: i64,

    /// ISO-8601 timestamp string, passed through untouched
    pub date: String,

    /// Product identifier (e.g., "Widget")
    pub product: String,

    /// Buy or Sell
    pub txn_type: TxnType,

    /// Number of units
    pub quantity: f64,

    /// Price of one unit
    pub price_per_unit: f64,
}

impl Transaction {
    /// Create an unsaved transaction (id 0).
    pub fn new(
        date: impl Into<String>,
        product: impl Into<String>,
        txn_type: TxnType,
        quantity: f64,
        price_per_unit: f64,
    ) -> Self {
        Self {
            id: 0,
            date: date.into(),
            product: product.into(),
            txn_type,
            quantity,
            price_per_unit,
        }
    }

    /// Gross value of the transaction (`quantity × price_per_unit`).
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.quantity * self.price_per_unit
    }
}
