use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display class for a signed profit/loss figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnlClass {
    Profit,
    Loss,
}

impl PnlClass {
    /// Classify a value. Zero counts as profit.
    pub fn of(pnl: f64) -> Self {
        if pnl >= 0.0 {
            PnlClass::Profit
        } else {
            PnlClass::Loss
        }
    }

    /// CSS class name used by the view.
    pub fn css_class(&self) -> &'static str {
        match self {
            PnlClass::Profit => "profit",
            PnlClass::Loss => "loss",
        }
    }
}

impl fmt::Display for PnlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Per-product profit/loss, in the order the backend sent the keys.
///
/// A plain `HashMap` would lose that order, and the chart's bar order
/// follows it, so entries are kept as an ordered list of pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlByProduct(Vec<(String, f64)>);

impl PnlByProduct {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite a product's P&L. An overwritten key keeps its position.
    pub fn insert(&mut self, product: impl Into<String>, pnl: f64) {
        let product = product.into();
        match self.0.iter_mut().find(|(p, _)| *p == product) {
            Some(entry) => entry.1 = pnl,
            None => self.0.push((product, pnl)),
        }
    }

    #[must_use]
    pub fn get(&self, product: &str) -> Option<f64> {
        self.0.iter().find(|(p, _)| p == product).map(|(_, v)| *v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(p, v)| (p.as_str(), *v))
    }

    /// Product names in iteration order.
    pub fn products(&self) -> Vec<&str> {
        self.0.iter().map(|(p, _)| p.as_str()).collect()
    }

    /// P&L values in iteration order, parallel to [`products`](Self::products).
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|(_, v)| *v).collect()
    }

    /// Number of products with a non-negative P&L.
    #[must_use]
    pub fn count_profitable(&self) -> usize {
        self.0.iter().filter(|(_, v)| *v >= 0.0).count()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PnlByProduct {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut map = PnlByProduct::new();
        for (product, pnl) in iter {
            map.insert(product, pnl);
        }
        map
    }
}

impl Serialize for PnlByProduct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (product, pnl) in &self.0 {
            map.serialize_entry(product, pnl)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PnlByProduct {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PnlVisitor;

        impl<'de> Visitor<'de> for PnlVisitor {
            type Value = PnlByProduct;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of product name to profit/loss")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PnlByProduct, A::Error> {
                let mut map = PnlByProduct(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((product, pnl)) = access.next_entry::<String, f64>()? {
                    map.insert(product, pnl);
                }
                Ok(map)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<PnlByProduct, D::Error> {
                deserializer.deserialize_map(self)
            }

            // `null` means no products yet.
            fn visit_none<E: de::Error>(self) -> Result<PnlByProduct, E> {
                Ok(PnlByProduct::new())
            }

            fn visit_unit<E: de::Error>(self) -> Result<PnlByProduct, E> {
                Ok(PnlByProduct::new())
            }
        }

        deserializer.deserialize_option(PnlVisitor)
    }
}

/// Dashboard read model computed by the backend from the full transaction history.
///
/// Replaced wholesale on every fetch; the client never patches it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Realized FIFO profit/loss across all products
    pub total_pnl: f64,

    /// Number of transactions recorded
    pub total_transactions: u64,

    /// Number of distinct products traded
    pub total_products: u64,

    /// Number of products whose P&L is >= 0
    pub profitable_products: u64,

    /// Per-product P&L, in backend order
    #[serde(default)]
    pub pnl_by_product: PnlByProduct,
}

impl DashboardSummary {
    /// Whether there is at least one product to chart.
    #[must_use]
    pub fn has_product_data(&self) -> bool {
        !self.pnl_by_product.is_empty()
    }

    #[must_use]
    pub fn total_pnl_class(&self) -> PnlClass {
        PnlClass::of(self.total_pnl)
    }

    /// Checks the backend's `profitable_products` count against the mapping.
    /// Informational only; nothing rejects a summary on this basis.
    #[must_use]
    pub fn profitable_count_matches(&self) -> bool {
        self.profitable_products as usize == self.pnl_by_product.count_profitable()
    }
}
