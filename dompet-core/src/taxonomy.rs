//! Category taxonomy: keyword lists per transaction type.
//!
//! The taxonomy is owned by the caller (config file or built-in default) and
//! only read by the classifier. A category with no keywords (or only `"*"`)
//! is the fallback for its type.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::finance::TransactionType;

/// Name used when a taxonomy has no fallback category for a type
pub const FALLBACK_CATEGORY: &str = "Lainnya";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub icon: String,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str], icon: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            icon: icon.to_string(),
        }
    }

    /// True when this category only catches what nothing else matched
    pub fn is_fallback(&self) -> bool {
        self.keywords.iter().all(|k| is_wildcard(k))
    }
}

/// Keywords that never score: empty strings and `*`
pub fn is_wildcard(keyword: &str) -> bool {
    let k = keyword.trim();
    k.is_empty() || k == "*"
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("no {0} categories defined")]
    Empty(TransactionType),

    #[error("{0} categories need exactly one fallback (no keywords), found {1}")]
    Fallback(TransactionType, usize),

    #[error("duplicate {0} category: {1}")]
    Duplicate(TransactionType, String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTaxonomy {
    pub income: Vec<Category>,
    pub expense: Vec<Category>,
}

impl CategoryTaxonomy {
    /// Categories for a type, in classification order
    pub fn categories(&self, kind: TransactionType) -> &[Category] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    pub fn fallback(&self, kind: TransactionType) -> Option<&Category> {
        self.categories(kind).iter().find(|c| c.is_fallback())
    }

    pub fn fallback_name(&self, kind: TransactionType) -> &str {
        self.fallback(kind)
            .map(|c| c.name.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn find(&self, kind: TransactionType, name: &str) -> Option<&Category> {
        self.categories(kind)
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Icon for a category name, empty when unknown
    pub fn icon(&self, kind: TransactionType, name: &str) -> &str {
        self.find(kind, name).map(|c| c.icon.as_str()).unwrap_or("")
    }

    /// Check the invariants the classifier relies on.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        for kind in [TransactionType::Income, TransactionType::Expense] {
            let cats = self.categories(kind);
            if cats.is_empty() {
                return Err(TaxonomyError::Empty(kind));
            }

            let fallbacks = cats.iter().filter(|c| c.is_fallback()).count();
            if fallbacks != 1 {
                return Err(TaxonomyError::Fallback(kind, fallbacks));
            }

            let mut seen = HashSet::new();
            for c in cats {
                if !seen.insert(c.name.to_lowercase()) {
                    return Err(TaxonomyError::Duplicate(kind, c.name.clone()));
                }
            }
        }
        Ok(())
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        default_taxonomy()
    }
}

/// Built-in Indonesian taxonomy.
pub fn default_taxonomy() -> CategoryTaxonomy {
    CategoryTaxonomy {
        income: vec![
            Category::new("Gaji", &["gaji", "salary", "upah"], "💰"),
            Category::new("Bonus", &["bonus", "tunjangan", "thr"], "🎁"),
            Category::new("Investasi", &["dividen", "bunga", "profit", "saham"], "📈"),
            Category::new("Freelance", &["freelance", "project", "client", "proyek"], "💻"),
            Category::new(FALLBACK_CATEGORY, &[], "💵"),
        ],
        expense: vec![
            Category::new(
                "Makanan",
                &["makan", "food", "groceries", "restaurant", "cafe", "kopi", "jajan"],
                "🍽️",
            ),
            Category::new(
                "Transport",
                &["bensin", "fuel", "grab", "gojek", "taxi", "bus", "spbu", "parkir", "tol"],
                "🚗",
            ),
            Category::new("Belanja", &["beli", "shopping", "market", "mall"], "🛒"),
            Category::new(
                "Tagihan",
                &["listrik", "internet", "air", "telepon", "wifi", "pulsa"],
                "🧾",
            ),
            Category::new("Kesehatan", &["dokter", "obat", "hospital", "medical"], "🏥"),
            Category::new("Hiburan", &["movie", "game", "concert", "vacation", "bioskop"], "🎬"),
            Category::new("Pendidikan", &["kursus", "buku", "course", "training"], "📚"),
            Category::new(FALLBACK_CATEGORY, &[], "💸"),
        ],
    }
}
