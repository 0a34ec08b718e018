//! Keyword-scored category rules.
//!
//! Each keyword found in the description scores twice its length, so
//! longer keywords outweigh short accidental hits. A keyword that also
//! stands as its own word adds 5 more.

use dompet_core::{Category, CategoryTaxonomy, TransactionType, taxonomy::is_wildcard};
use serde::Serialize;
use tracing::debug;

const WHOLE_WORD_BONUS: u32 = 5;

/// Result of categorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMatch {
    pub name: String,
    /// 0 when the fallback category was used
    pub score: u32,
}

fn keyword_score(description: &str, padded: &str, category: &Category) -> u32 {
    category
        .keywords
        .iter()
        .filter(|k| !is_wildcard(k))
        .map(|k| k.trim().to_lowercase())
        .filter(|k| description.contains(k.as_str()))
        .map(|k| {
            let mut score = 2 * k.chars().count() as u32;
            if padded.contains(&format!(" {k} ")) {
                score += WHOLE_WORD_BONUS;
            }
            score
        })
        .sum()
}

/// Score every category of `kind` and keep the best.
/// Ties go to the category listed first in the taxonomy.
pub fn classify_scored(
    description: &str,
    kind: TransactionType,
    taxonomy: &CategoryTaxonomy,
) -> CategoryMatch {
    let desc = description.to_lowercase();
    let padded = format!(" {desc} ");

    let mut best: Option<(&Category, u32)> = None;
    for category in taxonomy.categories(kind) {
        let score = keyword_score(&desc, &padded, category);
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((category, score)),
        }
    }

    match best {
        Some((category, score)) => {
            debug!(description, category = %category.name, score, "category detected");
            CategoryMatch {
                name: category.name.clone(),
                score,
            }
        }
        None => CategoryMatch {
            name: taxonomy.fallback_name(kind).to_string(),
            score: 0,
        },
    }
}

/// Deterministically categorize a description.
pub fn classify(description: &str, kind: TransactionType, taxonomy: &CategoryTaxonomy) -> String {
    classify_scored(description, kind, taxonomy).name
}

#[cfg(test)]
mod tests {
    use super::*;
    use dompet_core::default_taxonomy;

    #[test]
    fn test_fuel_is_transport() {
        let tax = default_taxonomy();
        assert_eq!(
            classify("beli bensin di spbu", TransactionType::Expense, &tax),
            "Transport"
        );
    }

    #[test]
    fn test_unknown_text_falls_back() {
        let tax = default_taxonomy();
        let m = classify_scored("random text", TransactionType::Expense, &tax);
        assert_eq!(m.name, "Lainnya");
        assert_eq!(m.score, 0);
    }

    #[test]
    fn test_scores_length_and_whole_word() {
        let tax = default_taxonomy();
        // "makan": 10 + 5 whole word
        let m = classify_scored("Makan siang", TransactionType::Expense, &tax);
        assert_eq!(
            m,
            CategoryMatch {
                name: "Makanan".to_string(),
                score: 15,
            }
        );

        // "kopi" inside "ngopi": substring only
        let m = classify_scored("Ngopi", TransactionType::Expense, &tax);
        assert_eq!(
            m,
            CategoryMatch {
                name: "Makanan".to_string(),
                score: 8,
            }
        );
    }

    #[test]
    fn test_income_categories() {
        let tax = default_taxonomy();
        assert_eq!(classify("Gaji bulan ini", TransactionType::Income, &tax), "Gaji");
        assert_eq!(classify("dividen saham BBCA", TransactionType::Income, &tax), "Investasi");
        assert_eq!(classify("Pemasukan", TransactionType::Income, &tax), "Lainnya");
    }

    #[test]
    fn test_type_selects_keyword_list() {
        let tax = default_taxonomy();
        // "gaji" is an income keyword only
        assert_eq!(classify("gaji", TransactionType::Expense, &tax), "Lainnya");
    }

    #[test]
    fn test_tie_keeps_first_category() {
        let tax = CategoryTaxonomy {
            income: vec![Category::new("Lainnya", &[], "")],
            expense: vec![
                Category::new("Satu", &["abc"], ""),
                Category::new("Dua", &["xyz"], ""),
                Category::new("Lainnya", &["*"], ""),
            ],
        };
        assert_eq!(classify("abc xyz", TransactionType::Expense, &tax), "Satu");
        assert_eq!(classify("xyz abc", TransactionType::Expense, &tax), "Satu");
    }

    #[test]
    fn test_taxonomy_without_fallback() {
        let tax = CategoryTaxonomy {
            income: vec![],
            expense: vec![Category::new("Makanan", &["makan"], "")],
        };
        assert_eq!(classify("bensin", TransactionType::Expense, &tax), "Lainnya");
        assert_eq!(classify("anything", TransactionType::Income, &tax), "Lainnya");
    }

    #[test]
    fn test_idempotent() {
        let tax = default_taxonomy();
        let a = classify_scored("bayar listrik dan wifi", TransactionType::Expense, &tax);
        let b = classify_scored("bayar listrik dan wifi", TransactionType::Expense, &tax);
        assert_eq!(a, b);
        assert_eq!(a.name, "Tagihan");
    }
}
