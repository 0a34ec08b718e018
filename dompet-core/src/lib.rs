//! dompet-core: domain types for the Indonesian transaction parser

pub mod finance;
pub mod format;
pub mod taxonomy;
pub mod time;

pub use finance::{AmountRule, DateRule, ParsedTransaction, TransactionRecord, TransactionType};
pub use format::{amount_within_range, format_currency, format_date_long, format_date_short};
pub use taxonomy::{
    Category, CategoryTaxonomy, FALLBACK_CATEGORY, TaxonomyError, default_taxonomy,
};
pub use time::{exceeds_future_window, parse_reference, reference_now_in_tz};
