//! dompet-parse: amount, date and category rules plus the transaction extractor

pub mod amount;
pub mod category_rules;
pub mod date;
pub mod extract;

pub use amount::{AmountMatch, find_amount, parse_amount};
pub use category_rules::{CategoryMatch, classify, classify_scored};
pub use date::{DateMatch, find_date, parse_date};
pub use extract::extract;
