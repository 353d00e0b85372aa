//! # Category Module
//!
//! Assigns a category to a free-text thought using keyword and regex
//! heuristics.
//!
//! ## Scoring
//!
//! Every category starts at zero for a given text:
//!
//! - **Keyword hit**: +2 for each keyword entry found in the trimmed,
//!   lower-cased text
//! - **Pattern hit**: +3 for each regex that matches the original text
//!
//! The highest score wins, earlier categories win ties, and when nothing
//! scores the fallback category (`notatka`) is returned. Confidence is the
//! winning score divided by 15, capped at 1.
//!
//! ## Module Layout
//!
//! - `builtin`: builtin category table
//! - `store`: runtime category store (builtin + `config.toml` overrides)
//! - `classifier`: the categorizer
//!
//! ## Example
//!
//! ```rust
//! use mysli_core::category::{Categorizer, CategoryStore};
//!
//! let categorizer = Categorizer::new(CategoryStore::builtin()).unwrap();
//!
//! let result = categorizer.categorize("muszę zadzwonić do mamy");
//! assert_eq!(result.category, "zadanie");
//! assert!(result.confidence > 0.0);
//!
//! let result = categorizer.categorize("");
//! assert_eq!(result.category, "notatka");
//! assert_eq!(result.confidence, 0.0);
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES, DEFAULT_FALLBACK_CATEGORY};
pub use classifier::{
    CategorizationResult, Categorizer, CategoryInfo, CategoryScore, DEFAULT_CONFIDENCE_DIVISOR,
    KEYWORD_SCORE, PATTERN_SCORE,
};
pub use store::{CategoriesConfig, CategoryConfigEntry, CategoryStore};
