//! Categorizer
//!
//! Scores text against every category in a [`CategoryStore`] and picks the
//! best one.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{MysliError, Result};
use crate::tags;

use super::builtin::CategoryDef;
use super::store::CategoryStore;

/// Score added per keyword entry found in the normalized text
pub const KEYWORD_SCORE: u32 = 2;

/// Score added per pattern matching the original text
pub const PATTERN_SCORE: u32 = 3;

/// Score that maps to confidence 1.0
pub const DEFAULT_CONFIDENCE_DIVISOR: f64 = 15.0;

/// Result of categorizing a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub category: String,
    pub icon: String,
    /// Heuristic score normalized to 0.0-1.0
    pub confidence: f64,
}

/// Per-category score breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub icon: String,
    pub keyword_hits: usize,
    pub pattern_hits: usize,
    pub score: u32,
}

/// Name and icon of a category, for filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub icon: String,
}

/// Rule-based categorizer
pub struct Categorizer {
    store: CategoryStore,
    compiled_patterns: HashMap<String, Vec<Regex>>,
    confidence_divisor: f64,
}

impl Categorizer {
    /// Create a categorizer over `store`, compiling every pattern.
    pub fn new(store: CategoryStore) -> Result<Self> {
        let mut compiled_patterns = HashMap::new();

        for cat in store.all() {
            let patterns = cat
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|source| MysliError::InvalidPattern {
                        category: cat.name.clone(),
                        pattern: p.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            compiled_patterns.insert(cat.name.clone(), patterns);
        }

        Ok(Self {
            store,
            compiled_patterns,
            confidence_divisor: DEFAULT_CONFIDENCE_DIVISOR,
        })
    }

    /// Categorizer over the builtin categories only
    pub fn builtin() -> Result<Self> {
        Self::new(CategoryStore::builtin())
    }

    /// Builtin categories merged with the config's overrides and tunables
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = CategoryStore::builtin().with_config(&config.categories)?;
        Ok(Self::new(store)?.with_confidence_divisor(config.categorizer.confidence_divisor))
    }

    /// Override the confidence divisor. Non-positive or non-finite values
    /// are ignored.
    pub fn with_confidence_divisor(mut self, divisor: f64) -> Self {
        if divisor.is_finite() && divisor > 0.0 {
            self.confidence_divisor = divisor;
        } else {
            debug!(divisor, "ignoring invalid confidence divisor");
        }
        self
    }

    pub fn confidence_divisor(&self) -> f64 {
        self.confidence_divisor
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// Get a category definition
    pub fn get_category(&self, name: &str) -> Option<&CategoryDef> {
        self.store.get(name)
    }

    /// Available category names in table order
    pub fn category_names(&self) -> Vec<&str> {
        self.store.names()
    }

    /// Name and icon of every category, in table order
    pub fn categories(&self) -> Vec<CategoryInfo> {
        self.store
            .all()
            .iter()
            .map(|c| CategoryInfo {
                name: c.name.clone(),
                icon: c.icon.clone(),
            })
            .collect()
    }

    /// Score `text` against every category, in table order.
    ///
    /// Keywords are matched against the trimmed, lower-cased text; patterns
    /// against `text` as given. Each keyword entry counts at most once, so a
    /// keyword listed twice scores twice.
    pub fn scores(&self, text: &str) -> Vec<CategoryScore> {
        let normalized = text.trim().to_lowercase();

        self.store
            .all()
            .iter()
            .map(|cat| {
                let keyword_hits = cat
                    .keywords
                    .iter()
                    .filter(|kw| normalized.contains(kw.as_str()))
                    .count();
                let pattern_hits = self
                    .compiled_patterns
                    .get(&cat.name)
                    .map(|patterns| patterns.iter().filter(|p| p.is_match(text)).count())
                    .unwrap_or(0);

                CategoryScore {
                    name: cat.name.clone(),
                    icon: cat.icon.clone(),
                    keyword_hits,
                    pattern_hits,
                    score: keyword_hits as u32 * KEYWORD_SCORE
                        + pattern_hits as u32 * PATTERN_SCORE,
                }
            })
            .collect()
    }

    /// Pick the best category for `text`.
    ///
    /// Ties go to the category that comes first in the table. Empty text, or
    /// text that scores zero everywhere, yields the fallback category.
    pub fn categorize(&self, text: &str) -> CategorizationResult {
        if text.is_empty() {
            return self.fallback_result();
        }

        let mut best: Option<CategoryScore> = None;
        for score in self.scores(text) {
            if score.score > best.as_ref().map_or(0, |b| b.score) {
                best = Some(score);
            }
        }

        match best {
            Some(best) => {
                let confidence = (f64::from(best.score) / self.confidence_divisor).min(1.0);
                debug!(
                    category = %best.name,
                    score = best.score,
                    confidence,
                    "categorized text"
                );
                CategorizationResult {
                    category: best.name,
                    icon: best.icon,
                    confidence,
                }
            }
            None => {
                debug!("no category matched, using fallback");
                self.fallback_result()
            }
        }
    }

    /// Categorize untyped input. Anything other than a non-empty JSON
    /// string degrades to the fallback with confidence 0.
    pub fn categorize_value(&self, value: &serde_json::Value) -> CategorizationResult {
        match value.as_str() {
            Some(text) => self.categorize(text),
            None => self.fallback_result(),
        }
    }

    /// `#tags` and `@mentions` in `text`
    pub fn extract_tags(&self, text: &str) -> Vec<String> {
        tags::extract_tags(text)
    }

    /// Append a lower-cased keyword to `category`.
    ///
    /// Returns `false` and leaves the table untouched when the category does
    /// not exist. Keywords are not deduplicated.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> bool {
        match self.store.get_mut(category) {
            Some(def) => {
                def.keywords.push(keyword.to_lowercase());
                true
            }
            None => {
                warn!(category, keyword, "ignoring keyword for unknown category");
                false
            }
        }
    }

    fn fallback_result(&self) -> CategorizationResult {
        let fallback = self.store.fallback();
        CategorizationResult {
            category: fallback.name.clone(),
            icon: fallback.icon.clone(),
            confidence: 0.0,
        }
    }
}
