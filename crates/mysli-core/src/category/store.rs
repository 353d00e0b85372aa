//! Category Store
//!
//! Runtime category table. Holds the builtin definitions merged with
//! `config.toml` overrides, in table order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MysliError, Result};

use super::builtin::{CategoryDef, BUILTIN_CATEGORIES, DEFAULT_FALLBACK_CATEGORY};

/// Ordered category table
///
/// Iteration order is insertion order and doubles as the tie-break order
/// when two categories score the same. Categories are never removed, so the
/// fallback index stays valid for the store's lifetime.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<CategoryDef>,
    fallback: usize,
}

impl CategoryStore {
    /// Build a store from explicit definitions.
    ///
    /// A repeated name replaces the earlier definition in place.
    pub fn new(defs: Vec<CategoryDef>, fallback: &str) -> Result<Self> {
        let mut categories: Vec<CategoryDef> = Vec::with_capacity(defs.len());
        for mut def in defs {
            if def.icon.trim().is_empty() {
                return Err(MysliError::EmptyIcon { name: def.name });
            }
            def.keywords = def.keywords.iter().map(|k| k.to_lowercase()).collect();
            match categories.iter_mut().find(|c| c.name == def.name) {
                Some(existing) => *existing = def,
                None => categories.push(def),
            }
        }

        let fallback = categories
            .iter()
            .position(|c| c.name == fallback)
            .ok_or_else(|| MysliError::MissingFallback {
                name: fallback.to_string(),
            })?;

        Ok(Self {
            categories,
            fallback,
        })
    }

    /// Builtin categories only
    pub fn builtin() -> Self {
        let categories: Vec<CategoryDef> = BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect();
        let fallback = categories
            .iter()
            .position(|c| c.name == DEFAULT_FALLBACK_CATEGORY)
            .unwrap_or_default();
        Self {
            categories,
            fallback,
        }
    }

    /// Apply `[categories.*]` overrides from config.
    ///
    /// - Existing categories get their lists extended (or replaced with
    ///   `replace = true`) and icon/description overridden when given
    /// - Unknown names are appended after the existing table and must
    ///   declare an icon
    pub fn with_config(mut self, config: &CategoriesConfig) -> Result<Self> {
        for (name, entry) in &config.categories {
            if let Some(icon) = &entry.icon {
                if icon.trim().is_empty() {
                    return Err(MysliError::EmptyIcon { name: name.clone() });
                }
            }

            let keywords = entry.keywords.iter().map(|k| k.to_lowercase());

            match self.categories.iter_mut().find(|c| &c.name == name) {
                Some(def) => {
                    if entry.replace {
                        def.keywords = keywords.collect();
                        def.patterns = entry.patterns.clone();
                    } else {
                        def.keywords.extend(keywords);
                        def.patterns.extend(entry.patterns.iter().cloned());
                    }
                    if let Some(icon) = &entry.icon {
                        def.icon = icon.clone();
                    }
                    if let Some(description) = &entry.description {
                        def.description = description.clone();
                    }
                }
                None => {
                    let icon = entry
                        .icon
                        .clone()
                        .ok_or_else(|| MysliError::MissingIcon { name: name.clone() })?;
                    self.categories.push(CategoryDef {
                        name: name.clone(),
                        icon,
                        description: entry.description.clone().unwrap_or_default(),
                        keywords: keywords.collect(),
                        patterns: entry.patterns.clone(),
                    });
                }
            }
        }
        Ok(self)
    }

    /// Get a category definition by name
    pub fn get(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut CategoryDef> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// All categories in table order
    pub fn all(&self) -> &[CategoryDef] {
        &self.categories
    }

    /// Category names in table order
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// The fallback category definition
    pub fn fallback(&self) -> &CategoryDef {
        &self.categories[self.fallback]
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `[categories]` section of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(flatten)]
    pub categories: BTreeMap<String, CategoryConfigEntry>,
}

impl CategoriesConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Per-category config entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfigEntry {
    /// Display glyph (required for new categories)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra keywords (lower-cased on load)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Extra regex patterns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    /// Replace the builtin lists instead of extending them
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub replace: bool,
}
