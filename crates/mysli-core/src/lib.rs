pub mod category;
pub mod config;
pub mod error;
pub mod note;
pub mod tags;

pub use config::{CategorizerConfig, Config, DisplayConfig};
pub use error::{MysliError, Result};
pub use note::{Note, NoteFilter, NoteStore};
pub use tags::extract_tags;

// Category system
pub use category::{
    BuiltinCategory, CategoriesConfig, CategorizationResult, Categorizer, CategoryConfigEntry,
    CategoryDef, CategoryInfo, CategoryScore, CategoryStore, BUILTIN_CATEGORIES,
    DEFAULT_FALLBACK_CATEGORY,
};
