//! Note storage
//!
//! Notes live in a single flat file, `~/.mysli/notes.json`, newest first.
//! Every create and edit runs the categorizer; tags are taken at creation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::category::Categorizer;
use crate::error::{MysliError, Result};

const NOTES_FILE: &str = "notes.json";
const SHORT_ID_LEN: usize = 8;

/// A captured thought
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub category: String,
    pub icon: String,
    /// Confidence of the last categorization, 0.0-1.0
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// First characters of the id, enough to address a note from the CLI
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(SHORT_ID_LEN) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    /// Last modification time
    pub fn touched_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// List filter; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Case-insensitive substring of the content
    pub query: Option<String>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(category) = &self.category {
            if &note.category != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            let tag = tag.trim_start_matches(['#', '@']);
            if !note.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !note
                .content
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Flat-file note store
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Load notes from base directory (missing file means no notes)
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(NOTES_FILE);
        if !path.exists() {
            return Ok(Self {
                path,
                notes: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let notes: Vec<Note> =
            serde_json::from_str(&content).map_err(|e| MysliError::NotesParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), count = notes.len(), "loaded notes");
        Ok(Self { path, notes })
    }

    /// Write notes back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.notes)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), count = self.notes.len(), "saved notes");
        Ok(())
    }

    /// Get notes file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(NOTES_FILE)
    }

    /// Capture a new note
    pub fn add(&mut self, categorizer: &Categorizer, content: &str) -> Result<&Note> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MysliError::EmptyNote);
        }

        let result = categorizer.categorize(content);
        let note = Note {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            category: result.category,
            icon: result.icon,
            confidence: result.confidence,
            tags: categorizer.extract_tags(content),
            created_at: Utc::now(),
            updated_at: None,
        };

        debug!(id = %note.id, category = %note.category, "added note");
        self.notes.insert(0, note);
        Ok(&self.notes[0])
    }

    /// Replace a note's content and categorize it again
    pub fn update(
        &mut self,
        categorizer: &Categorizer,
        id: &str,
        content: &str,
    ) -> Result<&Note> {
        let content = content.trim();
        if content.is_empty() {
            return Err(MysliError::EmptyNote);
        }

        let idx = self.position(id)?;
        let result = categorizer.categorize(content);

        let note = &mut self.notes[idx];
        note.content = content.to_string();
        note.category = result.category;
        note.icon = result.icon;
        note.confidence = result.confidence;
        note.updated_at = Some(Utc::now());

        debug!(id = %note.id, category = %note.category, "updated note");
        Ok(&self.notes[idx])
    }

    /// Delete a note
    pub fn remove(&mut self, id: &str) -> Result<Note> {
        let idx = self.position(id)?;
        Ok(self.notes.remove(idx))
    }

    /// Get a note by exact id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Find a note by exact id or unique id prefix
    pub fn resolve(&self, id: &str) -> Result<&Note> {
        let idx = self.position(id)?;
        Ok(&self.notes[idx])
    }

    /// Notes matching `filter`, newest first
    pub fn list(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.notes.iter().filter(|n| filter.matches(n)).collect()
    }

    /// All notes, newest first
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Number of notes per category
    pub fn category_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for note in &self.notes {
            *counts.entry(note.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Categorize every note again with the current table.
    ///
    /// Returns how many notes changed category.
    pub fn recategorize_all(&mut self, categorizer: &Categorizer) -> usize {
        let mut changed = 0;
        for note in &mut self.notes {
            let result = categorizer.categorize(&note.content);
            if result.category != note.category {
                debug!(id = %note.id, from = %note.category, to = %result.category, "recategorized note");
                changed += 1;
            }
            note.category = result.category;
            note.icon = result.icon;
            note.confidence = result.confidence;
        }
        changed
    }

    fn position(&self, id: &str) -> Result<usize> {
        if let Some(idx) = self.notes.iter().position(|n| n.id == id) {
            return Ok(idx);
        }

        let not_found = || MysliError::NoteNotFound { id: id.to_string() };
        if id.is_empty() {
            return Err(not_found());
        }

        let matches: Vec<usize> = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.id.starts_with(id))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(not_found()),
            _ => Err(MysliError::AmbiguousNoteId {
                prefix: id.to_string(),
                count: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn categorizer() -> Categorizer {
        Categorizer::builtin().unwrap()
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            content: "x".to_string(),
            category: "notatka".to_string(),
            icon: "📝".to_string(),
            confidence: 0.0,
            tags: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_add_categorizes_and_tags() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();

        let note = store
            .add(&c, "  muszę zadzwonić do mamy #rodzina @tata ")
            .unwrap();
        assert_eq!(note.content, "muszę zadzwonić do mamy #rodzina @tata");
        assert_eq!(note.category, "zadanie");
        assert_eq!(note.icon, "✅");
        assert_eq!(note.tags, vec!["rodzina", "tata"]);
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn test_add_rejects_blank() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        assert!(matches!(
            store.add(&categorizer(), "   "),
            Err(MysliError::EmptyNote)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_newest_first() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        store.add(&c, "pierwsza").unwrap();
        store.add(&c, "druga").unwrap();

        let contents: Vec<&str> = store.all().iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["druga", "pierwsza"]);
    }

    #[test]
    fn test_update_recategorizes_and_keeps_tags() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        let id = store.add(&c, "muszę zadzwonić #dom").unwrap().id.clone();

        let note = store.update(&c, &id, "kup mleko i chleb").unwrap();
        assert_eq!(note.category, "zakupy");
        assert_eq!(note.icon, "🛒");
        assert_eq!(note.tags, vec!["dom"]);
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_update_unknown_id() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        assert!(matches!(
            store.update(&categorizer(), "missing", "tekst"),
            Err(MysliError::NoteNotFound { .. })
        ));
    }

    #[test]
    fn test_remove() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        let id = store.add(&c, "do usunięcia").unwrap().id.clone();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.get(&id).is_none());
        assert!(matches!(
            store.remove(&id),
            Err(MysliError::NoteNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_by_prefix() {
        let store = NoteStore {
            path: PathBuf::from("unused.json"),
            notes: vec![note("abc123"), note("abd456"), note("xyz789")],
        };

        assert_eq!(store.resolve("abc123").unwrap().id, "abc123");
        assert_eq!(store.resolve("abc").unwrap().id, "abc123");
        assert_eq!(store.resolve("x").unwrap().id, "xyz789");
        assert!(matches!(
            store.resolve("ab"),
            Err(MysliError::AmbiguousNoteId { count: 2, .. })
        ));
        assert!(matches!(
            store.resolve("q"),
            Err(MysliError::NoteNotFound { .. })
        ));
        assert!(matches!(
            store.resolve(""),
            Err(MysliError::NoteNotFound { .. })
        ));
    }

    #[test]
    fn test_list_filters() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        store.add(&c, "kup mleko #dom").unwrap();
        store.add(&c, "muszę zadzwonić do szefa #praca").unwrap();
        store.add(&c, "Dlaczego niebo jest niebieskie?").unwrap();

        assert_eq!(store.list(&NoteFilter::default()).len(), 3);

        let zakupy = store.list(&NoteFilter {
            category: Some("zakupy".to_string()),
            ..Default::default()
        });
        assert_eq!(zakupy.len(), 1);
        assert_eq!(zakupy[0].content, "kup mleko #dom");

        let tagged = store.list(&NoteFilter {
            tag: Some("#praca".to_string()),
            ..Default::default()
        });
        assert_eq!(tagged.len(), 1);

        let searched = store.list(&NoteFilter {
            query: Some("NIEBO".to_string()),
            ..Default::default()
        });
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].category, "pytanie");
    }

    #[test]
    fn test_category_counts() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        store.add(&c, "kup mleko").unwrap();
        store.add(&c, "kup chleb").unwrap();
        store.add(&c, "coś bez kategorii").unwrap();

        let counts = store.category_counts();
        assert_eq!(counts.get("zakupy"), Some(&2));
        assert_eq!(counts.get("notatka"), Some(&1));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let c = categorizer();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        store.add(&c, "urodziny Ani 12.05.2025 #rodzina").unwrap();
        store.save().unwrap();

        assert!(NoteStore::path(tmp.path()).exists());
        let loaded = NoteStore::load(tmp.path()).unwrap();
        assert_eq!(loaded.all(), store.all());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(NoteStore::path(tmp.path()), "{ not json").unwrap();
        assert!(matches!(
            NoteStore::load(tmp.path()),
            Err(MysliError::NotesParse { .. })
        ));
    }

    #[test]
    fn test_recategorize_all() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let mut c = categorizer();
        store.add(&c, "rossmann").unwrap();
        store.add(&c, "kup mleko").unwrap();
        assert_eq!(store.category_counts().get("notatka"), Some(&1));

        c.add_keyword("zakupy", "Rossmann");
        assert_eq!(store.recategorize_all(&c), 1);
        assert_eq!(store.category_counts().get("zakupy"), Some(&2));
        assert!(store.all().iter().all(|n| n.icon == "🛒"));
    }

    #[test]
    fn test_short_id() {
        let n = note("0123456789abcdef");
        assert_eq!(n.short_id(), "01234567");
        assert_eq!(note("abc").short_id(), "abc");
    }

    #[test]
    fn test_short_id_non_ascii_id() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            NoteStore::path(tmp.path()),
            r#"[{"id":"ażżżżżżżżż","content":"x","category":"notatka","icon":"📝","created_at":"2025-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let store = NoteStore::load(tmp.path()).unwrap();
        assert_eq!(store.all()[0].short_id(), "ażżżżżżż");
        assert_eq!(store.all()[0].confidence, 0.0);
    }

    #[test]
    fn test_add_records_confidence() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::load(tmp.path()).unwrap();
        let c = categorizer();
        let content = "muszę zadzwonić do mamy";

        let note = store.add(&c, content).unwrap();
        assert!(note.confidence > 0.0);
        assert_eq!(note.confidence, c.categorize(content).confidence);

        let id = note.id.clone();
        let note = store.update(&c, &id, "coś bez kategorii").unwrap();
        assert_eq!(note.confidence, 0.0);
    }
}
