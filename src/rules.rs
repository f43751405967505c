//! Rule store: loads standard definition documents and provides
//! condition-keyed lookup.
//!
//! Each `*.json` document under the standards directory is one standard,
//! named by its file stem. A document maps citation ids to entries carrying
//! at least `condition` and `description`. A malformed document aborts the
//! load: a silently partial rule set is a compliance risk.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One declarative citation definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleEntry {
    /// Standard name as loaded (lowercase file stem).
    pub standard: String,
    pub citation: String,
    pub condition: String,
    pub description: String,
    #[serde(default)]
    pub severity: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read standards directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read standard document {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed standard document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Wire shape of one citation entry inside a standard document. Unknown
/// extra fields are ignored for forward compatibility.
#[derive(Debug, Deserialize)]
struct RawEntry {
    condition: String,
    description: String,
    #[serde(default)]
    severity: String,
}

/// Immutable, condition-indexed collection of rule entries.
///
/// Built once at load time; lookups afterwards are read-only, so one store
/// can serve concurrent evaluations without locking.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    entries: Vec<RuleEntry>,
    by_condition: HashMap<String, Vec<RuleEntry>>,
}

impl RuleStore {
    /// Loads every `*.json` document in `dir`. Non-JSON files are skipped;
    /// a document that fails to read or parse aborts the whole load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let mut entries = Vec::new();

        let listing = fs::read_dir(dir).map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        for item in listing {
            let item = item.map_err(|source| LoadError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = item.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let standard = stem.to_lowercase();

            let text = fs::read_to_string(&path).map_err(|source| LoadError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let doc: BTreeMap<String, RawEntry> =
                serde_json::from_str(&text).map_err(|source| LoadError::Parse {
                    path: path.clone(),
                    source,
                })?;

            for (citation, raw) in doc {
                entries.push(RuleEntry {
                    standard: standard.clone(),
                    citation,
                    condition: raw.condition,
                    description: raw.description,
                    severity: raw.severity,
                });
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// Builds a store from already-materialized entries, ordering them by
    /// (standard, citation) so lookups are reproducible regardless of the
    /// order the caller supplied.
    pub fn from_entries(mut entries: Vec<RuleEntry>) -> Self {
        entries.sort_by(|a, b| {
            (&a.standard, &a.citation).cmp(&(&b.standard, &b.citation))
        });

        let mut by_condition: HashMap<String, Vec<RuleEntry>> = HashMap::new();
        for entry in &entries {
            by_condition
                .entry(entry.condition.clone())
                .or_default()
                .push(entry.clone());
        }

        Self {
            entries,
            by_condition,
        }
    }

    /// Returns every entry matching `condition`, ordered by
    /// (standard, citation). Empty when nothing matches; not an error.
    pub fn lookup(&self, condition: &str) -> &[RuleEntry] {
        self.by_condition
            .get(condition)
            .map_or(&[], Vec::as_slice)
    }

    /// All entries in (standard, citation) order.
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Distinct standard names, in order.
    pub fn standards(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if names.last() != Some(&entry.standard.as_str()) {
                names.push(&entry.standard);
            }
        }
        names
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
