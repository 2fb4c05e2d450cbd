use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::Normalizer;

/// What to do when the same alias is declared more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateAliasPolicy {
    /// Fail table construction.
    #[default]
    Reject,
    /// Keep the value declared last, logging the discarded one.
    LastWins,
}

impl std::str::FromStr for DuplicateAliasPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicateAliasPolicy::Reject),
            "last_wins" | "last-wins" => Ok(DuplicateAliasPolicy::LastWins),
            other => Err(format!("Unknown duplicate alias policy: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub alias: String,
    pub canonical: String,
}

impl SynonymEntry {
    pub fn new(alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self { alias: alias.into(), canonical: canonical.into() }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynonymError {
    #[error("Alias '{alias}' declared twice ('{first}' and '{second}')")]
    DuplicateAlias { alias: String, first: String, second: String },
    #[error("Alias '{alias}' resolves to '{target}', which is itself an alias")]
    Chained { alias: String, target: String },
    #[error("Synonym entry has an empty alias or canonical value")]
    EmptyEntry,
}

/// Normalized alias → canonical replacement. Resolution is exactly one hop.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl SynonymTable {
    /// Builds the table, normalizing both sides of every entry with `normalizer`.
    ///
    /// Entries whose alias and canonical value normalize to the same string
    /// still count as declarations for `policy`, and are dropped afterwards.
    /// A canonical value that is itself an alias is rejected so
    /// that resolving an already-canonical label is a no-op.
    pub fn build<'a, I>(
        entries: I,
        normalizer: &Normalizer,
        policy: DuplicateAliasPolicy,
    ) -> Result<Self, SynonymError>
    where
        I: IntoIterator<Item = &'a SynonymEntry>,
    {
        // Every declaration takes part in the duplicate check, identities included.
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for entry in entries {
            let alias = normalizer.normalize(&entry.alias);
            let canonical = normalizer.normalize(&entry.canonical);
            if alias.is_empty() || canonical.is_empty() {
                return Err(SynonymError::EmptyEntry);
            }

            match seen.get(&alias) {
                Some(previous) if *previous != canonical => match policy {
                    DuplicateAliasPolicy::Reject => {
                        return Err(SynonymError::DuplicateAlias {
                            alias,
                            first: previous.clone(),
                            second: canonical,
                        });
                    }
                    DuplicateAliasPolicy::LastWins => {
                        tracing::warn!(
                            %alias,
                            discarded = %previous,
                            kept = %canonical,
                            "duplicate synonym alias, keeping last"
                        );
                    }
                },
                Some(_) => {}
                None => order.push(alias.clone()),
            }
            seen.insert(alias, canonical);
        }

        let mut map: HashMap<String, String> = HashMap::new();
        let mut kept: Vec<String> = Vec::new();
        for alias in order {
            let Some(canonical) = seen.remove(&alias) else { continue };
            if alias == canonical {
                tracing::debug!(%alias, "skipping identity synonym");
                continue;
            }
            kept.push(alias.clone());
            map.insert(alias, canonical);
        }

        // Declaration order keeps the reported chain stable.
        for alias in &kept {
            if let Some(target) = map.get(alias) {
                if map.contains_key(target) {
                    return Err(SynonymError::Chained { alias: alias.clone(), target: target.clone() });
                }
            }
        }

        Ok(Self { entries: map })
    }

    /// Returns the canonical replacement for `normalized`, or the input itself.
    pub fn resolve<'a>(&'a self, normalized: &'a str) -> &'a str {
        self.entries.get(normalized).map(String::as_str).unwrap_or(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
