use std::collections::HashSet;

use crate::normalize::Normalizer;

/// The set of canonical labels that count as food.
#[derive(Debug, Clone, Default)]
pub struct FoodVocabulary {
    terms: HashSet<String>,
}

impl FoodVocabulary {
    /// Normalizes every term with the same `normalizer` used for incoming
    /// labels, so membership is tested normalized-to-normalized.
    pub fn build<I, S>(terms: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .filter_map(|term| {
                let normalized = normalizer.normalize(term.as_ref());
                if normalized.is_empty() {
                    tracing::warn!(term = term.as_ref(), "ignoring empty food term");
                    None
                } else {
                    Some(normalized)
                }
            })
            .collect();
        Self { terms }
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.terms.contains(canonical)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
