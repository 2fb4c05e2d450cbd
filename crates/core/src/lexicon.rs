use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::synonyms::{DuplicateAliasPolicy, SynonymEntry, SynonymError};

/// Food terms recognized out of the box (Spanish).
pub const DEFAULT_FOOD_TERMS: &[&str] = &[
    "manzana", "plátano", "banana", "hamburguesa", "zanahoria", "patata", "pastel",
    "sándwich", "pasta", "bistec", "sushi", "pan", "queso", "chocolate", "huevo",
    "pescado", "pollo", "tomate", "cebolla", "helado", "café", "té", "carne", "arroz",
    "sopa", "fresa", "naranja", "uva", "pizza", "leche", "arándano",
];

/// Common translation variants mapped onto a vocabulary term.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("papa", "patata"),
    ("papas fritas", "patata"),
    ("patatas fritas", "patata"),
    ("banano", "banana"),
    ("platano", "plátano"),
    ("filete", "bistec"),
    ("carne de res", "carne"),
    ("carne roja", "carne"),
    ("emparedado", "sándwich"),
    ("sandwich", "sándwich"),
    ("bocadillo", "sándwich"),
    ("tarta", "pastel"),
    ("torta", "pastel"),
    ("hamburguesa con queso", "hamburguesa"),
    ("fideos", "pasta"),
    ("espagueti", "pasta"),
    ("huevo frito", "huevo"),
    ("pez", "pescado"),
    ("gallina", "pollo"),
    ("ave de corral", "pollo"),
    ("caldo", "sopa"),
    ("baya", "fresa"),
    ("jitomate", "tomate"),
    ("bollo", "pan"),
    ("cafe", "café"),
    ("fruta cítrica", "naranja"),
    // Plural stripping only touches the last word.
    ("frutas cítricas", "naranja"),
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse lexicon TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid synonym table: {0}")]
    Synonym(#[from] SynonymError),
    #[error("Lexicon defines no food terms")]
    EmptyVocabulary,
}

/// Startup configuration for the label pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lexicon {
    /// Compare labels with accents folded. Output then shows the folded
    /// spelling too (`Platano`, not `Plátano`).
    #[serde(default)]
    pub fold_accents: bool,
    #[serde(default)]
    pub on_duplicate_alias: DuplicateAliasPolicy,
    pub foods: Vec<String>,
    /// Kept as a list rather than a table so repeated aliases survive parsing
    /// and reach the duplicate policy.
    #[serde(default)]
    pub synonyms: Vec<SynonymEntry>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            fold_accents: false,
            on_duplicate_alias: DuplicateAliasPolicy::Reject,
            foods: DEFAULT_FOOD_TERMS.iter().map(|t| t.to_string()).collect(),
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(alias, canonical)| SynonymEntry::new(*alias, *canonical))
                .collect(),
        }
    }
}

impl Lexicon {
    pub fn from_toml(content: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = toml::from_str(content)?;
        if lexicon.foods.iter().all(|f| f.trim().is_empty()) {
            return Err(LexiconError::EmptyVocabulary);
        }
        Ok(lexicon)
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_lexicon() {
        let lexicon = Lexicon::from_toml(
            r#"
            fold_accents = true
            on_duplicate_alias = "last_wins"
            foods = ["pollo", "tomate"]

            [[synonyms]]
            alias = "carne"
            canonical = "pollo"

            [[synonyms]]
            alias = "carne"
            canonical = "tomate"
            "#,
        )
        .unwrap();
        assert!(lexicon.fold_accents);
        assert_eq!(lexicon.on_duplicate_alias, DuplicateAliasPolicy::LastWins);
        assert_eq!(lexicon.foods, vec!["pollo", "tomate"]);
        assert_eq!(lexicon.synonyms.len(), 2);
    }

    #[test]
    fn optional_fields_default() {
        let lexicon = Lexicon::from_toml(r#"foods = ["pan"]"#).unwrap();
        assert!(!lexicon.fold_accents);
        assert_eq!(lexicon.on_duplicate_alias, DuplicateAliasPolicy::Reject);
        assert!(lexicon.synonyms.is_empty());
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        assert!(matches!(
            Lexicon::from_toml("foods = []"),
            Err(LexiconError::EmptyVocabulary)
        ));
        assert!(matches!(
            Lexicon::from_toml(r#"foods = ["  "]"#),
            Err(LexiconError::EmptyVocabulary)
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(Lexicon::from_toml("foods = "), Err(LexiconError::Parse(_))));
        assert!(matches!(
            Lexicon::from_toml(r#"foods = ["pan"]
on_duplicate_alias = "first_wins""#),
            Err(LexiconError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "foods = [\"queso\"]\n").unwrap();

        let lexicon = Lexicon::load(&path).unwrap();
        assert_eq!(lexicon.foods, vec!["queso"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Lexicon::load(Path::new("/nonexistent/patata/lexicon.toml")).unwrap_err();
        assert!(matches!(err, LexiconError::Io(_)));
    }

    #[test]
    fn bundled_sample_parses() {
        let lexicon =
            Lexicon::from_toml(include_str!("../../../lexicon.example.toml")).unwrap();
        assert_eq!(lexicon.foods.len(), 26);
        assert_eq!(lexicon.synonyms[0], SynonymEntry::new("papa", "patata"));
    }

    #[test]
    fn default_lexicon_has_core_terms() {
        let lexicon = Lexicon::default();
        for term in ["manzana", "pollo", "sopa", "té", "café"] {
            assert!(lexicon.foods.iter().any(|f| f == term), "missing {term}");
        }
    }
}
