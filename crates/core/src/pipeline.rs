use crate::display::capitalize;
use crate::label_set::LabelSet;
use crate::lexicon::{Lexicon, LexiconError};
use crate::normalize::Normalizer;
use crate::synonyms::SynonymTable;
use crate::vocabulary::FoodVocabulary;

/// Outcome of one pipeline run, with the canonical forms that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelReport {
    /// Display-formatted food names in first-seen order.
    pub foods: Vec<String>,
    /// Canonical forms not recognized as food, in input order (may repeat).
    pub rejected: Vec<String>,
}

/// Normalizer → synonym resolver → food classifier → aggregator → formatter.
///
/// The tables are built once and only read afterwards, so a single instance
/// can be shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct FoodLabelPipeline {
    normalizer: Normalizer,
    synonyms: SynonymTable,
    vocabulary: FoodVocabulary,
}

impl FoodLabelPipeline {
    /// `synonyms` and `vocabulary` must have been built with `normalizer`.
    pub fn new(normalizer: Normalizer, synonyms: SynonymTable, vocabulary: FoodVocabulary) -> Self {
        Self { normalizer, synonyms, vocabulary }
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let normalizer = Normalizer::new().with_accent_folding(lexicon.fold_accents);
        let vocabulary = FoodVocabulary::build(&lexicon.foods, &normalizer);
        if vocabulary.is_empty() {
            return Err(LexiconError::EmptyVocabulary);
        }
        let synonyms =
            SynonymTable::build(&lexicon.synonyms, &normalizer, lexicon.on_duplicate_alias)?;

        tracing::info!(
            foods = vocabulary.len(),
            synonyms = synonyms.len(),
            fold_accents = lexicon.fold_accents,
            "food label pipeline ready"
        );
        Ok(Self::new(normalizer, synonyms, vocabulary))
    }

    pub fn canonicalize(&self, raw: &str) -> String {
        let normalized = self.normalizer.normalize(raw);
        self.synonyms.resolve(&normalized).to_string()
    }

    pub fn is_food(&self, canonical: &str) -> bool {
        self.vocabulary.contains(canonical)
    }

    /// Maps raw labels to unique, capitalized food names in first-seen order.
    pub fn run<I, S>(&self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.report(labels).foods
    }

    pub fn report<I, S>(&self, labels: I) -> LabelReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = LabelSet::new();
        let mut rejected = Vec::new();

        for raw in labels {
            let canonical = self.canonicalize(raw.as_ref());
            if self.is_food(&canonical) {
                accepted.insert(canonical);
            } else {
                rejected.push(canonical);
            }
        }

        LabelReport {
            foods: accepted.iter().map(capitalize).collect(),
            rejected,
        }
    }
}

impl Default for FoodLabelPipeline {
    /// Built from the empty lexicon: nothing is food.
    fn default() -> Self {
        Self::new(Normalizer::new(), SynonymTable::default(), FoodVocabulary::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonyms::{DuplicateAliasPolicy, SynonymEntry, SynonymError};

    fn default_pipeline() -> FoodLabelPipeline {
        FoodLabelPipeline::from_lexicon(&Lexicon::default()).unwrap()
    }

    fn pipeline(foods: &[&str], synonyms: &[(&str, &str)]) -> FoodLabelPipeline {
        let lexicon = Lexicon {
            fold_accents: false,
            on_duplicate_alias: DuplicateAliasPolicy::Reject,
            foods: foods.iter().map(|f| f.to_string()).collect(),
            synonyms: synonyms.iter().map(|(a, c)| SynonymEntry::new(*a, *c)).collect(),
        };
        FoodLabelPipeline::from_lexicon(&lexicon).unwrap()
    }

    #[test]
    fn chicken_variants_collapse() {
        let p = pipeline(&["pollo", "tomate", "queso"], &[("carne", "pollo")]);
        assert_eq!(p.run(["gato", "Pollo", "carne", "Pollos"]), vec!["Pollo"]);
    }

    #[test]
    fn first_seen_order_after_plural_stripping() {
        let p = pipeline(&["pollo", "tomate", "queso"], &[]);
        assert_eq!(p.run(["Tomates", "queso", "Tomate"]), vec!["Tomate", "Queso"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let p = default_pipeline();
        assert!(p.run(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn non_food_only_gives_empty_output() {
        let p = default_pipeline();
        assert!(p.run(["Gato", "Mesa", "Plato", "Comida rápida", "Ingrediente"]).is_empty());
    }

    #[test]
    fn output_is_unique_case_insensitively() {
        let p = default_pipeline();
        let out = p.run(["PAN", "pan", "Panes", "bollo", "Pan ", "Papa", "patatas", "PATATA"]);
        let lowered: Vec<String> = out.iter().map(|s| s.to_lowercase()).collect();
        let mut deduped = lowered.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(lowered.len(), deduped.len());
        assert_eq!(out, vec!["Pan", "Patata"]);
    }

    #[test]
    fn run_is_idempotent() {
        let p = default_pipeline();
        let input = ["Alimento", "Tomates", "Filete", "Bistec", "Queso", "Comida"];
        assert_eq!(p.run(input), p.run(input));
    }

    #[test]
    fn alias_to_non_food_is_rejected() {
        let p = pipeline(&["pollo"], &[("michi", "gato")]);
        let report = p.report(["michi", "pollo"]);
        assert_eq!(report.foods, vec!["Pollo"]);
        assert_eq!(report.rejected, vec!["gato"]);
    }

    #[test]
    fn report_lists_rejected_canonical_forms() {
        let p = pipeline(&["queso"], &[]);
        let report = p.report(["Mesas", "queso", "Mesa"]);
        assert_eq!(report.foods, vec!["Queso"]);
        assert_eq!(report.rejected, vec!["mesa", "mesa"]);
    }

    #[test]
    fn default_synonyms_resolve_to_vocabulary() {
        let p = default_pipeline();
        assert_eq!(
            p.run(["Papas fritas", "Filete", "Emparedado", "Bayas", "Fideos"]),
            vec!["Patata", "Bistec", "Sándwich", "Fresa", "Pasta"]
        );
    }

    #[test]
    fn multi_word_plural_alias_resolves() {
        let p = default_pipeline();
        assert_eq!(p.run(["Frutas cítricas", "Fruta cítrica"]), vec!["Naranja"]);
    }

    #[test]
    fn identity_override_in_lexicon_fails_construction() {
        let lexicon = Lexicon {
            synonyms: vec![SynonymEntry::new("carne", "pollo"), SynonymEntry::new("Carnes", "carne")],
            ..Lexicon::default()
        };
        assert!(matches!(
            FoodLabelPipeline::from_lexicon(&lexicon),
            Err(LexiconError::Synonym(SynonymError::DuplicateAlias { .. }))
        ));
    }

    #[test]
    fn accent_variants_stay_distinct_without_folding() {
        let p = pipeline(&["plátano"], &[]);
        assert_eq!(p.run(["platano"]), Vec::<String>::new());
        assert_eq!(p.run(["Plátanos"]), vec!["Plátano"]);
    }

    #[test]
    fn accent_folding_unifies_variants() {
        let lexicon = Lexicon {
            fold_accents: true,
            foods: vec!["plátano".into(), "té".into()],
            synonyms: vec![],
            ..Lexicon::default()
        };
        let p = FoodLabelPipeline::from_lexicon(&lexicon).unwrap();
        assert_eq!(p.run(["platano", "Plátano", "te"]), vec!["Platano", "Te"]);
    }

    #[test]
    fn duplicate_alias_in_lexicon_fails_construction() {
        let lexicon = Lexicon {
            synonyms: vec![SynonymEntry::new("baya", "fresa"), SynonymEntry::new("baya", "uva")],
            ..Lexicon::default()
        };
        assert!(matches!(
            FoodLabelPipeline::from_lexicon(&lexicon),
            Err(LexiconError::Synonym(_))
        ));
    }

    #[test]
    fn empty_vocabulary_fails_construction() {
        let lexicon = Lexicon { foods: vec![" ".into()], ..Lexicon::default() };
        assert!(matches!(
            FoodLabelPipeline::from_lexicon(&lexicon),
            Err(LexiconError::EmptyVocabulary)
        ));
    }

    #[test]
    fn default_pipeline_accepts_nothing() {
        assert!(FoodLabelPipeline::default().run(["pollo"]).is_empty());
    }
}
