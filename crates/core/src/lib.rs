pub mod display;
pub mod label_set;
pub mod lexicon;
pub mod normalize;
pub mod pipeline;
pub mod synonyms;
pub mod vocabulary;

pub use display::capitalize;
pub use label_set::LabelSet;
pub use lexicon::{Lexicon, LexiconError, DEFAULT_FOOD_TERMS, DEFAULT_SYNONYMS};
pub use normalize::Normalizer;
pub use pipeline::{FoodLabelPipeline, LabelReport};
pub use synonyms::{DuplicateAliasPolicy, SynonymEntry, SynonymError, SynonymTable};
pub use vocabulary::FoodVocabulary;
