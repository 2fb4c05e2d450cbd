pub mod credentials;
pub mod detector;
pub mod pipeline;
pub mod translator;

pub use credentials::{AuthError, Authenticator, Credentials, ServiceAccountKey};
pub use detector::{
    DetectionError, GoogleVisionDetector, LabelDetector, MockDetector, DEFAULT_MAX_LABELS,
    DEFAULT_VISION_ENDPOINT,
};
pub use pipeline::{DetectFoodError, FoodDetection, FoodDetector};
pub use translator::{
    GoogleTranslator, MockTranslator, TranslationError, Translator, DEFAULT_TRANSLATE_ENDPOINT,
};
