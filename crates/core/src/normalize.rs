/// Turns free-text labels into the comparable form shared by the synonym
/// table, the food vocabulary and incoming labels.
///
/// Steps: lowercase, trim, optionally fold accents, strip one plural `s`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    fold_accents: bool,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `plátano` and `platano` as the same token.
    pub fn with_accent_folding(mut self, fold_accents: bool) -> Self {
        self.fold_accents = fold_accents;
        self
    }

    pub fn normalize(&self, label: &str) -> String {
        let lowered = label.to_lowercase();
        let trimmed = lowered.trim();
        let folded: String = if self.fold_accents {
            trimmed.chars().map(fold_accent).collect()
        } else {
            trimmed.to_string()
        };
        strip_plural(folded)
    }
}

/// Removes one trailing `s` when it follows a letter other than `s`.
///
/// The guard keeps the operation stable: the result never ends in a
/// strippable `s` again, so normalizing twice changes nothing.
fn strip_plural(mut word: String) -> String {
    let mut tail = word.chars().rev();
    if let (Some('s'), Some(prev)) = (tail.next(), tail.next()) {
        if prev.is_alphabetic() && prev != 's' {
            word.pop();
        }
    }
    word
}

// `ñ` is a separate letter in Spanish (año / ano), so it is left alone.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}
