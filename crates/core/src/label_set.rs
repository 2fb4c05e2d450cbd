use std::collections::HashSet;

/// Request-local set of accepted canonical labels, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and changes nothing) if the label is already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.seen.contains(&label) {
            return false;
        }
        self.seen.insert(label.clone());
        self.order.push(label);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = LabelSet::new();
        assert!(set.insert("pollo"));
        assert!(!set.insert("pollo"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["pollo"]);
    }

    #[test]
    fn keeps_first_insertion_order() {
        let mut set = LabelSet::new();
        for label in ["tomate", "queso", "tomate", "pan", "queso"] {
            set.insert(label);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["tomate", "queso", "pan"]);
    }

    #[test]
    fn new_set_is_empty() {
        let set = LabelSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
