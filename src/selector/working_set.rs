/// Normalized form used for storage and comparison
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The user's in-progress list of ingredient names.
///
/// Names are stored lower-cased, in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingIngredientSet {
    names: Vec<String>,
}

impl WorkingIngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless an equal (case-insensitive) entry is already present.
    ///
    /// Returns whether the set changed. Blank names are ignored.
    pub fn add(&mut self, name: &str) -> bool {
        let name = normalize(name);
        if name.is_empty() || self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Remove the entry matching `name`. Absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = normalize(name);
        match self.names.iter().position(|n| *n == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
