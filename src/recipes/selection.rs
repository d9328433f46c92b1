use std::collections::BTreeSet;

/// Item names picked for recipe generation. Ephemeral: built fresh for a
/// single generation call and dropped afterwards, matching the screen-local
/// selection state of the mobile app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of a name; returns whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Selected names in a stable order.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}
