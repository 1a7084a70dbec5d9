/// Names of auto-scrolling images, advanced one frame per form tick.
///
/// Owned by the form; images register when added and unregister when
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationRegistry {
    names: Vec<String>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `name` was already registered.
    pub fn register(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = AnimationRegistry::new();
        assert!(registry.register("logo"));
        assert!(!registry.register("logo"));
        assert!(registry.register("spinner"));
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["logo", "spinner"]);

        assert!(registry.unregister("logo"));
        assert!(!registry.unregister("logo"));
        assert!(!registry.contains("logo"));
    }
}
