use std::collections::HashSet;

/// Tracks emails already accepted during one pipeline run.
///
/// Each run owns its own instance; nothing is shared between runs.
#[derive(Debug, Default, Clone)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing emails are never duplicates; the email gate rejects them instead
    pub fn is_duplicate(&self, email: Option<&str>) -> bool {
        email.is_some_and(|e| self.seen.contains(e))
    }

    /// Only called once a record has passed every other gate
    pub fn record(&mut self, email: &str) {
        self.seen.insert(email.to_string());
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_then_duplicate() {
        let mut dedup = Deduplicator::new();
        assert!(!dedup.is_duplicate(Some("a@b.com")));

        dedup.record("a@b.com");
        assert!(dedup.is_duplicate(Some("a@b.com")));
        assert!(!dedup.is_duplicate(Some("A@b.com")));
        assert!(!dedup.is_duplicate(None));
        assert_eq!(dedup.len(), 1);
    }
}
