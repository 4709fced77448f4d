//! [`ContactedSet`] definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::lead;

/// Set of [`Lead`] IDs a call-center user has personally marked as contacted
/// on this device.
///
/// Persisted device-locally per [`lead::Kind`] and never synced to the
/// backend.
///
/// [`Lead`]: super::Lead
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ContactedSet(HashSet<lead::Id>);

impl ContactedSet {
    /// Indicates whether the given [`lead::Id`] is marked as contacted.
    #[must_use]
    pub fn contains(&self, id: &lead::Id) -> bool {
        self.0.contains(id)
    }

    /// Marks the given [`lead::Id`] as contacted.
    ///
    /// Idempotent: marking an already-contacted lead is a no-op beyond set
    /// union semantics. Returns whether this [`ContactedSet`] was changed.
    pub fn mark(&mut self, id: lead::Id) -> bool {
        self.0.insert(id)
    }

    /// Returns the number of contacted [`lead::Id`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no lead was marked as contacted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<lead::Id> for ContactedSet {
    fn from_iter<T: IntoIterator<Item = lead::Id>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod spec {
    use super::ContactedSet;

    #[test]
    fn marking_is_idempotent() {
        let mut contacted = ContactedSet::default();

        assert!(contacted.mark("l1".into()));
        let after_once = contacted.clone();

        assert!(!contacted.mark("l1".into()));
        assert_eq!(contacted, after_once);
        assert_eq!(contacted.len(), 1);
    }

    #[test]
    fn roundtrips_as_a_json_array() {
        let contacted = ["l1", "l2"]
            .into_iter()
            .map(Into::into)
            .collect::<ContactedSet>();

        let json = serde_json::to_string(&contacted).unwrap();
        let restored = serde_json::from_str::<ContactedSet>(&json).unwrap();

        assert_eq!(restored, contacted);
        assert!(restored.contains(&"l1".into()));
        assert!(restored.contains(&"l2".into()));
        assert!(!restored.contains(&"l3".into()));
    }
}
