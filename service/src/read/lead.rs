//! [`Lead`] read model definitions.
//!
//! [`Lead`]: crate::domain::Lead

use crate::domain::{ContactedSet, Lead};

/// Worklist of assigned [`Lead`]s, split by the device-local
/// [`ContactedSet`].
#[derive(Clone, Debug, Default)]
pub struct Worklist {
    /// [`Lead`]s not contacted from this device yet.
    pub pending: Vec<Lead>,

    /// [`Lead`]s already contacted from this device.
    pub contacted: Vec<Lead>,
}

impl Worklist {
    /// Partitions the provided [`Lead`]s into a [`Worklist`] by the provided
    /// [`ContactedSet`].
    ///
    /// Total: every lead lands in exactly one of the two partitions, and the
    /// relative order of the input is preserved within each.
    #[must_use]
    pub fn partition(leads: Vec<Lead>, contacted: &ContactedSet) -> Self {
        let (contacted, pending) = leads
            .into_iter()
            .partition(|lead| contacted.contains(&lead.id));
        Self { pending, contacted }
    }

    /// Returns the total number of [`Lead`]s in this [`Worklist`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.contacted.len()
    }

    /// Indicates whether this [`Worklist`] holds no [`Lead`]s at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.contacted.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::Worklist;
    use crate::domain::{
        lead::{CallStatus, FullName, MobileNumber},
        ContactedSet, Lead,
    };

    fn lead(id: &str) -> Lead {
        Lead {
            id: id.into(),
            full_name: FullName::new(format!("Lead {id}")),
            mobile_number: MobileNumber::new("9876543210").unwrap(),
            referral_code: format!("WA{id}").into(),
            referred_by: None,
            call_status: CallStatus::Pending,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    fn contacted(ids: &[&str]) -> ContactedSet {
        ids.iter().copied().map(Into::into).collect()
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let leads = vec![lead("a"), lead("b"), lead("c")];

        let worklist =
            Worklist::partition(leads.clone(), &contacted(&["b"]));

        assert_eq!(worklist.len(), leads.len());
        assert_eq!(worklist.pending.len(), 2);
        assert_eq!(worklist.contacted.len(), 1);
        for lead in &worklist.pending {
            assert!(!worklist.contacted.iter().any(|c| c.id == lead.id));
        }
    }

    #[test]
    fn partition_preserves_input_order() {
        let leads = vec![lead("a"), lead("b"), lead("c"), lead("d")];

        let worklist =
            Worklist::partition(leads, &contacted(&["b", "d"]));

        let pending = worklist
            .pending
            .iter()
            .map(|l| l.id.to_string())
            .collect::<Vec<_>>();
        let done = worklist
            .contacted
            .iter()
            .map(|l| l.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(pending, ["a", "c"]);
        assert_eq!(done, ["b", "d"]);
    }

    #[test]
    fn empty_and_full_contacted_sets_are_edge_partitions() {
        let leads = vec![lead("a"), lead("b")];

        let none = Worklist::partition(leads.clone(), &contacted(&[]));
        assert_eq!(none.pending.len(), 2);
        assert!(none.contacted.is_empty());

        let all = Worklist::partition(leads, &contacted(&["a", "b"]));
        assert!(all.pending.is_empty());
        assert_eq!(all.contacted.len(), 2);
    }

    #[test]
    fn empty_input_partitions_to_an_empty_worklist() {
        let worklist = Worklist::partition(vec![], &contacted(&["a"]));

        assert!(worklist.is_empty());
        assert_eq!(worklist.len(), 0);
    }
}
