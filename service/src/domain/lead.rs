//! [`Lead`] definitions.

use std::{cmp::Ordering, str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::referral;

/// Lead assigned to a call-center user for follow-up.
#[derive(Clone, Debug)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// [`FullName`] of this [`Lead`].
    ///
    /// [`None`] if the registrant left it blank.
    pub full_name: Option<FullName>,

    /// [`MobileNumber`] of this [`Lead`].
    pub mobile_number: MobileNumber,

    /// [`referral::Code`] assigned to this [`Lead`].
    pub referral_code: referral::Code,

    /// [`referral::Code`] of the referrer who introduced this [`Lead`] into
    /// the network, if any.
    pub referred_by: Option<referral::Code>,

    /// [`CallStatus`] of this [`Lead`].
    pub call_status: CallStatus,

    /// [`DateTime`] when this [`Lead`] was registered.
    pub created_at: CreationDateTime,
}

/// ID of a [`Lead`].
///
/// Opaque and backend-owned: never minted or interpreted on this side.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Id(String);

/// Full name of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct FullName(String);

impl FullName {
    /// Creates a new [`FullName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FullName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for FullName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FullName`")
    }
}

/// Mobile number of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Creates a new [`MobileNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`MobileNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`MobileNumber`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d{10,14}$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for MobileNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `MobileNumber`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Lead`]."]
    enum Kind {
        #[doc = "A registered network agent."]
        Agent = 1,

        #[doc = "A registered customer."]
        Customer = 2,

        #[doc = "A core member of the referral network."]
        CoreMember = 3,

        #[doc = "A registered domain expert."]
        Expert = 4,
    }
}

impl Kind {
    /// Returns the generic human-readable label of a [`Lead`] of this
    /// [`Kind`], used when its [`FullName`] is absent.
    #[must_use]
    pub const fn generic_label(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Customer => "Customer",
            Self::CoreMember => "Core Member",
            Self::Expert => "Expert",
        }
    }
}

define_kind! {
    #[doc = "Status of a call-center call on a [`Lead`]."]
    enum CallStatus {
        #[doc = "The call was not performed yet."]
        Pending = 1,

        #[doc = "The call was performed."]
        Done = 2,
    }
}

/// Compares two [`Lead`]s by their work order.
///
/// [`CallStatus::Pending`] [`Lead`]s sort before [`CallStatus::Done`] ones,
/// and within the same [`CallStatus`] the more recently registered [`Lead`]
/// sorts first, keeping the newest pending work at the top.
#[must_use]
pub fn work_order(a: &Lead, b: &Lead) -> Ordering {
    a.call_status
        .u8()
        .cmp(&b.call_status.u8())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// [`DateTime`] when a [`Lead`] was registered.
pub type CreationDateTime = DateTimeOf<(Lead, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{work_order, CallStatus, FullName, Lead, MobileNumber};
    use crate::domain::referral;

    fn lead(id: &str, status: CallStatus, created_at: i64) -> Lead {
        Lead {
            id: id.into(),
            full_name: FullName::new(format!("Lead {id}")),
            mobile_number: MobileNumber::new("9876543210").unwrap(),
            referral_code: referral::Code::from(format!("WA{id}")),
            referred_by: None,
            call_status: status,
            created_at: DateTime::from_unix_timestamp(created_at)
                .unwrap()
                .coerce(),
        }
    }

    fn ids(leads: &[Lead]) -> Vec<String> {
        leads.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn pending_sorts_before_done_regardless_of_dates() {
        let mut leads = vec![
            lead("a", CallStatus::Done, 500),
            lead("b", CallStatus::Pending, 100),
        ];

        leads.sort_by(work_order);

        assert_eq!(ids(&leads), ["b", "a"]);
    }

    #[test]
    fn newer_sorts_first_within_the_same_status() {
        let mut leads = vec![
            lead("old", CallStatus::Pending, 100),
            lead("new", CallStatus::Pending, 900),
            lead("mid", CallStatus::Pending, 500),
        ];

        leads.sort_by(work_order);

        assert_eq!(ids(&leads), ["new", "mid", "old"]);
    }

    #[test]
    fn full_ordering_is_status_then_recency() {
        let mut leads = vec![
            lead("done-new", CallStatus::Done, 900),
            lead("pending-old", CallStatus::Pending, 100),
            lead("done-old", CallStatus::Done, 100),
            lead("pending-new", CallStatus::Pending, 900),
        ];

        leads.sort_by(work_order);

        assert_eq!(
            ids(&leads),
            ["pending-new", "pending-old", "done-new", "done-old"],
        );
    }

    #[test]
    fn mobile_number_check() {
        assert!(MobileNumber::new("9876543210").is_some());
        assert!(MobileNumber::new("+919876543210").is_some());

        assert!(MobileNumber::new("").is_none());
        assert!(MobileNumber::new("98765").is_none());
        assert!(MobileNumber::new("not a number").is_none());
    }
}
