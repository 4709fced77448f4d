//! Referral network definitions.

use std::{borrow::Cow, collections::HashMap, fmt};

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

use super::{lead, Lead};

/// Referral code linking a registrant to the referrer who introduced them
/// into the network.
///
/// Opaque and backend-owned: never validated for format on this side, only
/// compared for equality.
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
pub struct Code(String);

impl Code {
    /// Reserved [`Code`] of the network root, which is not backed by any
    /// registered [`Lead`].
    pub const ROOT: &'static str = "WA0000000001";

    /// Indicates whether this [`Code`] is blank (empty or whitespace only).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Indicates whether this [`Code`] is the reserved network root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }
}

/// Lookup pools of [`Lead`]s a referrer is resolved against.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pools<'a> {
    /// Registered customers.
    pub customers: &'a [Lead],

    /// Registered agents.
    pub agents: &'a [Lead],

    /// Core members of the network.
    pub core_members: &'a [Lead],
}

impl<'a> Pools<'a> {
    /// Returns the pools in their resolution priority order, most specific
    /// first, tagged with the [`lead::Kind`] each pool holds.
    fn in_priority_order(&self) -> [(&'a [Lead], lead::Kind); 3] {
        [
            (self.customers, lead::Kind::Customer),
            (self.agents, lead::Kind::Agent),
            (self.core_members, lead::Kind::CoreMember),
        ]
    }
}

/// Resolved referrer of a [`Lead`].
///
/// Every lookup outcome has a defined display name, so rendering a referrer
/// can never fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Referrer {
    /// No referral [`Code`] was provided.
    NotProvided,

    /// Referrer is a registered [`Lead`] with a known [`lead::FullName`].
    Known(lead::FullName),

    /// Referrer is a registered [`Lead`] which left its name blank.
    Anonymous(lead::Kind),

    /// Referrer is the reserved network root.
    Root,

    /// No registered [`Lead`] carries the provided [`Code`].
    NotFound,
}

impl Referrer {
    /// Returns the human-readable display name of this [`Referrer`].
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            Self::NotProvided => Cow::Borrowed("N/A"),
            Self::Known(name) => Cow::Borrowed(name.as_ref()),
            Self::Anonymous(kind) => Cow::Borrowed(kind.generic_label()),
            Self::Root => Cow::Borrowed("Wealth Associate"),
            Self::NotFound => Cow::Borrowed("Referrer not found"),
        }
    }
}

impl fmt::Display for Referrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolves the provided referral [`Code`] against the provided [`Pools`].
///
/// First match wins: customers take priority over agents, agents over core
/// members. Pure and total, with a defined [`Referrer`] for every branch.
#[must_use]
pub fn resolve(code: Option<&Code>, pools: &Pools<'_>) -> Referrer {
    let Some(code) = code.filter(|c| !c.is_blank()) else {
        return Referrer::NotProvided;
    };

    for (pool, kind) in pools.in_priority_order() {
        if let Some(lead) = pool.iter().find(|l| &l.referral_code == code) {
            return lead
                .full_name
                .clone()
                .map_or(Referrer::Anonymous(kind), Referrer::Known);
        }
    }

    if code.is_root() {
        return Referrer::Root;
    }

    Referrer::NotFound
}

/// Code-keyed index of [`Referrer`]s, built once per fetch.
///
/// Rendering a list resolves one referrer per row; this index avoids
/// re-scanning the [`Pools`] for every row. Lookups agree with [`resolve`]
/// for every [`Code`].
#[derive(Clone, Debug, Default)]
pub struct Directory(HashMap<Code, Referrer>);

impl Directory {
    /// Builds a new [`Directory`] indexing every [`Code`] present in the
    /// provided [`Pools`].
    #[must_use]
    pub fn new(pools: &Pools<'_>) -> Self {
        let mut index = HashMap::new();
        for (pool, kind) in pools.in_priority_order() {
            for lead in pool {
                // Higher-priority pools win, so never overwrite.
                _ = index
                    .entry(lead.referral_code.clone())
                    .or_insert_with(|| {
                        lead.full_name
                            .clone()
                            .map_or(Referrer::Anonymous(kind), Referrer::Known)
                    });
            }
        }
        Self(index)
    }

    /// Looks up the [`Referrer`] carrying the provided [`Code`].
    #[must_use]
    pub fn lookup(&self, code: Option<&Code>) -> Referrer {
        let Some(code) = code.filter(|c| !c.is_blank()) else {
            return Referrer::NotProvided;
        };

        if let Some(referrer) = self.0.get(code) {
            return referrer.clone();
        }

        if code.is_root() {
            return Referrer::Root;
        }

        Referrer::NotFound
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{resolve, Code, Directory, Pools, Referrer};
    use crate::domain::{
        lead::{CallStatus, FullName, Kind, MobileNumber},
        Lead,
    };

    fn lead(code: &str, name: Option<&str>) -> Lead {
        Lead {
            id: code.into(),
            full_name: name.and_then(FullName::new),
            mobile_number: MobileNumber::new("9876543210").unwrap(),
            referral_code: code.into(),
            referred_by: None,
            call_status: CallStatus::Pending,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn blank_code_is_not_provided() {
        let pools = Pools::default();

        assert_eq!(resolve(None, &pools), Referrer::NotProvided);
        assert_eq!(
            resolve(Some(&Code::from("")), &pools),
            Referrer::NotProvided,
        );
        assert_eq!(Referrer::NotProvided.display_name(), "N/A");
    }

    #[test]
    fn root_code_resolves_without_any_pools() {
        let resolved = resolve(Some(&Code::from(Code::ROOT)), &Pools::default());

        assert_eq!(resolved, Referrer::Root);
        assert_eq!(resolved.display_name(), "Wealth Associate");
    }

    #[test]
    fn unmatched_code_is_not_found() {
        let resolved = resolve(Some(&Code::from("WA1234")), &Pools::default());

        assert_eq!(resolved, Referrer::NotFound);
        assert_eq!(resolved.display_name(), "Referrer not found");
    }

    #[test]
    fn customers_take_priority_over_agents() {
        let customers = [lead("WA7", Some("Asha"))];
        let agents = [lead("WA7", Some("Bala"))];
        let pools = Pools {
            customers: &customers,
            agents: &agents,
            ..Pools::default()
        };

        assert_eq!(
            resolve(Some(&Code::from("WA7")), &pools).display_name(),
            "Asha",
        );
    }

    #[test]
    fn registered_lead_takes_priority_over_the_root_sentinel() {
        let agents = [lead(Code::ROOT, Some("Root Desk"))];
        let pools = Pools {
            agents: &agents,
            ..Pools::default()
        };

        assert_eq!(
            resolve(Some(&Code::from(Code::ROOT)), &pools).display_name(),
            "Root Desk",
        );
    }

    #[test]
    fn blank_name_falls_back_to_the_generic_label() {
        let agents = [lead("WA8", None)];
        let core_members = [lead("WA9", None)];
        let pools = Pools {
            agents: &agents,
            core_members: &core_members,
            ..Pools::default()
        };

        assert_eq!(
            resolve(Some(&Code::from("WA8")), &pools),
            Referrer::Anonymous(Kind::Agent),
        );
        assert_eq!(
            resolve(Some(&Code::from("WA8")), &pools).display_name(),
            "Agent",
        );
        assert_eq!(
            resolve(Some(&Code::from("WA9")), &pools).display_name(),
            "Core Member",
        );
    }

    #[test]
    fn directory_agrees_with_resolve() {
        let customers = [lead("WA1", Some("Asha")), lead("WA2", None)];
        let agents = [lead("WA1", Some("Bala")), lead("WA3", Some("Charu"))];
        let core_members = [lead("WA4", None)];
        let pools = Pools {
            customers: &customers,
            agents: &agents,
            core_members: &core_members,
        };

        let directory = Directory::new(&pools);

        for raw in ["WA1", "WA2", "WA3", "WA4", "WA5", Code::ROOT, ""] {
            let code = Code::from(raw);
            assert_eq!(
                directory.lookup(Some(&code)),
                resolve(Some(&code), &pools),
                "mismatch for code `{raw}`",
            );
        }
        assert_eq!(directory.lookup(None), resolve(None, &pools));
    }
}
