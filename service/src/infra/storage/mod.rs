//! [`Storage`]-related implementations.

pub mod file;

use derive_more::{Display, Error as StdError, From};

use crate::domain::lead;

pub use self::file::FileStorage;

/// Device-local storage operation.
pub use common::Handler as Storage;

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`FileStorage`] error.
    File(file::Error),
}

/// Key of a device-locally persisted value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Key {
    /// Contacted [`Lead`] IDs of the given [`lead::Kind`].
    ///
    /// [`Lead`]: crate::domain::Lead
    ContactedLeads(lead::Kind),

    /// Liked [`Property`] IDs.
    ///
    /// [`Property`]: crate::domain::Property
    LikedProperties,
}

impl Key {
    /// Returns the stable name this [`Key`] is persisted under.
    ///
    /// The names are a compatibility surface: they match the device-local
    /// keys the backend's mobile clients already use.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ContactedLeads(lead::Kind::Agent) => "contactedAgents",
            Self::ContactedLeads(lead::Kind::Customer) => "contactedCustomers",
            Self::ContactedLeads(lead::Kind::CoreMember) => {
                "contactedCoreMembers"
            }
            Self::ContactedLeads(lead::Kind::Expert) => "contactedExperts",
            Self::LikedProperties => "likedProperties",
        }
    }
}
