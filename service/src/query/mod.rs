//! [`Query`] definition.

pub mod leads;
pub mod properties;
pub mod referrers;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;
