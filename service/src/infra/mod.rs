//! Infrastructure of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod gateway;
pub mod storage;

use derive_more::{Display, Error as StdError, From};

pub use self::{gateway::Gateway, storage::Storage};

/// Error of interacting with the infrastructure of the [`Service`].
///
/// [`Service`]: crate::Service
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
