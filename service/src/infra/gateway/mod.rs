//! [`Gateway`]-related implementations.

pub mod http;

use derive_more::{Display, Error as StdError, From};

pub use self::http::{Config, Http};

/// Backend gateway operation.
pub use common::Handler as Gateway;

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Http`] error.
    Http(http::Error),
}
