//! Read models of the [`Service`].
//!
//! [`Service`]: crate::Service

pub mod lead;
pub mod property;
