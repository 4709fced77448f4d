//! Domain definitions.

pub mod contact;
pub mod lead;
pub mod property;
pub mod referral;

pub use self::{contact::ContactedSet, lead::Lead, property::Property};
