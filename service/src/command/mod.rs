//! [`Command`] definition.

mod complete_lead_call;
mod like_property;
mod mark_lead_contacted;
mod unlike_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    complete_lead_call::CompleteLeadCall, like_property::LikeProperty,
    mark_lead_contacted::MarkLeadContacted, unlike_property::UnlikeProperty,
};
