//! Background [`Task`]s definitions.

mod background;
pub mod poll_leads;

pub use common::Handler as Task;

pub use self::{background::Background, poll_leads::PollLeads};
