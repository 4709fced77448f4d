//! [`CompleteLeadCall`] [`Command`] definition.

use common::operations::Update;
use tracerr::Traced;

use crate::{
    domain::lead::{self, CallStatus},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] reporting a finished call for a [`Lead`] to the backend.
///
/// The [`Lead`]'s [`CallStatus`] becomes [`CallStatus::Done`], which demotes
/// it below pending leads in subsequently fetched worklists.
///
/// [`Lead`]: crate::domain::Lead
#[derive(Clone, Debug)]
pub struct CompleteLeadCall {
    /// [`lead::Id`] of the [`Lead`] whose call is finished.
    ///
    /// [`Lead`]: crate::domain::Lead
    pub id: lead::Id,
}

impl<G, St> Command<CompleteLeadCall> for Service<G, St>
where
    G: Gateway<
        Update<(lead::Id, CallStatus)>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CompleteLeadCall,
    ) -> Result<Self::Ok, Self::Err> {
        self.gateway()
            .execute(Update((cmd.id, CallStatus::Done)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CompleteLeadCall`] [`Command`] execution.
pub type ExecutionError = gateway::Error;
