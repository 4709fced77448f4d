//! [`Query`] collection related to assigned [`Lead`]s.

use common::operations::{By, Load, Select};
use tracerr::Traced;

use crate::{
    domain::{lead, ContactedSet, Lead},
    infra::{self, gateway, storage, storage::Key, Gateway, Storage},
    read, Service,
};

use super::Query;

/// [`Query`] of the [`read::lead::Worklist`] assigned for the given
/// [`lead::Kind`].
///
/// The worklist comes back sorted by [`lead::work_order`] and partitioned by
/// the device-local [`ContactedSet`], so every consumer renders the same
/// ordering.
#[derive(Clone, Copy, Debug)]
pub struct Assigned(pub lead::Kind);

impl<G, St> Query<Assigned> for Service<G, St>
where
    G: Gateway<
        Select<By<Vec<Lead>, lead::Kind>>,
        Ok = Vec<Lead>,
        Err = Traced<gateway::Error>,
    >,
    St: Storage<
        Load<By<ContactedSet, Key>>,
        Ok = ContactedSet,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = read::lead::Worklist;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Assigned(kind): Assigned,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut leads = self
            .gateway()
            .execute(Select(By::<Vec<Lead>, _>::new(kind)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        leads.sort_by(lead::work_order);

        let contacted = self
            .storage()
            .execute(Load(By::<ContactedSet, _>::new(Key::ContactedLeads(
                kind,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(read::lead::Worklist::partition(leads, &contacted))
    }
}

/// Error of [`Assigned`] [`Query`] execution.
pub type ExecutionError = infra::Error;
