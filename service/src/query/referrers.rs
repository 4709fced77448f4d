//! [`Query`] collection related to referrer resolution.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{lead, referral, Lead},
    infra::{gateway, Gateway},
    Service,
};

use super::Query;

/// [`Query`] of the [`referral::Directory`] built from every referrer pool.
///
/// Fetches customers, agents and core members once and indexes them by
/// referral code, so rendering a list resolves referrers without re-fetching
/// or re-scanning per row.
#[derive(Clone, Copy, Debug)]
pub struct Directory;

impl<G, St> Query<Directory> for Service<G, St>
where
    G: Gateway<
        Select<By<Vec<Lead>, lead::Kind>>,
        Ok = Vec<Lead>,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = referral::Directory;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Directory) -> Result<Self::Ok, Self::Err> {
        let fetch = |kind| {
            self.gateway().execute(Select(By::<Vec<Lead>, _>::new(kind)))
        };

        let customers = fetch(lead::Kind::Customer)
            .await
            .map_err(tracerr::wrap!())?;
        let agents =
            fetch(lead::Kind::Agent).await.map_err(tracerr::wrap!())?;
        let core_members = fetch(lead::Kind::CoreMember)
            .await
            .map_err(tracerr::wrap!())?;

        Ok(referral::Directory::new(&referral::Pools {
            customers: &customers,
            agents: &agents,
            core_members: &core_members,
        }))
    }
}

/// Error of [`Directory`] [`Query`] execution.
pub type ExecutionError = gateway::Error;
