//! [`MarkLeadContacted`] [`Command`] definition.

use common::operations::{By, Load, Store};
use tracerr::Traced;

use crate::{
    domain::{lead, ContactedSet},
    infra::{storage, storage::Key, Storage},
    Service,
};

use super::Command;

/// [`Command`] marking a [`Lead`] as contacted on this device.
///
/// Marking is idempotent and local only: it never calls the backend, and
/// re-marking an already contacted [`Lead`] doesn't rewrite the stored set.
///
/// [`Lead`]: crate::domain::Lead
#[derive(Clone, Debug)]
pub struct MarkLeadContacted {
    /// [`lead::Kind`] whose contacted set the [`Lead`] belongs to.
    ///
    /// [`Lead`]: crate::domain::Lead
    pub kind: lead::Kind,

    /// [`lead::Id`] of the [`Lead`] to mark.
    ///
    /// [`Lead`]: crate::domain::Lead
    pub id: lead::Id,
}

impl<G, St> Command<MarkLeadContacted> for Service<G, St>
where
    St: Storage<
            Load<By<ContactedSet, Key>>,
            Ok = ContactedSet,
            Err = Traced<storage::Error>,
        > + Storage<
            Store<(Key, ContactedSet)>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = ContactedSet;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkLeadContacted,
    ) -> Result<Self::Ok, Self::Err> {
        let key = Key::ContactedLeads(cmd.kind);

        let mut contacted = self
            .storage()
            .execute(Load(By::<ContactedSet, _>::new(key)))
            .await
            .map_err(tracerr::wrap!())?;

        if contacted.mark(cmd.id) {
            self.storage()
                .execute(Store((key, contacted.clone())))
                .await
                .map_err(tracerr::wrap!())?;
        }

        Ok(contacted)
    }
}

/// Error of [`MarkLeadContacted`] [`Command`] execution.
pub type ExecutionError = storage::Error;
