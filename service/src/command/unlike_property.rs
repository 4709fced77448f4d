//! [`UnlikeProperty`] [`Command`] definition.

use common::operations::{By, Load, Store};
use tracerr::Traced;

use crate::{
    domain::{property, property::LikedSet},
    infra::{storage, storage::Key, Storage},
    Service,
};

use super::Command;

/// [`Command`] removing a [`Property`] from the device-local [`LikedSet`].
///
/// Unliking a [`Property`] that was never liked is a no-op.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct UnlikeProperty {
    /// [`property::Id`] of the [`Property`] to unlike.
    ///
    /// [`Property`]: crate::domain::Property
    pub id: property::Id,
}

impl<G, St> Command<UnlikeProperty> for Service<G, St>
where
    St: Storage<
            Load<By<LikedSet, Key>>,
            Ok = LikedSet,
            Err = Traced<storage::Error>,
        > + Storage<Store<(Key, LikedSet)>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = LikedSet;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UnlikeProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let mut liked = self
            .storage()
            .execute(Load(By::<LikedSet, _>::new(Key::LikedProperties)))
            .await
            .map_err(tracerr::wrap!())?;

        if liked.unlike(&cmd.id) {
            self.storage()
                .execute(Store((Key::LikedProperties, liked.clone())))
                .await
                .map_err(tracerr::wrap!())?;
        }

        Ok(liked)
    }
}

/// Error of [`UnlikeProperty`] [`Command`] execution.
pub type ExecutionError = storage::Error;
