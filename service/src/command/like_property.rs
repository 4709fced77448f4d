//! [`LikeProperty`] [`Command`] definition.

use common::operations::{By, Load, Store};
use tracerr::Traced;

use crate::{
    domain::{property, property::LikedSet},
    infra::{storage, storage::Key, Storage},
    Service,
};

use super::Command;

/// [`Command`] adding a [`Property`] to the device-local [`LikedSet`].
///
/// Liking an already liked [`Property`] is a no-op.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug)]
pub struct LikeProperty {
    /// [`property::Id`] of the [`Property`] to like.
    ///
    /// [`Property`]: crate::domain::Property
    pub id: property::Id,
}

impl<G, St> Command<LikeProperty> for Service<G, St>
where
    St: Storage<
            Load<By<LikedSet, Key>>,
            Ok = LikedSet,
            Err = Traced<storage::Error>,
        > + Storage<Store<(Key, LikedSet)>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = LikedSet;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LikeProperty) -> Result<Self::Ok, Self::Err> {
        let mut liked = self
            .storage()
            .execute(Load(By::<LikedSet, _>::new(Key::LikedProperties)))
            .await
            .map_err(tracerr::wrap!())?;

        if liked.like(cmd.id) {
            self.storage()
                .execute(Store((Key::LikedProperties, liked.clone())))
                .await
                .map_err(tracerr::wrap!())?;
        }

        Ok(liked)
    }
}

/// Error of [`LikeProperty`] [`Command`] execution.
pub type ExecutionError = storage::Error;
