//! [`Query`] collection related to [`Property`] listings.
//!
//! [`Property`]: crate::domain::Property

use common::{
    operations::{By, Load, Select},
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{property::LikedSet, Property},
    infra::{self, gateway, storage, storage::Key, Gateway, Storage},
    read, Service,
};

use super::Query;

/// [`Query`] of the tagged [`read::property::Listing`].
///
/// Aging tags are computed once against a single instant taken at execution
/// time, so the returned listing is internally consistent.
#[derive(Clone, Copy, Debug)]
pub struct Listing;

impl<G, St> Query<Listing> for Service<G, St>
where
    G: Gateway<
        Select<By<Vec<Property>, ()>>,
        Ok = Vec<Property>,
        Err = Traced<gateway::Error>,
    >,
    St: Storage<
        Load<By<LikedSet, Key>>,
        Ok = LikedSet,
        Err = Traced<storage::Error>,
    >,
{
    type Ok = read::property::Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Listing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let properties = self
            .gateway()
            .execute(Select(By::<Vec<Property>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let liked = self
            .storage()
            .execute(Load(By::<LikedSet, _>::new(Key::LikedProperties)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(read::property::Listing::compose(
            properties,
            DateTime::now(),
            &liked,
        ))
    }
}

/// Error of [`Listing`] [`Query`] execution.
pub type ExecutionError = infra::Error;
