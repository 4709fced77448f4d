//! Service contains the business logic of the application.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::error::Error;

use common::operations::{By, Start};
use tokio::sync::watch;

#[cfg(doc)]
use infra::{Gateway, Storage};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`task::PollLeads`] configuration.
    pub poll_leads: task::poll_leads::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<G, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Backend [`Gateway`] of this [`Service`].
    gateway: G,

    /// Device-local [`Storage`] of this [`Service`].
    storage: St,

    /// Receiver of [`task::poll_leads::Snapshot`]s produced by the
    /// [`task::PollLeads`] [`Task`].
    snapshots: watch::Receiver<Option<task::poll_leads::Snapshot>>,
}

impl<G, St> Service<G, St> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, gateway: G, storage: St) -> (Self, task::Background)
    where
        Self: Task<
                Start<By<task::PollLeads<Self>, task::poll_leads::StartArgs>>,
                Ok = (),
                Err: Error + 'static,
            > + Clone
            + 'static,
    {
        let (updates, snapshots) = watch::channel(None);
        let this = Service {
            config,
            gateway,
            storage,
            snapshots,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            let poll_leads = svc.config().poll_leads.clone();
            svc.execute(Start(By::new((poll_leads, updates)))).await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the backend [`Gateway`] of this [`Service`].
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the device-local [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Subscribes to [`task::poll_leads::Snapshot`]s produced by the
    /// [`task::PollLeads`] [`Task`].
    #[must_use]
    pub fn snapshots(
        &self,
    ) -> watch::Receiver<Option<task::poll_leads::Snapshot>> {
        self.snapshots.clone()
    }
}
