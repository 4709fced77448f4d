//! [`PollLeads`] [`Task`].

use std::{
    collections::HashMap,
    convert::Infallible,
    error::Error,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time,
};

use common::{
    operations::{By, Perform, Start},
    DateTime,
};
use futures::{stream::FuturesUnordered, StreamExt as _};
use tokio::{sync::watch, time::interval};
use tracerr::Traced;
use tracing as log;

use crate::{domain::lead, infra, query, read, Service};

use super::Task;

/// Configuration for [`PollLeads`] [`Task`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Interval between polls.
    pub interval: time::Duration,

    /// [`lead::Kind`]s whose worklists are polled.
    pub kinds: Vec<lead::Kind>,
}

/// Result of a single successful poll.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Sequence number of the poll this [`Snapshot`] was produced by.
    pub seq: u64,

    /// [`DateTime`] when the poll was issued.
    pub taken_at: DateTime,

    /// Polled [`read::lead::Worklist`]s, per [`lead::Kind`].
    pub worklists: HashMap<lead::Kind, read::lead::Worklist>,
}

/// Arguments for [`Start`]ing a [`PollLeads`] [`Task`].
pub type StartArgs = (Config, watch::Sender<Option<Snapshot>>);

/// [`Task`] for polling assigned lead worklists.
#[derive(Clone, Debug)]
pub struct PollLeads<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Sequencer`] guarding [`Snapshot`] publication.
    sequencer: Arc<Sequencer>,

    /// Channel the produced [`Snapshot`]s are published to.
    updates: watch::Sender<Option<Snapshot>>,

    /// [`Service`] instance.
    service: S,
}

impl<G, St> Task<Start<By<PollLeads<Self>, StartArgs>>> for Service<G, St>
where
    PollLeads<Service<G, St>>:
        Task<Perform<()>, Ok = (), Err: Error> + Clone + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<PollLeads<Self>, StartArgs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (config, updates) = by.into_inner();
        let task = PollLeads {
            config,
            sequencer: Arc::new(Sequencer::default()),
            updates,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        let mut in_flight = FuturesUnordered::new();
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // A new poll is launched without awaiting the previous
                    // one, so a slow response cannot delay a newer poll.
                    // Out-of-order completions are handled by the
                    // `Sequencer`.
                    let task = task.clone();
                    in_flight.push(async move {
                        task.execute(Perform(())).await
                    });
                }
                Some(res) = in_flight.next() => {
                    _ = res.map_err(|e| {
                        log::error!("`task::PollLeads` failed: {e}");
                    });
                }
            }
        }
    }
}

impl<G, St> Task<Perform<()>> for PollLeads<Service<G, St>>
where
    Service<G, St>: query::Query<
        query::leads::Assigned,
        Ok = read::lead::Worklist,
        Err = Traced<query::leads::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let seq = self.sequencer.issue();
        let taken_at = DateTime::now();

        let mut worklists = HashMap::with_capacity(self.config.kinds.len());
        for kind in self.config.kinds.iter().copied() {
            let worklist = self
                .service
                .execute(query::leads::Assigned(kind))
                .await
                .map_err(tracerr::wrap!())?;
            _ = worklists.insert(kind, worklist);
        }

        if self.sequencer.admit(seq) {
            _ = self.updates.send_replace(Some(Snapshot {
                seq,
                taken_at,
                worklists,
            }));
        } else {
            log::debug!("discarding stale poll response (seq: {seq})");
        }
        Ok(())
    }
}

/// Error of [`PollLeads`] execution.
pub type ExecutionError = Traced<infra::Error>;

/// Monotonic guard over poll responses.
///
/// Every poll takes a sequence number when it's issued. A response may be
/// applied only if no response with a higher number was applied before it,
/// so a poll completing late can never overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct Sequencer {
    /// Most recently issued sequence number.
    issued: AtomicU64,

    /// Highest sequence number applied so far.
    applied: AtomicU64,
}

impl Sequencer {
    /// Issues the next sequence number.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Admits the response carrying the provided sequence number, indicating
    /// whether it should be applied.
    pub fn admit(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::Relaxed) < seq
    }
}

#[cfg(test)]
mod sequencer_spec {
    use super::Sequencer;

    #[test]
    fn issues_monotonically_increasing_numbers() {
        let sequencer = Sequencer::default();

        assert_eq!(sequencer.issue(), 1);
        assert_eq!(sequencer.issue(), 2);
        assert_eq!(sequencer.issue(), 3);
    }

    #[test]
    fn admits_responses_arriving_in_order() {
        let sequencer = Sequencer::default();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(sequencer.admit(first));
        assert!(sequencer.admit(second));
    }

    #[test]
    fn rejects_response_overtaken_by_a_newer_one() {
        let sequencer = Sequencer::default();
        let slow = sequencer.issue();
        let fast = sequencer.issue();

        assert!(sequencer.admit(fast));
        assert!(!sequencer.admit(slow));
    }

    #[test]
    fn rejects_duplicate_response() {
        let sequencer = Sequencer::default();
        let seq = sequencer.issue();

        assert!(sequencer.admit(seq));
        assert!(!sequencer.admit(seq));
    }
}
