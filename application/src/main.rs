use std::{future::IntoFuture as _, io, sync::OnceLock};

use application::{args, output, Args, Config, Service};
use futures::{future, TryFutureExt as _};
use service::{
    command::{
        CompleteLeadCall, LikeProperty, MarkLeadContacted, UnlikeProperty,
    },
    domain::{lead, property},
    infra::{gateway, storage::FileStorage},
    query,
    task::poll_leads::Snapshot,
    Query as _,
};
use tokio::sync::watch;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        gateway,
        storage,
        service,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let gateway = gateway::Http::new(gateway.into()).map_err(|e| {
        log::error!("failed to initialize HTTP gateway: {e}");
    })?;
    let storage = FileStorage::new(storage.dir);
    let service = service.try_into().map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    let (service, background) = Service::new(service, gateway, storage);

    match command {
        args::Command::Leads { kind } => {
            drop(background);
            let kind = lead::Kind::from(kind);
            let worklist = service
                .execute(query::leads::Assigned(kind))
                .await
                .map_err(|e| log::error!("failed to fetch leads: {e}"))?;
            let referrers = service
                .execute(query::referrers::Directory)
                .await
                .map_err(|e| log::error!("failed to fetch referrers: {e}"))?;
            print!("{}", output::worklist(kind, &worklist, &referrers));
        }

        args::Command::Contact { kind, id } => {
            drop(background);
            let kind = lead::Kind::from(kind);
            let contacted = service
                .execute(MarkLeadContacted {
                    kind,
                    id: lead::Id::from(id),
                })
                .await
                .map_err(|e| {
                    log::error!("failed to mark the lead as contacted: {e}");
                })?;
            println!("{} {kind} leads contacted", contacted.len());
        }

        args::Command::CompleteCall { id } => {
            drop(background);
            service
                .execute(CompleteLeadCall {
                    id: lead::Id::from(id.clone()),
                })
                .await
                .map_err(|e| log::error!("failed to complete the call: {e}"))?;
            println!("call for `{id}` completed");
        }

        args::Command::Properties => {
            drop(background);
            let listing = service
                .execute(query::properties::Listing)
                .await
                .map_err(|e| log::error!("failed to fetch properties: {e}"))?;
            print!("{}", output::listing(&listing));
        }

        args::Command::Like { id } => {
            drop(background);
            let liked = service
                .execute(LikeProperty {
                    id: property::Id::from(id),
                })
                .await
                .map_err(|e| log::error!("failed to like the property: {e}"))?;
            println!("{} properties liked", liked.len());
        }

        args::Command::Unlike { id } => {
            drop(background);
            let liked = service
                .execute(UnlikeProperty {
                    id: property::Id::from(id),
                })
                .await
                .map_err(|e| {
                    log::error!("failed to unlike the property: {e}");
                })?;
            println!("{} properties liked", liked.len());
        }

        args::Command::Watch => {
            future::try_join(
                background.into_future().map_err(|e| {
                    log::error!("background task failed: {e}");
                }),
                render_snapshots(service.snapshots()),
            )
            .await
            .map(drop)?;
        }
    }

    Ok(())
}

async fn render_snapshots(
    mut snapshots: watch::Receiver<Option<Snapshot>>,
) -> Result<(), ()> {
    loop {
        snapshots.changed().await.map_err(|e| {
            log::error!("snapshot channel closed: {e}");
        })?;

        let rendered =
            snapshots.borrow_and_update().as_ref().map(output::snapshot);
        if let Some(rendered) = rendered {
            print!("{rendered}");
        }
    }
}
