//! Fetch dispatch for the movie list view.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::instrument;
use watchlist_api::movies::MovieApi;

use super::state::{FetchOutcome, FetchTicket};

/// Runs the fetch described by `ticket` and pairs the result with its
/// sequence number.
#[instrument(skip_all, fields(seq = ticket.seq()))]
#[allow(clippy::module_name_repetitions)]
pub async fn fetch_current_page<A>(api: &A, ticket: FetchTicket) -> FetchOutcome
where
    A: MovieApi + Sync + ?Sized,
{
    let result = api.fetch_movies(ticket.filter()).await;
    FetchOutcome::new(ticket.seq(), result)
}

/// Spawns the fetch for `ticket`; the outcome is posted to `tx`.
///
/// A closed channel means the view is gone and the outcome is dropped.
#[allow(clippy::module_name_repetitions)]
pub fn spawn_fetch<A>(
    api: Arc<A>,
    ticket: FetchTicket,
    tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let outcome = fetch_current_page(api.as_ref(), ticket).await;
        if tx.send(outcome).is_err() {
            tracing::debug!("movie list closed before fetch completed");
        }
    })
}
