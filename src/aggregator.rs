use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::FetchError;
use crate::model::{DrawResult, FrequencyTable};
use crate::remote::DrawSource;

/// Fetch draws 1..=max_draw with at most `concurrency` requests in flight and
/// count their main numbers. Draws that fail to fetch or parse are skipped.
/// The table does not depend on completion order.
pub async fn aggregate(
    source: Arc<dyn DrawSource>,
    max_draw: u32,
    concurrency: usize,
) -> anyhow::Result<FrequencyTable> {
    let start = Instant::now();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for draw_no in 1..=max_draw {
        let source = source.clone();
        let sem = semaphore.clone();
        tasks.spawn(async move {
            let _permit = sem.acquire_owned().await.ok()?;
            let draw = fetch_or_skip(source.as_ref(), draw_no).await?;
            let mut partial = FrequencyTable::new();
            partial.record(&draw);
            Some(partial)
        });
    }

    // summing is commutative, so join order does not matter
    let mut table = FrequencyTable::new();
    let mut skipped = 0u32;
    while let Some(joined) = tasks.join_next().await {
        match joined.context("draw fetch task panicked")? {
            Some(partial) => table.merge(&partial),
            None => skipped += 1,
        }
    }

    tracing::info!(
        max_draw,
        parsed = table.draws(),
        skipped,
        secs = start.elapsed().as_secs_f64(),
        "aggregate: done"
    );
    Ok(table)
}

async fn fetch_or_skip(source: &dyn DrawSource, draw_no: u32) -> Option<DrawResult> {
    match source.fetch_draw(draw_no).await {
        Ok(draw) => Some(draw),
        Err(FetchError::NotFound(_)) => {
            tracing::debug!(draw_no, "aggregate: no data, skipping");
            None
        }
        Err(e) => {
            tracing::warn!(draw_no, error = %e, "aggregate: fetch failed, skipping");
            None
        }
    }
}
