//! Concurrent tile fetch with per-tile timeout and cancellation.

use super::{FetchError, TileFailureReason, TileResults};
use crate::config::FetchConfig;
use crate::coord::{TileCoord, TileRange};
use crate::provider::TileSource;
use image::RgbaImage;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Fetches every tile of `range` concurrently.
///
/// One task is spawned per tile; tasks share nothing but the source and an
/// optional concurrency semaphore, and each returns its own outcome. Results
/// are handed back only after all tasks have finished.
///
/// Individual failures (provider errors, timeouts, undecodable images) are
/// recorded as absent tiles. The call fails only when:
/// - the token is cancelled, in which case outstanding tasks are aborted and
///   their results discarded ([`FetchError::Cancelled`]), or
/// - no tile at all could be fetched ([`FetchError::NoDataAvailable`]).
#[instrument(
    skip(source, config, cancellation_token),
    fields(zoom = range.zoom, tiles = range.tile_count())
)]
pub async fn fetch_tiles<S>(
    range: TileRange,
    source: Arc<S>,
    config: &FetchConfig,
    cancellation_token: CancellationToken,
) -> Result<TileResults, FetchError>
where
    S: TileSource,
{
    if cancellation_token.is_cancelled() {
        debug!("Tile fetch cancelled before starting");
        return Err(FetchError::Cancelled);
    }

    let start = Instant::now();
    let mut results = TileResults::new(range);
    let limiter = config
        .max_concurrent()
        .map(|permits| Arc::new(Semaphore::new(permits)));
    let timeout = config.timeout();

    let mut fetches = JoinSet::new();
    for tile in range.tiles() {
        let source = Arc::clone(&source);
        let limiter = limiter.clone();
        let token = cancellation_token.clone();

        fetches.spawn(async move {
            let outcome = fetch_one(tile, source, timeout, limiter, token).await;
            (tile, outcome)
        });
    }

    loop {
        tokio::select! {
            biased;

            _ = cancellation_token.cancelled() => {
                debug!(
                    completed = results.success_count() + results.failure_count(),
                    "Tile fetch cancelled - aborting remaining requests"
                );
                fetches.abort_all();
                return Err(FetchError::Cancelled);
            }

            joined = fetches.join_next() => {
                match joined {
                    Some(Ok((tile, Ok(image)))) => {
                        results.add_success(tile, image);
                    }
                    Some(Ok((tile, Err(reason)))) => {
                        warn!(tile = %tile, error = %reason, "Elevation tile unavailable");
                        results.add_failure(tile, reason);
                    }
                    Some(Err(join_err)) => {
                        // Coordinate is recovered after the loop
                        warn!(error = %join_err, "Tile fetch task panicked");
                    }
                    None => break,
                }
            }
        }
    }

    if results.success_count() + results.failure_count() < range.tile_count() {
        for tile in range.tiles() {
            if !results.is_recorded(&tile) {
                results.add_failure(
                    tile,
                    TileFailureReason::Task("fetch task panicked".to_string()),
                );
            }
        }
    }

    debug!(
        success = results.success_count(),
        failed = results.failure_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Tile fetch complete"
    );

    if results.success_count() == 0 {
        return Err(FetchError::NoDataAvailable {
            requested: range.tile_count(),
        });
    }

    Ok(results)
}

/// Fetches and decodes a single tile.
async fn fetch_one<S>(
    tile: TileCoord,
    source: Arc<S>,
    timeout: Duration,
    limiter: Option<Arc<Semaphore>>,
    cancellation_token: CancellationToken,
) -> Result<RgbaImage, TileFailureReason>
where
    S: TileSource,
{
    let _permit = match limiter {
        Some(limiter) => Some(
            limiter
                .acquire_owned()
                .await
                .map_err(|e| TileFailureReason::Task(e.to_string()))?,
        ),
        None => None,
    };

    if cancellation_token.is_cancelled() {
        return Err(TileFailureReason::Task("cancelled".to_string()));
    }

    let bytes = match tokio::time::timeout(timeout, source.fetch_tile(tile)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Err(TileFailureReason::Provider(e)),
        Err(_) => return Err(TileFailureReason::Timeout(timeout)),
    };

    tokio::task::spawn_blocking(move || decode_tile(&bytes))
        .await
        .map_err(|e| TileFailureReason::Task(e.to_string()))?
}

/// Decodes an encoded tile image into RGBA.
fn decode_tile(data: &[u8]) -> Result<RgbaImage, TileFailureReason> {
    image::load_from_memory(data)
        .map(|img| img.to_rgba8())
        .map_err(|e| TileFailureReason::Decode(e.to_string()))
}
