use std::sync::Arc;

use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::config::ImportConfig;
use crate::core::error::{AppError, Result};
use crate::features::packages::csv::{self, NormalizedBatch};
use crate::features::packages::dtos::{ImportPreviewDto, ImportResultDto};
use crate::features::packages::services::PackageService;

/// Service turning uploaded CSV exports into packages
pub struct ImportService {
    packages: Arc<PackageService>,
    config: ImportConfig,
    /// Inserts in flight at once during an import
    max_concurrent_inserts: usize,
}

impl ImportService {
    pub fn new(packages: Arc<PackageService>, config: ImportConfig, max_connections: u32) -> Self {
        Self {
            packages,
            config,
            max_concurrent_inserts: insert_concurrency(max_connections),
        }
    }

    /// Parse an upload without persisting anything
    pub fn preview(&self, bytes: &[u8]) -> Result<ImportPreviewDto> {
        let batch = self.normalize(bytes)?;

        Ok(ImportPreviewDto {
            format: batch.format,
            rows_read: batch.rows_read,
            rows_skipped: batch.rows_skipped,
            packages: batch.packages.into_iter().map(Into::into).collect(),
        })
    }

    /// Parse an upload and insert every candidate.
    ///
    /// A batch-fatal parse error inserts nothing. Otherwise each insert runs
    /// independently, at most `max_concurrent_inserts` at a time; failed
    /// inserts are reported and do not stop the rest.
    pub async fn import(&self, bytes: &[u8]) -> Result<ImportResultDto> {
        let batch = self.normalize(bytes)?;

        let results = run_bounded(&batch.packages, self.max_concurrent_inserts, |p| {
            self.packages.create(p)
        })
        .await;

        let mut ids = Vec::new();
        let mut errors = Vec::new();
        for (package, result) in batch.packages.iter().zip(results) {
            match result {
                Ok(created) => ids.push(created.id),
                Err(e) => {
                    tracing::warn!("Failed to import package '{}': {}", package.name, e);
                    errors.push(format!("{}: {}", package.name, insert_failure(&e)));
                }
            }
        }

        tracing::info!(
            "CSV import ({:?}): {} imported, {} failed, {} skipped",
            batch.format,
            ids.len(),
            errors.len(),
            batch.rows_skipped
        );

        Ok(ImportResultDto {
            format: batch.format,
            rows_read: batch.rows_read,
            rows_skipped: batch.rows_skipped,
            imported: ids.len(),
            failed: errors.len(),
            errors,
            ids,
        })
    }

    fn normalize(&self, bytes: &[u8]) -> Result<NormalizedBatch> {
        if bytes.len() > self.config.max_file_size {
            return Err(AppError::BadRequest(format!(
                "Ukuran file melebihi batas {}",
                human_size(self.config.max_file_size)
            )));
        }

        let text = csv::decode(bytes)?;
        let mut rng = StdRng::from_entropy();
        Ok(csv::normalize(text, &mut rng)?)
    }
}

/// Inserts allowed in flight: half the pool, at least one
fn insert_concurrency(max_connections: u32) -> usize {
    (max_connections as usize / 2).max(1)
}

/// Run `task` over `items` with at most `limit` futures in flight.
///
/// Results come back in the order of `items`.
fn run_bounded<'a, T, F, Fut>(
    items: &'a [T],
    limit: usize,
    task: F,
) -> impl std::future::Future<Output = Vec<Fut::Output>> + Send + 'a
where
    T: Sync,
    F: FnMut(&'a T) -> Fut + Send + 'a,
    Fut: std::future::Future + Send + 'a,
    Fut::Output: Send,
{
    stream::iter(items)
        .map(task)
        .buffered(limit.max(1))
        .collect::<Vec<_>>()
}

/// Byte count as shown to users ("5 MB", "512 KB", "100 byte")
fn human_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let value = bytes as f64;
    if value >= MIB {
        format!("{} MB", one_decimal(value / MIB))
    } else if value >= KIB {
        format!("{} KB", one_decimal(value / KIB))
    } else {
        format!("{} byte", bytes)
    }
}

fn one_decimal(value: f64) -> String {
    let text = format!("{:.1}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Message for a failed insert, without database internals
fn insert_failure(e: &AppError) -> String {
    match e {
        AppError::Database(_) => "gagal disimpan ke database".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(human_size(1024 * 1024 + 512 * 1024), "1.5 MB");
        assert_eq!(human_size(512 * 1024), "512 KB");
        assert_eq!(human_size(100), "100 byte");
    }

    #[test]
    fn test_insert_concurrency_leaves_room_in_pool() {
        assert_eq!(insert_concurrency(10), 5);
        assert_eq!(insert_concurrency(1), 1);
        assert_eq!(insert_concurrency(0), 1);
    }

    #[tokio::test]
    async fn test_run_bounded_caps_in_flight_and_keeps_order() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let items: Vec<usize> = (0..20).collect();

        let results = run_bounded(&items, 3, |&i| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                for _ in 0..(20 - i) {
                    tokio::task::yield_now().await;
                }
                in_flight.fetch_sub(1, Ordering::SeqCst);
                if i % 7 == 0 {
                    Err(format!("gagal {}", i))
                } else {
                    Ok(i)
                }
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(results.len(), 20);
        assert_eq!(results[0], Err("gagal 0".to_string()));
        assert_eq!(results[1], Ok(1));
        assert_eq!(results[7], Err("gagal 7".to_string()));
        assert_eq!(results[19], Ok(19));
    }
}
