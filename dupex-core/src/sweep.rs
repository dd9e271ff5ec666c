//! Concurrent deletion fan-out over the selected set.
//!
//! One delete request per selected variant, all in flight at once, joined
//! before anything else happens. The outcome reports every item rather than
//! collapsing the batch into a single error: a partial failure leaves the
//! failed variants selected so the sweep can be retried.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::DedupeError;
use crate::ports::MediaRemover;
use crate::store::SelectedMedia;
use dupex_model::{MovieKey, VariantId};

/// A deletion that did not go through, kept for reporting.
#[derive(Debug)]
pub struct SweepFailure {
    pub movie: MovieKey,
    pub variant: VariantId,
    pub error: DedupeError,
}

/// Result of one sweep over the selected set.
#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Variants the backend confirmed deleted
    pub deleted: Vec<SelectedMedia>,
    /// Variants whose delete request failed
    pub failed: Vec<SweepFailure>,
}

impl SweepOutcome {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    /// True when every attempted deletion went through. Holds vacuously for
    /// an empty sweep.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Bytes reclaimed by the confirmed deletions.
    pub fn reclaimed_bytes(&self) -> u64 {
        self.deleted.iter().map(SelectedMedia::size).sum()
    }
}

/// Delete every item concurrently and report per-item results.
pub async fn sweep(
    remover: &dyn MediaRemover,
    items: Vec<SelectedMedia>,
) -> SweepOutcome {
    if items.is_empty() {
        debug!("sweep requested with nothing selected");
        return SweepOutcome::default();
    }

    debug!("sweeping {} selected variants", items.len());

    let deletions = items.into_iter().map(|item| async move {
        let result = remover.delete_media(&item.movie, item.variant.id).await;
        (item, result)
    });

    let mut outcome = SweepOutcome::default();
    for (item, result) in join_all(deletions).await {
        match result {
            Ok(()) => outcome.deleted.push(item),
            Err(error) => {
                warn!(
                    "failed to delete variant {} of {}: {}",
                    item.variant.id, item.movie, error
                );
                outcome.failed.push(SweepFailure {
                    movie: item.movie,
                    variant: item.variant.id,
                    error,
                });
            }
        }
    }

    debug!(
        "sweep complete: {}/{} deleted",
        outcome.deleted.len(),
        outcome.attempted()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::{SweepOutcome, sweep};
    use crate::error::DedupeError;
    use crate::ports::MockMediaRemover;
    use crate::store::SelectedMedia;
    use dupex_model::{MediaPart, MediaVariant, MovieKey, VariantId};
    use std::path::PathBuf;

    fn selected(movie: &str, id: u64, size: u64) -> SelectedMedia {
        let mut variant = MediaVariant::new(VariantId::new(id));
        variant.width = Some(1920);
        variant.parts = vec![MediaPart::new(
            PathBuf::from(format!("/movies/{movie}/{id}.mkv")),
            size,
        )];
        SelectedMedia::new(MovieKey::new(movie.to_string()).unwrap(), variant)
    }

    #[tokio::test]
    async fn issues_one_delete_per_selected_item() {
        let mut remover = MockMediaRemover::new();
        remover
            .expect_delete_media()
            .times(3)
            .returning(|_, _| Ok(()));

        let items = vec![
            selected("a", 1, 100),
            selected("a", 2, 200),
            selected("b", 3, 300),
        ];
        let outcome = sweep(&remover, items).await;

        assert!(outcome.all_succeeded());
        assert_eq!(outcome.deleted.len(), 3);
        assert_eq!(outcome.reclaimed_bytes(), 600);
    }

    #[tokio::test]
    async fn failures_are_reported_per_item() {
        let mut remover = MockMediaRemover::new();
        remover.expect_delete_media().returning(|_, variant| {
            if variant == VariantId::new(2) {
                Err(DedupeError::Api {
                    status: 500,
                    message: "backend refused".to_string(),
                })
            } else {
                Ok(())
            }
        });

        let items = vec![
            selected("a", 1, 100),
            selected("a", 2, 200),
            selected("b", 3, 300),
        ];
        let outcome = sweep(&remover, items).await;

        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.deleted.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].variant, VariantId::new(2));
        assert_eq!(outcome.attempted(), 3);
    }

    #[tokio::test]
    async fn empty_sweep_succeeds_vacuously() {
        let remover = MockMediaRemover::new();

        let outcome = sweep(&remover, Vec::new()).await;

        assert!(outcome.all_succeeded());
        assert_eq!(outcome.attempted(), 0);
    }

    #[test]
    fn default_outcome_is_empty_success() {
        let outcome = SweepOutcome::default();
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.reclaimed_bytes(), 0);
    }
}
