//! Random sampling through the site's random-article endpoint

use crate::config::{SamplingConfig, SiteConfig};
use crate::extract::FieldExtractor;
use crate::record::RecordStore;
use crate::session::{PageLoader, Pacer};
use crate::Result;

/// Why a sampling run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStop {
    /// The requested number of records was collected
    Complete,

    /// Too many attempts failed in a row
    ConsecutiveFailures,

    /// The total attempt budget was spent
    AttemptBudget,
}

/// Result of one sampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub requested: usize,
    pub collected: usize,
    pub attempts: usize,
    pub stop: SampleStop,
}

impl SampleOutcome {
    pub fn is_complete(&self) -> bool {
        self.stop == SampleStop::Complete
    }
}

/// Collects records from randomly chosen articles
///
/// Each attempt loads the random endpoint once and extracts one record. The
/// run ends after `count` successes, or earlier when the retry bounds in
/// [`SamplingConfig`] are hit.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    site: SiteConfig,
    sampling: SamplingConfig,
    extractor: FieldExtractor,
    pacer: Pacer,
}

impl RandomSampler {
    pub fn new(
        site: SiteConfig,
        sampling: SamplingConfig,
        extractor: FieldExtractor,
        pacer: Pacer,
    ) -> Self {
        Self {
            site,
            sampling,
            extractor,
            pacer,
        }
    }

    pub async fn run<L>(
        &self,
        loader: &mut L,
        store: &mut RecordStore,
        count: usize,
    ) -> Result<SampleOutcome>
    where
        L: PageLoader + ?Sized,
    {
        let endpoint = self.site.url_for(&self.site.random_page)?;
        let max_attempts = count.saturating_mul(self.sampling.max_attempts_per_sample as usize);

        let mut outcome = SampleOutcome {
            requested: count,
            collected: 0,
            attempts: 0,
            stop: SampleStop::Complete,
        };
        let mut consecutive_failures = 0u32;

        while outcome.collected < count {
            if consecutive_failures >= self.sampling.max_consecutive_failures {
                outcome.stop = SampleStop::ConsecutiveFailures;
                break;
            }
            if outcome.attempts >= max_attempts {
                outcome.stop = SampleStop::AttemptBudget;
                break;
            }

            outcome.attempts += 1;
            if self.sample_once(loader, store, endpoint.as_str()).await {
                outcome.collected += 1;
                consecutive_failures = 0;
            } else {
                consecutive_failures += 1;
            }

            self.pacer.pause().await;
        }

        if outcome.is_complete() {
            tracing::info!("Collected {} random articles", outcome.collected);
        } else {
            tracing::warn!(
                "Random sampling stopped early ({:?}): {} of {} collected in {} attempts",
                outcome.stop,
                outcome.collected,
                count,
                outcome.attempts
            );
        }
        Ok(outcome)
    }

    async fn sample_once<L>(&self, loader: &mut L, store: &mut RecordStore, endpoint: &str) -> bool
    where
        L: PageLoader + ?Sized,
    {
        if let Err(e) = loader.load(endpoint).await {
            tracing::warn!("Random sample failed: {}", e);
            return false;
        }

        match loader.document() {
            Ok(document) => self.extractor.extract_into(&document, store).is_some(),
            Err(e) => {
                tracing::warn!("Random sample unreadable: {}", e);
                false
            }
        }
    }
}
