//! Fixed-delay pacing between remote interactions

use std::time::Duration;

/// A fixed pause applied after navigation or between samples
///
/// These pauses are not retries; they only space requests out and give
/// dynamic content time to settle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::fixed(Duration::from_millis(millis))
    }

    /// A pacer that never waits
    pub fn none() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Pausing for {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_none_does_not_wait() {
        let start = Instant::now();
        Pacer::none().pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_fixed_waits_at_least_delay() {
        let pacer = Pacer::from_millis(30);
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(pacer.delay(), Duration::from_millis(30));
    }
}
