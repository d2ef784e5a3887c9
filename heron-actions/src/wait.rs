use crate::locator::Locator;
use crate::session::{Element, Session};
use heron_common::{HeronConfig, HeronError, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Blocks the calling flow until a locator resolves, bounded by a timeout.
///
/// Every mutating interaction resolves its locator through this gate
/// before acting; acting on an absent element is a failure, never a
/// silent no-op.
#[derive(Debug, Clone, Copy)]
pub struct WaitGate {
    poll_interval: Duration,
}

impl Default for WaitGate {
    fn default() -> Self {
        Self::from_config(&HeronConfig::default())
    }
}

impl WaitGate {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &HeronConfig) -> Self {
        Self::new(Duration::from_millis(config.poll_interval_ms))
    }

    /// Resolve `locator`, polling until `timeout` expires.
    ///
    /// The first check is immediate, so a zero timeout performs exactly
    /// one check. Failure is [`HeronError::NotFound`] carrying the
    /// locator and the waited duration; it lands no earlier than the
    /// timeout and no later than one poll interval past it.
    pub async fn await_element(
        &self,
        session: &dyn Session,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Box<dyn Element>> {
        let started = Instant::now();
        let deadline = started + timeout;

        loop {
            if let Some(element) = session.find_element(locator).await? {
                debug!(
                    target: "heron.wait",
                    %locator,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "element present"
                );
                return Ok(element);
            }

            let now = Instant::now();
            if now >= deadline {
                let waited_ms = started.elapsed().as_millis() as u64;
                warn!(target: "heron.wait", %locator, waited_ms, "element did not appear");
                return Err(HeronError::NotFound {
                    strategy: locator.strategy.to_string(),
                    value: locator.value.clone(),
                    waited_ms,
                });
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}
