use crate::locator::Locator;
use crate::session::Session;
use crate::wait::WaitGate;
use futures::future::BoxFuture;
use heron_common::{HeronConfig, HeronError, Result};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// A deferred step body run by [`Sequencer::run`].
pub type SequenceCallback = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// One step of an ordered interaction sequence.
pub enum SequenceAction {
    /// Switch the active window by position in the live handle list.
    Window(usize),
    /// Wait for a frame element and switch into it.
    Frame(Locator),
    /// Run an arbitrary caller-supplied step, identified by a label for
    /// the logs. A failure here is logged and the sequence continues.
    Call(&'static str, SequenceCallback),
}

impl SequenceAction {
    /// Wrap an async closure as a callback step.
    pub fn call<F, Fut>(label: &'static str, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: SequenceCallback = Box::new(move || Box::pin(f()));
        Self::Call(label, callback)
    }
}

impl fmt::Debug for SequenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceAction::Window(index) => write!(f, "Window({index})"),
            SequenceAction::Frame(locator) => write!(f, "Frame({locator})"),
            SequenceAction::Call(label, _) => write!(f, "Call({label})"),
        }
    }
}

/// Runs heterogeneous steps strictly in listed order over one session.
pub struct Sequencer {
    session: Arc<dyn Session>,
    gate: WaitGate,
    wait_timeout: Duration,
}

impl Sequencer {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self::with_config(session, &HeronConfig::default())
    }

    pub fn with_config(session: Arc<dyn Session>, config: &HeronConfig) -> Self {
        Self {
            session,
            gate: WaitGate::from_config(config),
            wait_timeout: Duration::from_millis(config.wait_timeout_ms),
        }
    }

    /// Execute `actions` in order, never reordering or overlapping them.
    ///
    /// Window and frame switches propagate their failures and abort the
    /// rest of the sequence. A failing [`SequenceAction::Call`] step is
    /// logged and skipped so one bad step cannot sink the steps after it;
    /// callers that need a callback failure to abort should return early
    /// from the callback chain themselves.
    pub async fn run(&self, actions: Vec<SequenceAction>) -> Result<()> {
        let total = actions.len();
        for (index, action) in actions.into_iter().enumerate() {
            match action {
                SequenceAction::Window(position) => {
                    let handles = self.session.window_handles().await?;
                    if position >= handles.len() {
                        return Err(HeronError::InvalidSequenceEntry {
                            index,
                            reason: format!(
                                "window index {position} out of range ({} open)",
                                handles.len()
                            ),
                        });
                    }
                    self.session.switch_window(position).await?;
                    info!(target: "heron.sequence", index, position, "switched window");
                }
                SequenceAction::Frame(locator) => {
                    let frame = self
                        .gate
                        .await_element(self.session.as_ref(), &locator, self.wait_timeout)
                        .await?;
                    frame.enter_frame().await?;
                    info!(target: "heron.sequence", index, %locator, "entered frame");
                }
                SequenceAction::Call(label, callback) => {
                    if let Err(err) = callback().await {
                        error!(
                            target: "heron.sequence",
                            index,
                            label,
                            error = %err,
                            "callback step failed; continuing"
                        );
                    }
                }
            }
        }
        info!(target: "heron.sequence", steps = total, "sequence complete");
        Ok(())
    }
}
