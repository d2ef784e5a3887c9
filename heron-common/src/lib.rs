//! Common types shared across the Heron workspace.
//!
//! This crate defines the runtime configuration, the error taxonomy of the
//! interaction layer, and the observability initializer. It is intentionally
//! lightweight so that every crate can depend on it without pulling in the
//! WebDriver stack.
//!
//! # Overview
//!
//! - [`HeronConfig`]: tunables for waiting, motion pacing, and logging
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`HeronError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use heron_common::HeronConfig;
//!
//! let mut cfg = HeronConfig::default();
//! cfg.wait_timeout_ms = 5_000;
//! assert_eq!(cfg.drag_step_px, 10);
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Runtime tunables for the interaction layer.
///
/// Every component copies the values it needs out of this struct at
/// construction time; instances are plain values and are never shared
/// mutably between components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeronConfig {
    /// Endpoint of an already-running WebDriver service.
    pub webdriver_url: String,
    /// Default budget for resolving a locator before giving up.
    pub wait_timeout_ms: u64,
    /// Pause between presence checks while waiting on a locator.
    pub poll_interval_ms: u64,
    /// Emit one log event per completed interaction.
    pub log_actions: bool,
    /// Size of one incremental drag movement.
    pub drag_step_px: u32,
    /// Pause between drag increments.
    pub drag_step_delay_ms: u64,
    /// Size of one incremental scroll movement.
    pub scroll_step_px: u32,
    /// Lower bound of the randomized pause between scroll increments.
    pub scroll_delay_ms_min: u64,
    /// Upper bound of the randomized pause between scroll increments.
    pub scroll_delay_ms_max: u64,
    /// How far above the viewport top a scrolled-to element should land.
    pub viewport_buffer_px: i64,
    /// Settle pause before a direct jump-to-bottom scroll.
    pub bottom_settle_ms: u64,
}

impl Default for HeronConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout_ms: 20_000,
            poll_interval_ms: 250,
            log_actions: true,
            drag_step_px: 10,
            drag_step_delay_ms: 10,
            scroll_step_px: 100,
            scroll_delay_ms_min: 500,
            scroll_delay_ms_max: 1_000,
            viewport_buffer_px: 200,
            bottom_settle_ms: 1_000,
        }
    }
}

/// Error types used across the Heron system.
///
/// The wait gate and the interaction executor always surface failures to
/// the caller; logging a failure is never a substitute for returning it.
#[derive(thiserror::Error, Debug)]
pub enum HeronError {
    /// A locator did not resolve within its wait budget.
    #[error("element not found: {strategy}={value} after {waited_ms}ms")]
    NotFound {
        strategy: String,
        value: String,
        waited_ms: u64,
    },

    /// A native session action raised after its element had resolved.
    #[error("{action} failed on {target}: {source}")]
    ActionFailed {
        action: &'static str,
        target: String,
        #[source]
        source: anyhow::Error,
    },

    /// The requested attribute is absent on a resolved element.
    #[error("attribute '{attribute}' missing on {target}")]
    AttributeMissing { attribute: String, target: String },

    /// A sequence entry could not be executed as written. Aborts the
    /// remainder of the sequence.
    #[error("invalid sequence entry at step {index}: {reason}")]
    InvalidSequenceEntry { index: usize, reason: String },

    /// The underlying session (transport, driver) reported an error.
    #[error("session error: {0}")]
    Session(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`HeronError`].
pub type Result<T> = std::result::Result<T, HeronError>;
