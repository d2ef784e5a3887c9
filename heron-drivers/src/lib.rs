//! WebDriver-backed implementation of the Heron session capability.
//!
//! This crate binds the session traits consumed by `heron-actions` to a
//! `fantoccini` client attached to an already-running WebDriver service
//! (chromedriver, geckodriver, a Selenium grid). Launching the browser
//! process and configuring its capabilities is the caller's concern.
//!
//! - [`webdriver::WebDriverSession`]: the session adapter
//!
//! ```no_run
//! use heron_actions::{Interactions, Locator, ScrollTarget};
//! use heron_drivers::WebDriverSession;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = WebDriverSession::connect("http://localhost:9515").await?;
//! let actions = Interactions::new(Arc::new(session));
//!
//! actions.navigate("https://example.com").await?;
//! actions.scroll(ScrollTarget::ToBottom, true).await?;
//! let handles = actions.click(&Locator::css("#next-page")).await?;
//! # let _ = handles;
//! # Ok(())
//! # }
//! ```
pub mod webdriver;

pub use webdriver::WebDriverSession;
