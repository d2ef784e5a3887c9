//! Resilient element-interaction layer for browser-driven scrapers.
//!
//! Every interaction follows the same two-phase shape: the wait gate
//! resolves a locator against the live DOM (polling up to a bounded
//! timeout), then the executor performs the action on the resolved
//! element. Multi-step motion (drags, scrolls) is decomposed by the
//! motion planner into small paced increments so the gesture does not
//! read as a single synthetic jump.
//!
//! - [`wait::WaitGate`]: bounded polling resolve of a [`locator::Locator`]
//! - [`executor::Interactions`]: wait-then-act operations over one session
//! - [`motion`]: drag/scroll step decomposition and pacing
//! - [`sequence::Sequencer`]: ordered window/frame/callback steps
//! - [`session`]: the browser session capability consumed by all of the above
//!
//! The session is supplied externally (see `heron-drivers` for the
//! WebDriver-backed implementation) and must be driven by one logical
//! caller at a time; the layer itself holds no state across calls.
pub mod executor;
pub mod locator;
pub mod motion;
pub mod sequence;
pub mod session;
pub mod wait;

pub use executor::{Interactions, ScrollTarget};
pub use locator::{Locator, Strategy};
pub use motion::{MotionProfile, MotionStep};
pub use sequence::{SequenceAction, Sequencer};
pub use session::{Element, Session, SessionCookie};
pub use wait::WaitGate;
