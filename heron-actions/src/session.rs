use crate::locator::Locator;
use crate::motion::MotionStep;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cookie to install into the session.
///
/// There is no expiry field: cookies are installed as session cookies,
/// matching what a scripted login flow hands over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            secure: false,
        }
    }
}

/// Capability surface of a live browser session.
///
/// Supplied externally; the interaction layer only consumes it. The
/// session serializes commands over one connection, so it must be driven
/// by a single logical caller at a time.
#[async_trait]
pub trait Session: Send + Sync {
    async fn navigate(&self, url: &str) -> anyhow::Result<()>;

    /// Resolve `locator` to at most one element. A clean miss is
    /// `Ok(None)`; `Err` is reserved for transport failures.
    async fn find_element(&self, locator: &Locator) -> anyhow::Result<Option<Box<dyn Element>>>;

    async fn execute_script(&self, code: &str, args: Vec<Value>) -> anyhow::Result<Value>;

    async fn window_handles(&self) -> anyhow::Result<Vec<String>>;

    /// Switch the active window by its position in the live handle list.
    async fn switch_window(&self, index: usize) -> anyhow::Result<()>;

    async fn add_cookie(&self, cookie: &SessionCookie) -> anyhow::Result<()>;

    /// Current vertical scroll offset of the page, in pixels.
    async fn scroll_offset(&self) -> anyhow::Result<i64>;

    /// Current document height, in pixels. Lazily loading pages may grow
    /// between calls.
    async fn page_height(&self) -> anyhow::Result<i64>;
}

/// A resolved element.
///
/// Handles are scoped to the single interaction that resolved them and
/// are never kept across calls; navigation invalidates them.
#[async_trait]
pub trait Element: Send + Sync + std::fmt::Debug {
    async fn click(&self) -> anyhow::Result<()>;

    async fn double_click(&self) -> anyhow::Result<()>;

    async fn context_click(&self) -> anyhow::Result<()>;

    async fn send_keys(&self, text: &str) -> anyhow::Result<()>;

    /// Read an attribute. `Ok(None)` when the attribute is absent.
    async fn attribute(&self, name: &str) -> anyhow::Result<Option<String>>;

    /// Perform a horizontal drag as a single gesture following `steps`.
    /// Once started, the gesture runs to completion.
    async fn drag_horizontal(&self, steps: &[MotionStep]) -> anyhow::Result<()>;

    /// Vertical position of the element's top edge within the document.
    async fn vertical_position(&self) -> anyhow::Result<i64>;

    /// Switch the session's active context into this frame element.
    async fn enter_frame(self: Box<Self>) -> anyhow::Result<()>;
}
