#![allow(dead_code)]
//! Shared test support: tracing setup and a scripted in-memory session.

use async_trait::async_trait;
use heron_actions::{Element, Locator, MotionStep, Session, SessionCookie};
use heron_common::observability::{LogConfig, LogFormat};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "heron-tests",
            emit_stderr: true,
            format: LogFormat::Text,
            default_filter: "debug",
            ..LogConfig::default()
        };

        heron_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Everything the mock observed, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(String),
    Find(String),
    Script(String),
    WindowHandles,
    SwitchWindow(usize),
    AddCookie(String),
    ScrollOffset,
    PageHeight,
    Click(String),
    DoubleClick(String),
    ContextClick(String),
    SendKeys { locator: String, text: String },
    Attribute { locator: String, name: String },
    Drag { locator: String, deltas: Vec<i64> },
    EnterFrame(String),
}

#[derive(Default)]
struct ElementSpec {
    misses_left: usize,
    attributes: HashMap<String, String>,
    y: i64,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    elements: HashMap<String, ElementSpec>,
    windows: Vec<String>,
    current_window: Option<usize>,
    heights: Vec<i64>,
    height_cursor: usize,
    scroll_offset: i64,
}

/// Scripted session double keyed by locator value. Elements either exist
/// (optionally after a number of missed lookups) or are absent forever.
#[derive(Clone, Default)]
pub struct MockSession {
    state: Arc<Mutex<State>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element resolvable on the first lookup.
    pub fn with_element(self, value: &str) -> Self {
        self.with_element_after(value, 0)
    }

    /// Element that misses `misses` lookups before resolving.
    pub fn with_element_after(self, value: &str, misses: usize) -> Self {
        self.state.lock().unwrap().elements.insert(
            value.to_string(),
            ElementSpec {
                misses_left: misses,
                ..Default::default()
            },
        );
        self
    }

    pub fn with_attribute(self, value: &str, name: &str, attr: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state
                .elements
                .entry(value.to_string())
                .or_default()
                .attributes
                .insert(name.to_string(), attr.to_string());
        }
        self
    }

    pub fn with_position(self, value: &str, y: i64) -> Self {
        self.state
            .lock()
            .unwrap()
            .elements
            .entry(value.to_string())
            .or_default()
            .y = y;
        self
    }

    pub fn with_windows(self, count: usize) -> Self {
        self.state.lock().unwrap().windows = (0..count).map(|i| format!("win-{i}")).collect();
        self
    }

    /// Successive `page_height` answers; the last one repeats forever.
    pub fn with_heights(self, heights: &[i64]) -> Self {
        self.state.lock().unwrap().heights = heights.to_vec();
        self
    }

    pub fn with_offset(self, offset: i64) -> Self {
        self.state.lock().unwrap().scroll_offset = offset;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn scroll_scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Script(code) => Some(code),
                _ => None,
            })
            .collect()
    }

    pub fn current_window(&self) -> Option<usize> {
        self.state.lock().unwrap().current_window
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl Session for MockSession {
    async fn navigate(&self, url: &str) -> anyhow::Result<()> {
        self.record(Call::Navigate(url.to_string()));
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> anyhow::Result<Option<Box<dyn Element>>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Find(locator.value.clone()));
        match state.elements.get_mut(&locator.value) {
            Some(spec) if spec.misses_left == 0 => Ok(Some(Box::new(MockElement {
                state: self.state.clone(),
                key: locator.value.clone(),
            }))),
            Some(spec) => {
                spec.misses_left -= 1;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn execute_script(&self, code: &str, _args: Vec<Value>) -> anyhow::Result<Value> {
        self.record(Call::Script(code.to_string()));
        Ok(Value::Null)
    }

    async fn window_handles(&self) -> anyhow::Result<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::WindowHandles);
        Ok(state.windows.clone())
    }

    async fn switch_window(&self, index: usize) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::SwitchWindow(index));
        state.current_window = Some(index);
        Ok(())
    }

    async fn add_cookie(&self, cookie: &SessionCookie) -> anyhow::Result<()> {
        self.record(Call::AddCookie(cookie.name.clone()));
        Ok(())
    }

    async fn scroll_offset(&self) -> anyhow::Result<i64> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ScrollOffset);
        Ok(state.scroll_offset)
    }

    async fn page_height(&self) -> anyhow::Result<i64> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::PageHeight);
        if state.heights.is_empty() {
            return Ok(0);
        }
        let index = state.height_cursor.min(state.heights.len() - 1);
        state.height_cursor += 1;
        Ok(state.heights[index])
    }
}

pub struct MockElement {
    state: Arc<Mutex<State>>,
    key: String,
}

impl std::fmt::Debug for MockElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockElement").field("key", &self.key).finish()
    }
}

impl MockElement {
    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl Element for MockElement {
    async fn click(&self) -> anyhow::Result<()> {
        self.record(Call::Click(self.key.clone()));
        Ok(())
    }

    async fn double_click(&self) -> anyhow::Result<()> {
        self.record(Call::DoubleClick(self.key.clone()));
        Ok(())
    }

    async fn context_click(&self) -> anyhow::Result<()> {
        self.record(Call::ContextClick(self.key.clone()));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> anyhow::Result<()> {
        self.record(Call::SendKeys {
            locator: self.key.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn attribute(&self, name: &str) -> anyhow::Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Attribute {
            locator: self.key.clone(),
            name: name.to_string(),
        });
        Ok(state
            .elements
            .get(&self.key)
            .and_then(|spec| spec.attributes.get(name).cloned()))
    }

    async fn drag_horizontal(&self, steps: &[MotionStep]) -> anyhow::Result<()> {
        self.record(Call::Drag {
            locator: self.key.clone(),
            deltas: steps.iter().map(|s| s.delta).collect(),
        });
        Ok(())
    }

    async fn vertical_position(&self) -> anyhow::Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.elements.get(&self.key).map(|spec| spec.y).unwrap_or(0))
    }

    async fn enter_frame(self: Box<Self>) -> anyhow::Result<()> {
        self.record(Call::EnterFrame(self.key.clone()));
        Ok(())
    }
}
