use anyhow::Context;
use async_trait::async_trait;
use fantoccini::actions::{
    InputSource, MouseActions, PointerAction, MOUSE_BUTTON_LEFT, MOUSE_BUTTON_RIGHT,
};
use fantoccini::cookies::Cookie;
use fantoccini::elements::Element as WireElement;
use fantoccini::{Client, ClientBuilder, Locator as WireLocator};
use heron_actions::{Element, Locator, MotionStep, Session, SessionCookie, Strategy};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// A [`Session`] over a `fantoccini` WebDriver client.
///
/// Attaches to a WebDriver service that is already running; this crate
/// never spawns or configures the browser process itself.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connect a fresh WebDriver session at `webdriver_url`.
    pub async fn connect(webdriver_url: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(webdriver_url)
            .with_context(|| format!("invalid WebDriver endpoint: {webdriver_url}"))?;
        let client = ClientBuilder::native()
            .connect(endpoint.as_str())
            .await
            .with_context(|| format!("could not reach WebDriver at {endpoint}"))?;
        debug!(target: "heron.driver", endpoint = %endpoint, "session established");
        Ok(Self { client })
    }

    /// Wrap an already-connected client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> anyhow::Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

/// A locator lowered to what the wire protocol natively supports.
///
/// `Name`, `ClassName`, and `TagName` have no direct WebDriver strategy,
/// so they become CSS selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Lowered {
    Css(String),
    Id(String),
    XPath(String),
    LinkText(String),
}

impl Lowered {
    fn as_wire(&self) -> WireLocator<'_> {
        match self {
            Lowered::Css(v) => WireLocator::Css(v),
            Lowered::Id(v) => WireLocator::Id(v),
            Lowered::XPath(v) => WireLocator::XPath(v),
            Lowered::LinkText(v) => WireLocator::LinkText(v),
        }
    }
}

fn lower(locator: &Locator) -> Lowered {
    match locator.strategy {
        Strategy::Css => Lowered::Css(locator.value.clone()),
        Strategy::Id => Lowered::Id(locator.value.clone()),
        Strategy::XPath => Lowered::XPath(locator.value.clone()),
        Strategy::LinkText => Lowered::LinkText(locator.value.clone()),
        Strategy::Name => Lowered::Css(format!("[name=\"{}\"]", css_escape(&locator.value))),
        Strategy::ClassName => Lowered::Css(format!(".{}", locator.value)),
        Strategy::TagName => Lowered::Css(locator.value.clone()),
    }
}

fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn numeric(value: &Value, what: &str) -> anyhow::Result<i64> {
    value
        .as_f64()
        .map(|v| v.round() as i64)
        .with_context(|| format!("{what} evaluated to a non-numeric value: {value}"))
}

#[async_trait]
impl Session for WebDriverSession {
    async fn navigate(&self, url: &str) -> anyhow::Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> anyhow::Result<Option<Box<dyn Element>>> {
        let lowered = lower(locator);
        match self.client.find(lowered.as_wire()).await {
            Ok(element) => Ok(Some(Box::new(WebDriverElement {
                client: self.client.clone(),
                element,
            }))),
            Err(err) if err.is_no_such_element() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn execute_script(&self, code: &str, args: Vec<Value>) -> anyhow::Result<Value> {
        Ok(self.client.execute(code, args).await?)
    }

    async fn window_handles(&self) -> anyhow::Result<Vec<String>> {
        let windows = self.client.windows().await?;
        Ok(windows.into_iter().map(String::from).collect())
    }

    async fn switch_window(&self, index: usize) -> anyhow::Result<()> {
        let mut windows = self.client.windows().await?;
        if index >= windows.len() {
            anyhow::bail!("window index {index} out of range ({} open)", windows.len());
        }
        self.client.switch_to_window(windows.remove(index)).await?;
        Ok(())
    }

    async fn add_cookie(&self, cookie: &SessionCookie) -> anyhow::Result<()> {
        let mut wire = Cookie::new(cookie.name.clone(), cookie.value.clone());
        if let Some(domain) = &cookie.domain {
            wire.set_domain(domain.clone());
        }
        if let Some(path) = &cookie.path {
            wire.set_path(path.clone());
        }
        wire.set_secure(cookie.secure);
        self.client.add_cookie(wire).await?;
        Ok(())
    }

    async fn scroll_offset(&self) -> anyhow::Result<i64> {
        let value = self
            .client
            .execute("return window.pageYOffset;", vec![])
            .await?;
        numeric(&value, "scroll offset")
    }

    async fn page_height(&self) -> anyhow::Result<i64> {
        // FIXME: some layouts report a taller document.documentElement than
        // document.body; take the max of the two once that case shows up in
        // a real target site.
        let value = self
            .client
            .execute("return document.body.scrollHeight;", vec![])
            .await?;
        numeric(&value, "page height")
    }
}

struct WebDriverElement {
    client: Client,
    element: WireElement,
}

impl std::fmt::Debug for WebDriverElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverElement")
            .field("element", &self.element)
            .finish()
    }
}

impl WebDriverElement {
    /// Pointer chain positioned on this element, ready for button actions.
    fn pointer(&self) -> MouseActions {
        MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element: self.element.clone(),
            duration: None,
            x: 0.0,
            y: 0.0,
        })
    }
}

#[async_trait]
impl Element for WebDriverElement {
    async fn click(&self) -> anyhow::Result<()> {
        self.element.click().await?;
        Ok(())
    }

    async fn double_click(&self) -> anyhow::Result<()> {
        let actions = self
            .pointer()
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            });
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    async fn context_click(&self) -> anyhow::Result<()> {
        let actions = self
            .pointer()
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_RIGHT,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_RIGHT,
            });
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> anyhow::Result<()> {
        self.element.send_keys(text).await?;
        Ok(())
    }

    async fn attribute(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.element.attr(name).await?)
    }

    async fn drag_horizontal(&self, steps: &[MotionStep]) -> anyhow::Result<()> {
        let mut actions = self.pointer().then(PointerAction::Down {
            button: MOUSE_BUTTON_LEFT,
        });
        for step in steps {
            actions = actions.then(PointerAction::MoveBy {
                duration: None,
                x: step.delta as f64,
                y: 0.0,
            });
            if !step.delay.is_zero() {
                actions = actions.then(PointerAction::Pause {
                    duration: step.delay,
                });
            }
        }
        let actions = actions.then(PointerAction::Up {
            button: MOUSE_BUTTON_LEFT,
        });
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    async fn vertical_position(&self) -> anyhow::Result<i64> {
        let (_, y, _, _) = self.element.rectangle().await?;
        Ok(y.round() as i64)
    }

    async fn enter_frame(self: Box<Self>) -> anyhow::Result<()> {
        self.element.enter_frame().await?;
        Ok(())
    }
}
