use crate::locator::Locator;
use crate::motion::{plan_drag, plan_scroll, MotionProfile, MotionStep};
use crate::session::{Element, Session, SessionCookie};
use crate::wait::WaitGate;
use heron_common::{HeronConfig, HeronError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Where a scroll should end up. The three modes are mutually exclusive.
#[derive(Debug, Clone)]
pub enum ScrollTarget {
    /// Scroll down by a relative pixel amount. Zero or negative amounts
    /// are a no-op that touches the session not at all.
    ByPixels(i64),
    /// Scroll until the element sits a viewport buffer below the top.
    ToElement(Locator),
    /// Scroll to the bottom of the page, re-measuring while the page
    /// lazily grows.
    ToBottom,
}

/// Wait-then-act interaction surface over a single browser session.
///
/// Every operation resolves its locator through the [`WaitGate`] before
/// acting and surfaces failures to the caller; see [`HeronError`] for the
/// taxonomy. The session must be driven by one logical caller at a time.
pub struct Interactions {
    session: Arc<dyn Session>,
    gate: WaitGate,
    profile: MotionProfile,
    wait_timeout: Duration,
    log_actions: bool,
}

impl Interactions {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self::with_config(session, &HeronConfig::default())
    }

    pub fn with_config(session: Arc<dyn Session>, config: &HeronConfig) -> Self {
        Self {
            session,
            gate: WaitGate::from_config(config),
            profile: MotionProfile::from_config(config),
            wait_timeout: Duration::from_millis(config.wait_timeout_ms),
            log_actions: config.log_actions,
        }
    }

    /// Override the wait budget applied to every locator resolve.
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    async fn resolve(&self, locator: &Locator) -> Result<Box<dyn Element>> {
        self.gate
            .await_element(self.session.as_ref(), locator, self.wait_timeout)
            .await
    }

    /// Navigate the session to `url`.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.session.navigate(url).await?;
        if self.log_actions {
            info!(target: "heron.action", %url, "navigated");
        }
        Ok(())
    }

    /// Click `locator` and return the refreshed window handle list, so
    /// callers can follow a click that opened a new window.
    pub async fn click(&self, locator: &Locator) -> Result<Vec<String>> {
        let element = self.resolve(locator).await?;
        element.click().await.map_err(|source| HeronError::ActionFailed {
            action: "click",
            target: locator.to_string(),
            source,
        })?;
        self.windows_after("clicked", locator).await
    }

    /// Double-click `locator` and return the refreshed window handle list.
    pub async fn double_click(&self, locator: &Locator) -> Result<Vec<String>> {
        let element = self.resolve(locator).await?;
        element
            .double_click()
            .await
            .map_err(|source| HeronError::ActionFailed {
                action: "double-click",
                target: locator.to_string(),
                source,
            })?;
        self.windows_after("double-clicked", locator).await
    }

    /// Context-click `locator` and return the refreshed window handle list.
    pub async fn right_click(&self, locator: &Locator) -> Result<Vec<String>> {
        let element = self.resolve(locator).await?;
        element
            .context_click()
            .await
            .map_err(|source| HeronError::ActionFailed {
                action: "right-click",
                target: locator.to_string(),
                source,
            })?;
        self.windows_after("right-clicked", locator).await
    }

    async fn windows_after(&self, what: &'static str, locator: &Locator) -> Result<Vec<String>> {
        let handles = self.session.window_handles().await?;
        if self.log_actions {
            info!(target: "heron.action", %locator, windows = handles.len(), "{}", what);
        }
        Ok(handles)
    }

    /// Read `attribute` from `locator`, trimmed of surrounding whitespace.
    ///
    /// An absent attribute raises [`HeronError::AttributeMissing`] rather
    /// than returning an empty string, so a vanished attribute cannot be
    /// mistaken for scraped data.
    pub async fn read_attribute(&self, locator: &Locator, attribute: &str) -> Result<String> {
        let element = self.resolve(locator).await?;
        let value = element
            .attribute(attribute)
            .await
            .map_err(|source| HeronError::ActionFailed {
                action: "read-attribute",
                target: locator.to_string(),
                source,
            })?;
        match value {
            Some(raw) => {
                let trimmed = raw.trim().to_string();
                if self.log_actions {
                    info!(target: "heron.action", %locator, attribute, value = %trimmed, "read attribute");
                }
                Ok(trimmed)
            }
            None => Err(HeronError::AttributeMissing {
                attribute: attribute.to_string(),
                target: locator.to_string(),
            }),
        }
    }

    /// Send a key sequence into `locator`.
    pub async fn input_keys(&self, locator: &Locator, keys: &str) -> Result<()> {
        let element = self.resolve(locator).await?;
        element
            .send_keys(keys)
            .await
            .map_err(|source| HeronError::ActionFailed {
                action: "input-keys",
                target: locator.to_string(),
                source,
            })?;
        if self.log_actions {
            // key content stays out of the logs; it may be a credential
            info!(target: "heron.action", %locator, chars = keys.chars().count(), "sent keys");
        }
        Ok(())
    }

    /// Drag `locator` horizontally by `offset` pixels.
    ///
    /// With `slow`, the displacement is decomposed into small paced steps
    /// and handed to the session as one gesture; a single-jump drag is a
    /// known automation signal.
    pub async fn drag_horizontal(&self, locator: &Locator, offset: i64, slow: bool) -> Result<()> {
        let element = self.resolve(locator).await?;
        let steps = plan_drag(offset, slow, &self.profile);
        if steps.is_empty() {
            return Ok(());
        }
        element
            .drag_horizontal(&steps)
            .await
            .map_err(|source| HeronError::ActionFailed {
                action: "drag",
                target: locator.to_string(),
                source,
            })?;
        if self.log_actions {
            info!(target: "heron.action", %locator, offset, steps = steps.len(), "dragged");
        }
        Ok(())
    }

    /// Scroll the page. See [`ScrollTarget`] for the three modes.
    pub async fn scroll(&self, target: ScrollTarget, slow: bool) -> Result<()> {
        match target {
            ScrollTarget::ByPixels(amount) => self.scroll_by(amount, slow).await,
            ScrollTarget::ToElement(locator) => self.scroll_to_element(&locator, slow).await,
            ScrollTarget::ToBottom => self.scroll_to_bottom(slow).await,
        }
    }

    async fn scroll_by(&self, amount: i64, slow: bool) -> Result<()> {
        if amount <= 0 {
            return Ok(());
        }
        self.run_scroll_steps(plan_scroll(amount, slow, &self.profile))
            .await?;
        if self.log_actions {
            info!(target: "heron.action", pixels = amount, slow, "scrolled by");
        }
        Ok(())
    }

    async fn scroll_to_element(&self, locator: &Locator, slow: bool) -> Result<()> {
        let element = self.resolve(locator).await?;
        let current = self.session.scroll_offset().await?;
        // land the element a buffer below the viewport top, clamped at the
        // top of the document
        let destination =
            (element.vertical_position().await? - self.profile.viewport_buffer_px).max(0);
        if slow {
            self.run_scroll_steps(plan_scroll(destination - current, true, &self.profile))
                .await?;
        } else {
            self.session
                .execute_script(&format!("window.scrollTo(0, {destination});"), Vec::new())
                .await?;
        }
        if self.log_actions {
            info!(target: "heron.action", %locator, destination, slow, "scrolled to element");
        }
        Ok(())
    }

    /// Scroll to the bottom of the page.
    ///
    /// The slow path steps downward and re-measures the document after
    /// every pass, so lazily loading pages keep being consumed until a
    /// full pass adds no height. The fast path is a single jump after a
    /// settle pause; it reaches the current bottom in one call but is the
    /// easier variant for anti-bot heuristics to spot, so prefer `slow`
    /// on defended sites.
    async fn scroll_to_bottom(&self, slow: bool) -> Result<()> {
        if !slow {
            sleep(self.profile.bottom_settle).await;
            let height = self.session.page_height().await?;
            self.session
                .execute_script(&format!("window.scrollTo(0, {height});"), Vec::new())
                .await?;
            if self.log_actions {
                info!(target: "heron.action", height, "jumped to bottom");
            }
            return Ok(());
        }

        let mut offset = self.session.scroll_offset().await?;
        let mut height = self.session.page_height().await?;
        let mut passes = 0u32;
        while offset < height {
            self.run_scroll_steps(plan_scroll(height - offset, true, &self.profile))
                .await?;
            offset = height;
            passes += 1;
            height = self.session.page_height().await?;
        }
        if self.log_actions {
            info!(target: "heron.action", height, passes, "scrolled to bottom");
        }
        Ok(())
    }

    async fn run_scroll_steps(&self, steps: Vec<MotionStep>) -> Result<()> {
        for step in steps {
            self.session
                .execute_script(&format!("window.scrollBy(0, {});", step.delta), Vec::new())
                .await?;
            if !step.delay.is_zero() {
                sleep(step.delay).await;
            }
        }
        Ok(())
    }

    /// Install cookies into the session, one by one and in order.
    pub async fn install_cookies(&self, cookies: &[SessionCookie]) -> Result<()> {
        for cookie in cookies {
            self.session.add_cookie(cookie).await?;
            if self.log_actions {
                info!(
                    target: "heron.action",
                    name = %cookie.name,
                    domain = cookie.domain.as_deref().unwrap_or(""),
                    "cookie installed"
                );
            }
        }
        Ok(())
    }
}
