use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{elements::Element, Client, ClientBuilder, Locator};
use pronounce_model::{PronounceError, USER_AGENT};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Something that can start a rendering session.
///
/// This is the one place a full browser engine is involved: the playback
/// control's target is finalized by client-side script, so it has to be read
/// from a rendered page rather than from raw server markup.
#[async_trait]
pub trait Browser: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session, PronounceError>;
}

/// A live rendering session, owned by exactly one request.
///
/// `close` takes the session by value, so it can only be released once.
#[async_trait]
pub trait BrowserSession: Send + Sized {
    type Element: Send + Sync;

    async fn navigate(&mut self, url: &str) -> Result<(), PronounceError>;

    /// Wait up to `timeout` for an element with the given id.
    async fn find_by_id(
        &mut self,
        id: &str,
        timeout: Duration,
    ) -> Result<Option<Self::Element>, PronounceError>;

    /// Wait up to `timeout` for at least one match of `selector`, then return
    /// every match in document order (empty if none appeared).
    async fn find_all(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Self::Element>, PronounceError>;

    async fn scroll_into_view(&mut self, element: &Self::Element) -> Result<(), PronounceError>;

    /// Read a DOM property (the browser-computed value, not the markup attribute).
    async fn property(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, PronounceError>;

    async fn close(self) -> Result<(), PronounceError>;
}

/// Settings for the WebDriver-backed Chrome session.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// chromedriver (or any W3C WebDriver server) endpoint.
    pub webdriver_url: String,
    pub user_agent: String,
    pub headless: bool,
    /// How often condition waits re-check the page.
    pub poll_interval: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            user_agent: USER_AGENT.to_string(),
            headless: true,
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl BrowserOptions {
    /// Chrome arguments: headless, no sandbox, no /dev/shm, fixed user agent.
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless".to_string());
        }
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        args.push(format!("--user-agent={}", self.user_agent));
        args
    }

    fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("browserName".into(), json!("chrome"));
        caps.insert("goog:chromeOptions".into(), json!({ "args": self.chrome_args() }));
        caps
    }
}

/// Headless Chrome driven through WebDriver.
pub struct ChromeBrowser {
    options: BrowserOptions,
}

impl ChromeBrowser {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Browser for ChromeBrowser {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession, PronounceError> {
        tracing::debug!(webdriver = %self.options.webdriver_url, "Starting browser session");
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.options.capabilities());
        let client = builder
            .connect(&self.options.webdriver_url)
            .await
            .map_err(|e| PronounceError::BrowserInit(e.to_string()))?;
        Ok(ChromeSession {
            client,
            poll_interval: self.options.poll_interval,
        })
    }
}

pub struct ChromeSession {
    client: Client,
    poll_interval: Duration,
}

impl ChromeSession {
    async fn wait_for(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
        stage: &'static str,
    ) -> Result<Option<Element>, PronounceError> {
        let found = self
            .client
            .wait()
            .at_most(timeout)
            .every(self.poll_interval)
            .for_element(locator)
            .await;
        match found {
            Ok(element) => Ok(Some(element)),
            Err(CmdError::WaitTimeout) => Ok(None),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(render_error(stage, e)),
        }
    }
}

fn render_error(stage: &'static str, e: impl std::fmt::Display) -> PronounceError {
    PronounceError::Render {
        stage,
        reason: e.to_string(),
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<(), PronounceError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| render_error("loading page", e))
    }

    async fn find_by_id(&mut self, id: &str, timeout: Duration) -> Result<Option<Element>, PronounceError> {
        self.wait_for(Locator::Id(id), timeout, "finding language section")
            .await
    }

    async fn find_all(&mut self, selector: &str, timeout: Duration) -> Result<Vec<Element>, PronounceError> {
        let stage = "finding playback controls";
        if self.wait_for(Locator::Css(selector), timeout, stage).await?.is_none() {
            return Ok(Vec::new());
        }
        self.client
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| render_error(stage, e))
    }

    async fn scroll_into_view(&mut self, element: &Element) -> Result<(), PronounceError> {
        let stage = "scrolling to section";
        let arg = serde_json::to_value(element).map_err(|e| render_error(stage, e))?;
        self.client
            .execute("arguments[0].scrollIntoView();", vec![arg])
            .await
            .map(|_| ())
            .map_err(|e| render_error(stage, e))
    }

    async fn property(&mut self, element: &Element, name: &str) -> Result<Option<String>, PronounceError> {
        element
            .prop(name)
            .await
            .map_err(|e| render_error("reading control target", e))
    }

    async fn close(self) -> Result<(), PronounceError> {
        self.client
            .close()
            .await
            .map_err(|e| render_error("closing session", e))
    }
}
