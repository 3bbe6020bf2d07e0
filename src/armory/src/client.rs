//! HTTP access to the armory.
//!
//! [`Transport`] is the seam between the pipeline and the network. The
//! production stack is [`Retrying`] around [`UreqTransport`]: the inner
//! transport makes one blocking `ureq` call on the blocking pool, and the
//! wrapper retries transient failures with a linearly growing delay. Tests
//! plug in fakes that serve fixtures.

use crate::achievements::{AchievementTable, CategoryReply};
use crate::armory_page::ArmoryPage;
use crate::character::CharacterSnapshot;
use crate::error::{ArmoryError, Result};
use crate::reference::ACHIEVEMENT_CATEGORIES;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://armory.warmane.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Fetches raw response bodies
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_text(&self, url: &str) -> Result<String>;

    /// POST an `application/x-www-form-urlencoded` body
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}

impl<T: Transport> Transport for &T {
    async fn get_text(&self, url: &str) -> Result<String> {
        (**self).get_text(url).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        (**self).post_form(url, form).await
    }
}

/// Network settings for the armory client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts per request, at least one
    pub retries: u32,
    /// Delay before the second attempt; the nth retry waits n times this
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

/// Retries retryable failures of an inner transport.
///
/// Attempt `n` that fails is followed by a sleep of `n * delay`, so with
/// three attempts and a one second delay the waits are 1s then 2s.
#[derive(Debug, Clone)]
pub struct Retrying<T> {
    inner: T,
    attempts: u32,
    delay: Duration,
}

impl<T: Transport> Retrying<T> {
    pub fn new(inner: T, attempts: u32, delay: Duration) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn from_config(inner: T, config: &ClientConfig) -> Self {
        Self::new(inner, config.retries, config.retry_delay)
    }

    async fn run<F, Fut>(&self, url: &str, mut request: F) -> Result<String>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut attempt = 1;
        loop {
            match request().await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.attempts => {
                    let delay = self.delay * attempt;
                    tracing::warn!(
                        "Request to {} failed (attempt {}/{}): {}; retrying in {:?}",
                        url,
                        attempt,
                        self.attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<T: Transport> Transport for Retrying<T> {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.run(url, || self.inner.get_text(url)).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.run(url, || self.inner.post_form(url, form)).await
    }
}

enum Request {
    Get,
    Form(Vec<(String, String)>),
}

/// Map a non-success status: 4xx is final, everything else is transient
fn status_error(url: &str, status: u16, body: &str) -> ArmoryError {
    if (400..500).contains(&status) {
        ArmoryError::Rejected {
            url: url.to_string(),
            status,
        }
    } else {
        ArmoryError::transport(url, format!("status {}: {}", status, body.trim()))
    }
}

/// Blocking `ureq` agent driven from async code; one attempt per call
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(concat!("armory/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    /// This transport wrapped in the configured retry policy
    pub fn with_retries(config: &ClientConfig) -> Retrying<Self> {
        Retrying::from_config(Self::new(config), config)
    }

    fn call(agent: &ureq::Agent, url: &str, request: &Request) -> Result<String> {
        let response = match request {
            Request::Get => agent.get(url).call(),
            Request::Form(form) => {
                let pairs: Vec<(&str, &str)> =
                    form.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                agent.post(url).send_form(&pairs)
            }
        };

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| ArmoryError::transport(url, e.to_string())),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(status_error(url, code, &body))
            }
            Err(e) => Err(ArmoryError::transport(url, e.to_string())),
        }
    }

    async fn send(&self, url: &str, request: Request) -> Result<String> {
        let agent = self.agent.clone();
        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || Self::call(&agent, &owned_url, &request))
            .await
            .map_err(|e| ArmoryError::transport(url, format!("request task failed: {}", e)))?
    }
}

impl Transport for UreqTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.send(url, Request::Get).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let form = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.send(url, Request::Form(form)).await
    }
}

/// Armory endpoints for one base URL
#[derive(Debug, Clone)]
pub struct ArmoryClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ArmoryClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn character_api_url(&self, name: &str, realm: &str) -> String {
        format!(
            "{}/api/character/{}/{}/",
            self.base_url,
            urlencoding::encode(name),
            urlencoding::encode(realm)
        )
    }

    pub fn profile_url(&self, name: &str, realm: &str) -> String {
        format!(
            "{}/character/{}/{}/",
            self.base_url,
            urlencoding::encode(name),
            urlencoding::encode(realm)
        )
    }

    pub fn achievements_url(&self, name: &str, realm: &str) -> String {
        format!("{}achievements", self.profile_url(name, realm))
    }

    /// Guild page; whitespace in the guild name becomes `+`
    pub fn guild_url(&self, guild: &str, realm: &str) -> String {
        let plus_joined = guild
            .split_whitespace()
            .map(|w| urlencoding::encode(w).into_owned())
            .collect::<Vec<_>>()
            .join("+");
        format!(
            "{}/guild/{}/{}",
            self.base_url,
            plus_joined,
            urlencoding::encode(realm)
        )
    }

    /// Fetch the character snapshot; names must already be normalized.
    ///
    /// A body that does not decode as a character yields an invalid
    /// (nameless) snapshot, which callers report as not found.
    pub async fn character(&self, name: &str, realm: &str) -> Result<CharacterSnapshot> {
        let url = self.character_api_url(name, realm);
        tracing::debug!("Fetching character {}", url);
        let body = self.transport.get_text(&url).await?;
        Ok(CharacterSnapshot::from_json(&body).unwrap_or_else(|e| {
            tracing::warn!("Undecodable character response from {}: {}", url, e);
            CharacterSnapshot::default()
        }))
    }

    pub async fn armory_page(&self, name: &str, realm: &str) -> Result<ArmoryPage> {
        let url = self.profile_url(name, realm);
        tracing::debug!("Fetching armory page {}", url);
        let body = self.transport.get_text(&url).await?;
        Ok(ArmoryPage::parse(&body))
    }

    /// Fetch every raid category, one after another
    pub async fn achievements(&self, name: &str, realm: &str) -> Result<AchievementTable> {
        let url = self.achievements_url(name, realm);
        let mut table = AchievementTable::new();

        for (category, id) in ACHIEVEMENT_CATEGORIES {
            tracing::debug!("Fetching achievements category {} ({})", category, id);
            let id = id.to_string();
            let body = self.transport.post_form(&url, &[("category", id.as_str())]).await?;
            let reply = CategoryReply::from_json(&body)?;
            table.merge_fragment(&reply.content);
        }

        tracing::info!(
            "{} has {} of {} tracked raid achievements",
            name,
            table.completed.values().filter(|done| **done).count(),
            table.completed.len()
        );
        Ok(table)
    }
}
