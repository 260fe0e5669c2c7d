// src/core/net.rs
//! Page sources. Each one turns a page URL into HTML, one request at a time,
//! with no retry: a failure is that month's failure.
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::consts::{RENDER_API_ENDPOINT, USER_AGENT};
use crate::engine::MonthSlot;
use crate::error::{ConfigError, FetchError};

pub trait PageSource {
    /// Short name for logs.
    fn label(&self) -> &'static str;

    /// Fetch the page for `slot`. `url` is what a live source should request.
    fn fetch(&self, url: &str, slot: MonthSlot) -> Result<String, FetchError>;
}

fn build_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ConfigError::Client)
}

fn non_empty(body: String, url: &str) -> Result<String, FetchError> {
    if body.trim().is_empty() {
        Err(FetchError::EmptyBody(s!(url)))
    } else {
        Ok(body)
    }
}

/* ---------------- plain GET ---------------- */

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self { client: build_client(timeout)? })
    }
}

impl PageSource for HttpSource {
    fn label(&self) -> &'static str { "http" }

    fn fetch(&self, url: &str, _slot: MonthSlot) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: s!(url),
                body: s!(),
            });
        }
        non_empty(resp.text()?, url)
    }
}

/* ---------------- server-side rendering API ---------------- */

/// Realtime rendering API: the remote side loads the page, runs its scripts
/// and hands back the final HTML.
pub struct RenderApiSource {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct RenderResponse {
    #[serde(default)]
    results: Vec<RenderResult>,
}

#[derive(Deserialize)]
struct RenderResult {
    content: Option<String>,
}

impl RenderApiSource {
    pub fn new(timeout: Duration, username: &str, password: &str) -> Result<Self, ConfigError> {
        Self::with_endpoint(timeout, RENDER_API_ENDPOINT, username, password)
    }

    pub fn with_endpoint(
        timeout: Duration,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ConfigError> {
        if username.is_empty() {
            return Err(ConfigError::MissingCredential(crate::config::consts::ENV_RENDER_USER));
        }
        if password.is_empty() {
            return Err(ConfigError::MissingCredential(crate::config::consts::ENV_RENDER_PASS));
        }
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: s!(endpoint),
            username: s!(username),
            password: s!(password),
        })
    }
}

impl PageSource for RenderApiSource {
    fn label(&self) -> &'static str { "render-api" }

    fn fetch(&self, url: &str, _slot: MonthSlot) -> Result<String, FetchError> {
        let payload = json!({
            "source": "universal",
            "url": url,
            "render": "html",
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            // The API explains itself in the body; keep it for the log line.
            let body = resp.text().unwrap_or_default();
            return Err(FetchError::Status { status: status.as_u16(), url: s!(url), body });
        }

        let parsed: RenderResponse = resp.json()?;
        let content = parsed
            .results
            .into_iter()
            .next()
            .and_then(|r| r.content)
            .unwrap_or_default();
        non_empty(content, url)
    }
}

/* ---------------- saved pages ---------------- */

/// Reads `<dir>/<YYYY>-<MM>.html`. Offline runs and tests.
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, slot: MonthSlot) -> PathBuf {
        self.dir.join(format!("{}-{:02}.html", slot.year, slot.month))
    }
}

impl PageSource for FixtureSource {
    fn label(&self) -> &'static str { "fixtures" }

    fn fetch(&self, _url: &str, slot: MonthSlot) -> Result<String, FetchError> {
        let path = self.page_path(slot);
        if !path.is_file() {
            return Err(FetchError::MissingFixture(path));
        }
        let body = fs::read_to_string(&path)?;
        non_empty(body, &path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_path_is_zero_padded() {
        let src = FixtureSource::new("pages");
        let p = src.page_path(MonthSlot::new(2020, 3));
        assert!(p.ends_with("2020-03.html"));
    }

    #[test]
    fn missing_fixture_is_a_fetch_error() {
        let src = FixtureSource::new(std::env::temp_dir().join("panjika_no_such_dir"));
        let err = src.fetch("", MonthSlot::new(1999, 1)).unwrap_err();
        assert!(matches!(err, FetchError::MissingFixture(_)));
    }

    #[test]
    fn requests_look_like_a_browser() {
        assert!(USER_AGENT.starts_with("Mozilla/5.0 ("));
        assert!(USER_AGENT.contains("Chrome/"));
        assert!(HttpSource::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn render_api_requires_both_credentials() {
        let t = Duration::from_secs(1);
        assert!(matches!(
            RenderApiSource::new(t, "", "pw"),
            Err(ConfigError::MissingCredential(_))
        ));
        assert!(matches!(
            RenderApiSource::new(t, "user", ""),
            Err(ConfigError::MissingCredential(_))
        ));
    }
}
