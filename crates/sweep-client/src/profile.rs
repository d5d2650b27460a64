use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::trace;

use sweep_engine::{LookupError, LookupReply, UsernameLookup};

use crate::{config::ClientConfig, error::ClientError};

const LOOKUP_PATH: &str = "/api/v1/users/web_profile_info/";
const APP_ID: &str = "936619743392459";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Lookup client for the web-profile endpoint.
///
/// Requests impersonate a common browser client and carry the fixed
/// application id; this is part of the remote protocol, not a tunable.
#[derive(Debug, Clone)]
pub struct WebProfileClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WebProfileClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .default_headers(browser_headers())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert("x-ig-app-id", HeaderValue::from_static(APP_ID));
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        header::REFERER,
        HeaderValue::from_static("https://www.instagram.com/"),
    );
    headers.insert(
        header::ORIGIN,
        HeaderValue::from_static("https://www.instagram.com"),
    );
    headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
    headers
}

/// A 200 payload counts as a real record only when `data.user` is a
/// non-null object.
fn has_user_record(body: &serde_json::Value) -> bool {
    body.get("data")
        .and_then(|data| data.get("user"))
        .is_some_and(|user| !user.is_null())
}

#[async_trait]
impl UsernameLookup for WebProfileClient {
    async fn lookup(&self, username: &str) -> Result<LookupReply, LookupError> {
        let url = format!("{}{}?username={}", self.endpoint, LOOKUP_PATH, username);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        trace!(username, status, "lookup response");

        match status {
            404 => Ok(LookupReply::NotFound),
            200 => {
                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| LookupError::InvalidBody(e.to_string()))?;

                if has_user_record(&body) {
                    Ok(LookupReply::Exists)
                } else {
                    Ok(LookupReply::Empty)
                }
            }
            code => Ok(LookupReply::Status(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_with_user_is_a_record() {
        let body = serde_json::json!({"data": {"user": {"username": "a", "follower_count": 10}}});
        assert!(has_user_record(&body));
    }

    #[test]
    fn null_or_missing_user_is_empty() {
        assert!(!has_user_record(&serde_json::json!({"data": {"user": null}})));
        assert!(!has_user_record(&serde_json::json!({"data": {}})));
        assert!(!has_user_record(&serde_json::json!({})));
    }

    #[test]
    fn headers_carry_app_id_and_browser_agent() {
        let headers = browser_headers();
        assert_eq!(headers.get("x-ig-app-id").unwrap(), APP_ID);
        assert!(
            headers
                .get(header::USER_AGENT)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("Chrome/115.0")
        );
    }

    #[test]
    fn client_builds_with_default_config() {
        let client = WebProfileClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint, "https://i.instagram.com");
    }
}
