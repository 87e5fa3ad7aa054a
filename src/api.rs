//! Remote header API client.
//!
//! `HeaderApi` is the seam between the header logic and the HTTP service so
//! sessions and tests can run against any implementation. `HttpHeaderApi`
//! talks to the real service with `ureq`.
//!
//! # Endpoints
//!
//! | Method | Path                            | Body                 |
//! |--------|---------------------------------|----------------------|
//! | GET    | `/global-search?q=<text>`       |                      |
//! | GET    | `/notifications`                |                      |
//! | PUT    | `/notifications/mark-all-read`  | `{}`                 |
//! | DELETE | `/notifications/all`            |                      |
//! | PUT    | `/notifications/read`           | `{notificationId}`   |
//! | DELETE | `/notifications/one`            | `{notificationId}`   |

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{HeaderError, Result};
use crate::logging;
use crate::notifications::{Notification, NotificationList};
use crate::search::GlobalSearchResponse;

pub const GLOBAL_SEARCH_PATH: &str = "/global-search";
pub const NOTIFICATIONS_PATH: &str = "/notifications";
pub const MARK_ALL_READ_PATH: &str = "/notifications/mark-all-read";
pub const DELETE_ALL_PATH: &str = "/notifications/all";
pub const MARK_READ_PATH: &str = "/notifications/read";
pub const DELETE_ONE_PATH: &str = "/notifications/one";

/// Operations the header needs from the remote service
pub trait HeaderApi: Send + Sync {
    /// Search categories, people and jobs matching `query`
    fn global_search(&self, query: &str) -> Result<GlobalSearchResponse>;

    /// Fetch the signed-in user's notifications
    fn fetch_notifications(&self) -> Result<Vec<Notification>>;

    fn mark_all_read(&self) -> Result<()>;

    fn delete_all(&self) -> Result<()>;

    fn mark_read(&self, notification_id: &str) -> Result<()>;

    fn delete_one(&self, notification_id: &str) -> Result<()>;
}

/// `HeaderApi` over HTTP
pub struct HttpHeaderApi {
    agent: ureq::Agent,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpHeaderApi {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        HttpHeaderApi {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_base_url.clone(),
            config.get_auth_token(),
            config.request_timeout(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        match &self.auth_token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Check status and read the body as text, logging latency
    fn finish(
        &self,
        endpoint: &str,
        started: Instant,
        outcome: std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<String> {
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let response = outcome.map_err(|e| {
            logging::log_api_call(endpoint, elapsed_ms, false);
            HeaderError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            logging::log_api_call(endpoint, elapsed_ms, false);
            return Err(HeaderError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| HeaderError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        logging::log_api_call(endpoint, elapsed_ms, true);
        Ok(body)
    }

    fn decode<T: DeserializeOwned + Default>(body: &str) -> Result<T> {
        if body.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(body)?)
    }
}

impl HeaderApi for HttpHeaderApi {
    fn global_search(&self, query: &str) -> Result<GlobalSearchResponse> {
        debug!(query_len = query.len(), "Sending global search");
        let started = Instant::now();
        let request = self
            .authorize(self.agent.get(&self.url(GLOBAL_SEARCH_PATH)))
            .query("q", query);
        let body = self.finish(GLOBAL_SEARCH_PATH, started, request.call())?;
        Self::decode(&body)
    }

    fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        let started = Instant::now();
        let request = self.authorize(self.agent.get(&self.url(NOTIFICATIONS_PATH)));
        let body = self.finish(NOTIFICATIONS_PATH, started, request.call())?;
        let list: NotificationList = Self::decode(&body)?;
        debug!(count = list.notifications.len(), "Fetched notifications");
        Ok(list.notifications)
    }

    fn mark_all_read(&self) -> Result<()> {
        let started = Instant::now();
        let request = self.authorize(self.agent.put(&self.url(MARK_ALL_READ_PATH)));
        self.finish(
            MARK_ALL_READ_PATH,
            started,
            request.send_json(serde_json::json!({})),
        )?;
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        let started = Instant::now();
        let request = self.authorize(self.agent.delete(&self.url(DELETE_ALL_PATH)));
        self.finish(DELETE_ALL_PATH, started, request.call())?;
        Ok(())
    }

    fn mark_read(&self, notification_id: &str) -> Result<()> {
        let started = Instant::now();
        let request = self.authorize(self.agent.put(&self.url(MARK_READ_PATH)));
        self.finish(
            MARK_READ_PATH,
            started,
            request.send_json(serde_json::json!({ "notificationId": notification_id })),
        )?;
        Ok(())
    }

    fn delete_one(&self, notification_id: &str) -> Result<()> {
        let started = Instant::now();
        let request = self
            .authorize(self.agent.delete(&self.url(DELETE_ONE_PATH)))
            .force_send_body();
        self.finish(
            DELETE_ONE_PATH,
            started,
            request.send_json(serde_json::json!({ "notificationId": notification_id })),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpHeaderApi::new("https://api.example.com/", None, Duration::from_secs(1));
        assert_eq!(
            api.url(GLOBAL_SEARCH_PATH),
            "https://api.example.com/global-search"
        );
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = Config {
            api_base_url: "https://staging.example.com/api".to_string(),
            ..Config::default()
        };
        let api = HttpHeaderApi::from_config(&config);
        assert_eq!(
            api.url(NOTIFICATIONS_PATH),
            "https://staging.example.com/api/notifications"
        );
    }

    #[test]
    fn test_decode_empty_body_is_default() {
        let list: NotificationList = HttpHeaderApi::decode("").unwrap();
        assert!(list.notifications.is_empty());
    }

    #[test]
    fn test_decode_search_response() {
        let body = r#"{"success": true, "categories": [{"_id": "c1", "name": "Logo"}], "people": [], "jobs": []}"#;
        let response: GlobalSearchResponse = HttpHeaderApi::decode(body).unwrap();
        assert!(response.success);
        assert_eq!(response.categories[0].id, "c1");
    }

    #[test]
    fn test_decode_invalid_body_is_decode_error() {
        let result: Result<GlobalSearchResponse> = HttpHeaderApi::decode("<html>");
        assert!(matches!(result, Err(HeaderError::Decode(_))));
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is almost never listening
        let api = HttpHeaderApi::new("http://127.0.0.1:9", None, Duration::from_millis(500));
        let result = api.fetch_notifications();
        assert!(matches!(result, Err(HeaderError::Network { .. })));
    }
}
