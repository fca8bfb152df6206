//! Client for the user identity service.
//!
//! The dispatch pipeline uses this to enrich notifications with recipient
//! contact details. Lookups are best-effort from the pipeline's point of
//! view — callers decide what a failure means.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// A user as returned by the identity service.
///
/// Only `id`, `email` and `phone_number` are consumed by the pipeline;
/// the name fields ride along for completeness.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user {0} not found")]
    NotFound(i64),

    #[error("user service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Lookup of recipient contact details by user identifier.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user_by_id(&self, user_id: i64) -> Result<UserRecord, DirectoryError>;
}

/// `UserDirectory` backed by the identity service's HTTP API.
pub struct HttpUserDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user_by_id(&self, user_id: i64) -> Result<UserRecord, DirectoryError> {
        let url = format!(
            "{}/api/users/{}",
            self.base_url.trim_end_matches('/'),
            user_id
        );
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(user_id));
        }

        let user = response.error_for_status()?.json::<UserRecord>().await?;
        tracing::debug!(user_id, "Fetched user from directory");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_user_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "email": "alice@example.com",
                "phoneNumber": "+15551234567",
                "firstName": "Alice",
                "lastName": "Smith"
            })))
            .mount(&server)
            .await;

        let directory = HttpUserDirectory::new(server.uri(), Duration::from_secs(2)).unwrap();
        let user = directory.get_user_by_id(1).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert_eq!(user.phone_number.as_deref(), Some("+15551234567"));
    }

    #[tokio::test]
    async fn test_missing_user_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "User not found",
                "userId": 999
            })))
            .mount(&server)
            .await;

        let directory = HttpUserDirectory::new(server.uri(), Duration::from_secs(2)).unwrap();
        let err = directory.get_user_by_id(999).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let directory = HttpUserDirectory::new(server.uri(), Duration::from_secs(2)).unwrap();
        let err = directory.get_user_by_id(2).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_transport() {
        let directory =
            HttpUserDirectory::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let err = directory.get_user_by_id(1).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }
}
