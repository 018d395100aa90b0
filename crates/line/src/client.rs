use {
    async_trait::async_trait,
    courier_dispatch::Transport,
    secrecy::{ExposeSecret, Secret},
    tracing::debug,
};

use crate::error::{Error, Result};

/// Production endpoint of the LINE Messaging API.
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

const REPLY_PATH: &str = "/v2/bot/message/reply";
const PUSH_PATH: &str = "/v2/bot/message/push";

/// Reply/push sender over the LINE Messaging API.
pub struct LineTransport {
    http: reqwest::Client,
    base: String,
    token: Secret<String>,
}

impl LineTransport {
    #[must_use]
    pub fn new(token: Secret<String>) -> Self {
        Self::with_base(token, DEFAULT_API_BASE)
    }

    /// Point the client at a non-default API base. Tests aim this at a mock
    /// server.
    #[must_use]
    pub fn with_base(token: Secret<String>, base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}{path}", self.base))
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                detail,
            });
        }
        debug!(path, "line api call succeeded");
        Ok(())
    }
}

fn text_message(text: &str) -> serde_json::Value {
    serde_json::json!({ "type": "text", "text": text })
}

#[async_trait]
impl Transport for LineTransport {
    async fn send_reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "replyToken": reply_token,
            "messages": [text_message(text)],
        });
        self.post(REPLY_PATH, body).await?;
        Ok(())
    }

    async fn send_push(&self, to: &str, text: &str) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "to": to,
            "messages": [text_message(text)],
        });
        self.post(PUSH_PATH, body).await?;
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn transport_for(server: &mockito::ServerGuard) -> LineTransport {
        LineTransport::with_base(Secret::new("channel-token".into()), server.url())
    }

    #[tokio::test]
    async fn reply_posts_token_and_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/bot/message/reply")
            .match_header("authorization", "Bearer channel-token")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "replyToken": "rt-1",
                "messages": [{"type": "text", "text": "hello"}],
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let transport = transport_for(&server);
        transport.send_reply("rt-1", "hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn push_posts_recipient_and_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/bot/message/push")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "to": "U1",
                "messages": [{"type": "text", "text": "hi"}],
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let transport = transport_for(&server);
        transport.send_push("U1", "hi").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/bot/message/push")
            .with_status(401)
            .with_body(r#"{"message":"invalid token"}"#)
            .create_async()
            .await;

        let transport = transport_for(&server);
        let err = transport.send_push("U1", "hi").await.unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert!(matches!(err, Error::Api { status: 401, .. }));
    }
}
