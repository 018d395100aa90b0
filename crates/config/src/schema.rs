use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Top-level courier configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Channel access token for the push/reply API.
    #[serde(serialize_with = "serialize_secret")]
    pub channel_access_token: Secret<String>,

    /// Channel secret used to verify webhook signatures.
    #[serde(serialize_with = "serialize_secret")]
    pub channel_secret: Secret<String>,

    /// Address the gateway binds to.
    pub bind: String,

    /// Port the gateway listens on.
    pub port: u16,

    /// Path of the line-oriented subscriber file.
    pub subscribers_file: PathBuf,

    /// How many broadcast pushes may be in flight at once.
    pub broadcast_parallelism: usize,

    /// Messaging API base URL. Only overridden in tests.
    pub api_base: String,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            channel_access_token: Secret::new(String::new()),
            channel_secret: Secret::new(String::new()),
            bind: "0.0.0.0".into(),
            port: 3000,
            subscribers_file: PathBuf::from("subscribers.txt"),
            broadcast_parallelism: 4,
            api_base: "https://api.line.me".into(),
        }
    }
}

impl std::fmt::Debug for CourierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourierConfig")
            .field("channel_access_token", &"[REDACTED]")
            .field("channel_secret", &"[REDACTED]")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("subscribers_file", &self.subscribers_file)
            .finish_non_exhaustive()
    }
}

impl CourierConfig {
    /// Serving requires both channel credentials; refuse to start without
    /// them rather than failing on the first webhook.
    pub fn ensure_credentials(&self) -> anyhow::Result<()> {
        if self.channel_access_token.expose_secret().is_empty()
            || self.channel_secret.expose_secret().is_empty()
        {
            anyhow::bail!(
                "missing channel credentials: set COURIER_CHANNEL_TOKEN and \
                 COURIER_CHANNEL_SECRET (or put them in courier.toml)"
            );
        }
        Ok(())
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CourierConfig::default();
        assert_eq!(cfg.bind, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.subscribers_file, PathBuf::from("subscribers.txt"));
        assert_eq!(cfg.broadcast_parallelism, 4);
        assert!(cfg.ensure_credentials().is_err());
    }

    #[test]
    fn deserialize_from_toml() {
        let cfg: CourierConfig = toml::from_str(
            r#"
            channel_access_token = "tok"
            channel_secret = "sec"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(cfg.channel_access_token.expose_secret(), "tok");
        assert_eq!(cfg.channel_secret.expose_secret(), "sec");
        assert_eq!(cfg.port, 8080);
        // defaults for unspecified fields
        assert_eq!(cfg.bind, "0.0.0.0");
        assert!(cfg.ensure_credentials().is_ok());
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg: CourierConfig = toml::from_str(r#"channel_secret = "hush""#).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hush"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
