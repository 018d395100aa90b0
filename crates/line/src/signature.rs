//! Webhook signature verification.
//!
//! LINE signs each webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64-encoded MAC in the
//! `X-Line-Signature` header.

use {
    base64::Engine,
    hmac::{Hmac, Mac},
    sha2::Sha256,
    tracing::warn,
};

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook delivery against the channel secret.
pub fn verify_signature(body: &[u8], signature_header: &str, channel_secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("failed to create HMAC from channel secret");
            return false;
        },
    };

    mac.update(body);
    let computed = base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    // Constant-time comparison to prevent timing attacks.
    constant_time_eq(&computed, signature_header)
}

/// Constant-time string comparison.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
