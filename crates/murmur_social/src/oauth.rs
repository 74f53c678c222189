//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::{Engine as _, engine::general_purpose::STANDARD};
use derive_getters::Getters;
use hmac::{Hmac, Mac};
use murmur_error::{PublishError, PublishErrorKind, PublishResult};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const NONCE_LEN: usize = 32;

/// Everything except the RFC 3986 unreserved characters.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Environment variables holding user-context credentials.
const CREDENTIAL_VARS: [&str; 4] = [
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_SECRET",
];

/// Consumer and access-token credentials for user-context requests.
#[derive(Clone, Getters)]
pub struct OAuthCredentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl OAuthCredentials {
    /// Create credentials.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Read credentials through `lookup`, usually `std::env::var(..).ok()`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every missing or blank variable.
    pub fn from_lookup<F>(lookup: F) -> PublishResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values: Vec<Option<String>> = CREDENTIAL_VARS
            .iter()
            .map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .collect();
        let missing: Vec<&str> = CREDENTIAL_VARS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Configuration(format!(
                "missing credentials: {}",
                missing.join(", ")
            ))));
        }

        let mut values = values.into_iter().flatten();
        Ok(Self {
            consumer_key: values.next().unwrap_or_default(),
            consumer_secret: values.next().unwrap_or_default(),
            access_token: values.next().unwrap_or_default(),
            access_secret: values.next().unwrap_or_default(),
        })
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> PublishResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// RFC 3986 percent-encoding as OAuth 1.0a requires.
///
/// # Examples
///
/// ```
/// use murmur_social::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
/// ```
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Builds `Authorization` headers for one set of credentials.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
}

impl OAuthSigner {
    /// Create a signer.
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self { credentials }
    }

    /// Header for a request, with a fresh nonce and the current time.
    ///
    /// `params` are the query or form parameters covered by the signature;
    /// JSON bodies are not signed.
    pub fn authorization(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> PublishResult<String> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    /// Header for a request with an explicit nonce and timestamp.
    pub fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> PublishResult<String> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature", signature));
        oauth_params.sort();

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }

    /// Base64 HMAC-SHA1 signature over the signature base string.
    pub fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth_params: &[(&'static str, String)],
    ) -> PublishResult<String> {
        let base = signature_base_string(method, url, params, oauth_params);
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.access_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| {
            PublishError::new(PublishErrorKind::Configuration(format!(
                "Invalid signing key: {}",
                e
            )))
        })?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(&'static str, String)> {
        vec![
            ("oauth_consumer_key", self.credentials.consumer_key.clone()),
            ("oauth_nonce", nonce.to_string()),
            ("oauth_signature_method", "HMAC-SHA1".to_string()),
            ("oauth_timestamp", timestamp.to_string()),
            ("oauth_token", self.credentials.access_token.clone()),
            ("oauth_version", "1.0".to_string()),
        ]
    }
}

fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&'static str, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string)
    )
}
