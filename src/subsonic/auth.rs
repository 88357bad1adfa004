//! Subsonic token authentication.
//!
//! Every upstream call carries `u`, `t`, `s`, `v`, `c` and `f` query
//! parameters where `t = md5_hex(password + s)` and `s` is a fresh random
//! salt. Parameters are built per call and never cached.

use rand::RngCore;

use crate::config::{UpstreamConfig, SUBSONIC_FORMAT};
use crate::http::error::ApiError;

/// Bytes of entropy in each salt (hex-encoded to twice as many characters).
pub const SALT_BYTES: usize = 8;

/// Query parameters authenticating a single upstream request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub user: String,
    pub token: String,
    pub salt: String,
    pub version: String,
    pub client: String,
    pub format: &'static str,
}

impl AuthParams {
    /// Build fresh parameters from the configured credentials.
    ///
    /// Fails with [`ApiError::MissingCredentials`] when username or password
    /// is empty rather than sending an unauthenticated request.
    pub fn generate(config: &UpstreamConfig) -> Result<Self, ApiError> {
        if !config.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }

        let salt = make_salt();
        let token = md5_hex(&format!("{}{}", config.password, salt));

        Ok(Self {
            user: config.username.clone(),
            token,
            salt,
            version: config.version.clone(),
            client: config.client.clone(),
            format: SUBSONIC_FORMAT,
        })
    }

    /// Flatten into `(key, value)` pairs for the request query string.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("u", self.user.clone()),
            ("t", self.token.clone()),
            ("s", self.salt.clone()),
            ("v", self.version.clone()),
            ("c", self.client.clone()),
            ("f", self.format.to_string()),
        ]
    }
}

impl std::fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthParams")
            .field("user", &self.user)
            .field("version", &self.version)
            .field("client", &self.client)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

fn make_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}
