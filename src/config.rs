//! Client configuration.
use iref::{Uri, UriBuf, uri};

use crate::{ClientIdBuf, ScopeBuf};

/// Default callback address, matching the registered redirect URI of the
/// application.
pub const DEFAULT_REDIRECT_URI: &Uri = uri!("http://localhost:3000/callback");

/// Scopes required for the profile page: private profile fields and email.
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email";

/// Default generated code verifier length, the maximum RFC 7636 allows.
pub const DEFAULT_VERIFIER_LENGTH: usize = 128;

/// Configuration of the authorization flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Client identifier issued by the Spotify developer dashboard.
	pub client_id: ClientIdBuf,

	/// Redirect URI the callback is delivered to. Must exactly match one of
	/// the redirect URIs registered for the application.
	pub redirect_uri: UriBuf,

	/// Scopes requested with the authorization request.
	pub scope: ScopeBuf,

	/// Length of generated code verifiers, in the range 43 to 128.
	pub verifier_length: usize,
}

impl Config {
	/// Creates a configuration with the default redirect URI, scope and
	/// verifier length.
	pub fn new(client_id: ClientIdBuf) -> Self {
		Self {
			client_id,
			redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
			scope: crate::scope!("user-read-private user-read-email").to_owned(),
			verifier_length: DEFAULT_VERIFIER_LENGTH,
		}
	}

	/// Reads the configuration from the environment.
	///
	/// `SPOTIFY_CLIENT_ID` is required; `SPOTIFY_REDIRECT_URI` and
	/// `SPOTIFY_SCOPE` override the defaults when set.
	pub fn from_env() -> Result<Self, ConfigError> {
		let client_id =
			std::env::var("SPOTIFY_CLIENT_ID").map_err(|_| ConfigError::MissingClientId)?;
		let client_id = ClientIdBuf::new(client_id).map_err(|_| ConfigError::InvalidClientId)?;

		let mut config = Self::new(client_id);

		if let Ok(value) = std::env::var("SPOTIFY_REDIRECT_URI") {
			config.redirect_uri = UriBuf::new(value.clone().into_bytes())
				.map_err(|_| ConfigError::InvalidRedirectUri(value))?;
		}

		if let Ok(value) = std::env::var("SPOTIFY_SCOPE") {
			config.scope =
				ScopeBuf::new(value.clone()).map_err(|_| ConfigError::InvalidScope(value))?;
		}

		Ok(config)
	}
}

/// Errors reading the configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("SPOTIFY_CLIENT_ID is not set")]
	MissingClientId,

	#[error("SPOTIFY_CLIENT_ID is not a well-formed client identifier")]
	InvalidClientId,

	#[error("SPOTIFY_REDIRECT_URI is not a valid URI: {0}")]
	InvalidRedirectUri(String),

	#[error("SPOTIFY_SCOPE is not a well-formed scope: {0}")]
	InvalidScope(String),
}
