//! Error taxonomy for the authorization flow and resource calls.
use crate::endpoints::token::TokenErrorResponse;

/// Errors produced by any step of the authorization flow.
///
/// Every failure propagates to the caller of the step that produced it;
/// nothing is swallowed. A failure before the flow reaches its authenticated
/// state leaves the flow restartable from scratch.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	/// The cryptographically secure random source is unavailable or failed.
	///
	/// Never produced by the built-in `rand` backend, which is infallible;
	/// reserved for alternative verifier sources reporting through this
	/// type.
	#[error("unable to generate random verifier: {0}")]
	Generation(String),

	/// Digest computation is unavailable or failed.
	///
	/// Never produced by the built-in `sha2` backend, which is infallible;
	/// reserved for alternative digest backends reporting through this
	/// type.
	#[error("unable to compute code challenge: {0}")]
	Hashing(String),

	/// The verifier slot could not be read or written.
	#[error("verifier storage failure: {0}")]
	Storage(String),

	/// Token exchange was attempted with no stored verifier.
	///
	/// No request is sent in this case: the exchange would be rejected
	/// upstream anyway, and sending an empty `code_verifier` would leak
	/// nothing but confusion.
	#[error("no code verifier stored for this flow")]
	MissingVerifier,

	/// The redirect callback did not deliver a usable authorization code.
	#[error("authorization callback failed: {0}")]
	Callback(String),

	/// Transport-level failure on an HTTP call.
	#[error("network failure: {0}")]
	Network(String),

	/// The token endpoint rejected the exchange.
	#[error("token exchange rejected: {0}")]
	TokenExchange(TokenErrorResponse),

	/// A resource endpoint rejected the access token (401).
	#[error("access token rejected by resource server")]
	Unauthorized,

	/// The response body could not be parsed, or an expected field was
	/// missing.
	#[error("malformed response: {0}")]
	MalformedResponse(String),

	/// Any other unexpected upstream status code.
	#[error("server responded with status code: {0}")]
	Server(http::StatusCode),
}

impl AuthError {
	pub fn network(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("network error: {msg}");
		Self::Network(msg)
	}

	pub fn storage(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("verifier storage error: {msg}");
		Self::Storage(msg)
	}

	pub fn malformed(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("malformed response: {msg}");
		Self::MalformedResponse(msg)
	}

	pub fn server(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::Server(status)
	}
}
