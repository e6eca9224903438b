//! Token endpoint request and response types.
use std::fmt;

use iref::Uri;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	AccessTokenBuf, ClientId, Code, ScopeBuf,
	endpoints::TOKEN_URI,
	error::AuthError,
	pkce::PkceCodeVerifier,
	transport::{
		APPLICATION_JSON, APPLICATION_X_WWW_FORM_URLENCODED, ContentType, HttpClient,
		WwwFormUrlEncoded, expect_content_type,
	},
};

/// An authorization code grant token request, submitted as an
/// `application/x-www-form-urlencoded` POST body.
///
/// The `code_verifier` must be the exact verifier whose challenge was sent
/// with the authorization request; the server hashes it and rejects the
/// exchange on mismatch.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct TokenRequest<'a> {
	pub client_id: &'a ClientId,
	pub code: &'a Code,
	pub redirect_uri: &'a Uri,
	pub code_verifier: &'a PkceCodeVerifier,
}

/// A successful token endpoint response.
///
/// Only `access_token` is required; the remaining fields are carried as
/// data. In particular `refresh_token` is never acted upon by this crate.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Access token issued by the authorization server.
	pub access_token: AccessTokenBuf,

	/// The type of the token issued. Value is case insensitive.
	pub token_type: Option<String>,

	/// Lifetime in seconds of the access token.
	pub expires_in: Option<u64>,

	/// The refresh token, which can be used to obtain new access tokens
	/// using the same authorization grant.
	pub refresh_token: Option<String>,

	/// Scope of the access token, if narrower than requested.
	pub scope: Option<ScopeBuf>,
}

/// The error payload of a rejected token exchange.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenErrorResponse {
	/// Error code, e.g. `invalid_grant`.
	pub error: String,

	/// Human-readable explanation, when the server provides one.
	pub error_description: Option<String>,
}

impl TokenErrorResponse {
	/// Fallback payload for rejections whose body is absent or unparseable.
	pub fn from_status(status: http::StatusCode) -> Self {
		Self {
			error: format!("http status {status}"),
			error_description: None,
		}
	}
}

impl fmt::Display for TokenErrorResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.error_description {
			Some(description) => write!(f, "{}: {description}", self.error),
			None => f.write_str(&self.error),
		}
	}
}

/// Submits a token request and parses the response.
///
/// A non-success status yields [`AuthError::TokenExchange`] carrying the
/// upstream error payload when one is present; a success response with an
/// unparseable body yields [`AuthError::MalformedResponse`].
pub async fn request_token(
	request: &TokenRequest<'_>,
	http_client: &impl HttpClient,
) -> Result<TokenResponse, AuthError> {
	let http_request = http::Request::builder()
		.method(http::Method::POST)
		.uri(TOKEN_URI.as_str())
		.header(http::header::CONTENT_TYPE, APPLICATION_X_WWW_FORM_URLENCODED)
		.body(WwwFormUrlEncoded::encode(request))
		// UNWRAP SAFETY: request parts are statically valid.
		.unwrap();

	let response = http_client.send(http_request).await?;

	if !response.status().is_success() {
		let payload = serde_json::from_slice(response.body())
			.unwrap_or_else(|_| TokenErrorResponse::from_status(response.status()));
		log::error!("token exchange rejected: {payload}");
		return Err(AuthError::TokenExchange(payload));
	}

	expect_content_type(response.headers(), &APPLICATION_JSON)?;

	serde_json::from_slice(response.body()).map_err(AuthError::malformed)
}
