//! Authorization endpoint redirect building and callback parsing.
use iref::{Uri, UriBuf};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	ClientId, CodeBuf, Scope,
	endpoints::AUTHORIZATION_URI,
	error::AuthError,
	pkce::PkceCodeChallengeAndMethod,
	util::extend_uri_query,
};

/// The `response_type` parameter of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Request an authorization code.
	Code,
}

/// An authorization request, serialized into the query string of the
/// redirect URL.
///
/// The user agent navigates to the resulting URL; the calling context is
/// abandoned and control resumes only when the accounts service redirects
/// back to `redirect_uri` with either a `code` or an `error` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest<'a> {
	pub client_id: &'a ClientId,
	pub response_type: ResponseType,
	pub redirect_uri: &'a Uri,
	pub scope: &'a Scope,

	#[serde(flatten)]
	pub pkce: &'a PkceCodeChallengeAndMethod,
}

impl AuthorizationRequest<'_> {
	/// Builds the full redirect URL for this request.
	pub fn to_uri(&self) -> UriBuf {
		let mut uri = AUTHORIZATION_URI.to_owned();
		extend_uri_query(&mut uri, self);
		uri
	}
}

/// Query parameters delivered to the redirect callback.
///
/// Exactly one of `code` and `error` is present on a conforming redirect.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	pub code: Option<CodeBuf>,
	pub error: Option<AuthorizationErrorCode>,
	pub error_description: Option<String>,
}

impl CallbackParams {
	/// Parses callback parameters from the raw query string of the redirect
	/// URL.
	pub fn from_query(query: &str) -> Result<Self, AuthError> {
		serde_html_form::from_str(query).map_err(AuthError::malformed)
	}
}

/// Error codes delivered through the `error` callback parameter.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationErrorCode {
	/// The request is missing a required parameter, includes an invalid
	/// parameter value, includes a parameter more than once, or is otherwise
	/// malformed.
	InvalidRequest,

	/// The client is not authorized to request an authorization code using
	/// this method.
	UnauthorizedClient,

	/// The resource owner or authorization server denied the request.
	AccessDenied,

	/// The authorization server does not support obtaining an authorization
	/// code using this method.
	UnsupportedResponseType,

	/// The requested scope is invalid, unknown, or malformed.
	InvalidScope,

	/// The authorization server encountered an unexpected condition that
	/// prevented it from fulfilling the request.
	ServerError,

	/// The authorization server is currently unable to handle the request
	/// due to a temporary overloading or maintenance of the server.
	TemporarilyUnavailable,
}

impl AuthorizationErrorCode {
	/// Returns the wire representation of this error code.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InvalidRequest => "invalid_request",
			Self::UnauthorizedClient => "unauthorized_client",
			Self::AccessDenied => "access_denied",
			Self::UnsupportedResponseType => "unsupported_response_type",
			Self::InvalidScope => "invalid_scope",
			Self::ServerError => "server_error",
			Self::TemporarilyUnavailable => "temporarily_unavailable",
		}
	}
}
