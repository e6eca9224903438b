//! HTTP transport layer, content type encoding, and client abstraction.
use http::{HeaderMap, HeaderValue, header};
use serde::Serialize;

use crate::error::AuthError;

#[cfg(feature = "reqwest")]
mod reqwest;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Asynchronous HTTP client over plain byte-vector requests and responses.
///
/// The flow is transport-agnostic: any client able to carry an
/// [`http::Request`] can drive it. A [`reqwest::Client`] implementation is
/// available behind the `reqwest` cargo feature.
pub trait HttpClient {
	#[allow(async_fn_in_trait)]
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, AuthError>;
}

impl<T> HttpClient for &T
where
	T: HttpClient,
{
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, AuthError> {
		T::send(*self, request).await
	}
}

/// Validates that the response `Content-Type` header matches the expected
/// value.
///
/// Returns an error if the header is missing or does not match.
pub fn expect_content_type(
	headers: &HeaderMap,
	expected_value: &HeaderValue,
) -> ::std::result::Result<(), AuthError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.ok_or_else(|| AuthError::malformed("missing content type"))?;

	if !content_type
		.as_bytes()
		.starts_with(expected_value.as_bytes())
	{
		Err(AuthError::malformed("unexpected content type"))
	} else {
		Ok(())
	}
}

/// Trait for encoding request bodies with a specific content type.
pub trait ContentType {
	/// Serializes the given value into a byte vector using this content
	/// type's encoding.
	fn encode<T: Serialize>(value: &T) -> Vec<u8>;
}

/// URL-encoded form (`application/x-www-form-urlencoded`) content type
/// encoding.
pub struct WwwFormUrlEncoded;

impl ContentType for WwwFormUrlEncoded {
	fn encode<T: Serialize>(value: &T) -> Vec<u8> {
		log::debug!("serializing {}", std::any::type_name_of_val(value));
		serde_html_form::to_string(value).unwrap().into_bytes()
	}
}
