use http::HeaderValue;
use str_newtype::StrNewType;

use super::is_vschar;

/// An access token (borrowed).
///
/// Bearer credential returned by the token endpoint and presented in the
/// `Authorization` header of Web API calls. Held in memory only for the
/// session; this crate never persists it.
///
/// # Grammar
///
/// ```abnf
/// access-token = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(AccessTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct AccessToken(str);

impl AccessToken {
	/// Validates that the given string is a well-formed access token.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed access token.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_vschar(bytes[i]) {
				return false;
			}

			i += 1
		}

		i > 0
	}

	/// Returns the `Authorization` header value for this token, using the
	/// `Bearer` scheme.
	pub fn authorization_header(&self) -> HeaderValue {
		format!("Bearer {}", self.as_str())
			.try_into()
			// UNWRAP SAFETY: VSCHAR-validated tokens are valid header values.
			.unwrap()
	}
}
