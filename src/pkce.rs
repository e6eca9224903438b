//! Proof Key for Code Exchange by OAuth Public Clients
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc7636>
use std::{borrow::Cow, str::FromStr};

use base64::{Engine, prelude::BASE64_STANDARD};
use rand::{RngExt, rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use str_newtype::StrNewType;

/// Alphabet used for generated code verifiers.
const VERIFIER_CHARS: &[u8; 62] =
	b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Code Verifier.
///
/// The high-entropy secret generated by the client before the authorization
/// redirect. It is never transmitted until the token exchange, where the
/// server hashes it and compares the result against the challenge received
/// with the authorization request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.1>
///
/// # Grammar
///
/// ```abnf
/// code-verifier = 43*128unreserved
/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
/// ALPHA = %x41-5A / %x61-7A
/// DIGIT = %x30-39
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(PkceCodeVerifierBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct PkceCodeVerifier(str);

impl PkceCodeVerifier {
	/// Validates that the given string is a well-formed PKCE code verifier.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed PKCE code
	/// verifier.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		validate_verifier_or_challenge(bytes)
	}
}

impl PkceCodeVerifierBuf {
	/// Generates a new random code verifier of exactly `length` alphanumeric
	/// characters, drawn from a cryptographically secure random source.
	///
	/// Selection by byte modulo 62 carries a slight bias toward the start of
	/// the alphabet; acceptable at this entropy level.
	///
	/// # Panics
	///
	/// Panics if `length` is outside the range 43 to 128 permitted by
	/// [RFC 7636](https://tools.ietf.org/html/rfc7636), rather than silently
	/// truncating.
	pub fn generate(length: usize) -> Self {
		assert!((43..=128).contains(&length));
		let value: String = (0..length)
			.map(|_| VERIFIER_CHARS[(rng().random::<u8>() % 62) as usize] as char)
			.collect();
		// SAFETY: `value` is alphanumeric with a length in 43..=128.
		unsafe { Self::new_unchecked(value) }
	}
}

/// Code Challenge.
///
/// The public value derived from the code verifier and sent with the
/// authorization request via the `code_challenge` parameter. Never stored.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.2>
///
/// # Grammar
///
/// ```abnf
/// code-challenge = 43*128unreserved
/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
/// ALPHA = %x41-5A / %x61-7A
/// DIGIT = %x30-39
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(PkceCodeChallengeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct PkceCodeChallenge(str);

impl PkceCodeChallenge {
	/// Validates that the given string is a well-formed PKCE code challenge.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed PKCE code
	/// challenge.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		validate_verifier_or_challenge(bytes)
	}
}

impl<'a> From<&'a PkceCodeVerifier> for &'a PkceCodeChallenge {
	fn from(value: &'a PkceCodeVerifier) -> Self {
		unsafe {
			// SAFETY: Code challenge and verifier have the same grammar.
			PkceCodeChallenge::new_unchecked(value)
		}
	}
}

/// Error returned when parsing an invalid PKCE code challenge method string.
#[derive(Debug, thiserror::Error)]
#[error("invalid PKCE `code_challenge_method` value")]
pub struct InvalidPkceCodeChallengeMethod;

/// String representation of the `plain` code challenge method.
pub const PKCE_CODE_CHALLENGE_METHOD_PLAIN: &str = "plain";

/// String representation of the `S256` code challenge method.
pub const PKCE_CODE_CHALLENGE_METHOD_S256: &str = "S256";

/// PKCE code challenge method.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PkceCodeChallengeMethod {
	/// The code challenge is the plain code verifier (not recommended).
	Plain,

	/// The code challenge is the encoded SHA-256 hash of the code verifier.
	S256,
}

impl PkceCodeChallengeMethod {
	/// Transforms a code verifier into a code challenge using this method.
	///
	/// The `S256` transform hashes the UTF-8 bytes of the verifier with
	/// SHA-256 and encodes the digest with [`s256_encode`]. The result is
	/// deterministic: equal verifiers always yield equal challenges.
	pub fn transform<'a>(&self, code_verifier: &'a PkceCodeVerifier) -> Cow<'a, PkceCodeChallenge> {
		match self {
			Self::Plain => Cow::Borrowed(code_verifier.into()),
			Self::S256 => {
				let encoded = s256_encode(&Sha256::digest(code_verifier));
				// SAFETY: `s256_encode` yields 43 characters, all
				//         alphanumeric or `-`.
				Cow::Owned(unsafe { PkceCodeChallengeBuf::new_unchecked(encoded) })
			}
		}
	}

	/// Returns the string representation of this method.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Plain => PKCE_CODE_CHALLENGE_METHOD_PLAIN,
			Self::S256 => PKCE_CODE_CHALLENGE_METHOD_S256,
		}
	}
}

/// Encodes a digest as Base64 with `+` and `/` both substituted by `-` and
/// trailing `=` padding stripped.
///
/// Both non-alphanumeric Base64 characters map to the same replacement; this
/// intentionally differs from the standard URL-safe alphabet, which maps `/`
/// to `_`.
fn s256_encode(digest: &[u8]) -> String {
	BASE64_STANDARD
		.encode(digest)
		.chars()
		.filter_map(|c| match c {
			'+' | '/' => Some('-'),
			'=' => None,
			c => Some(c),
		})
		.collect()
}

impl FromStr for PkceCodeChallengeMethod {
	type Err = InvalidPkceCodeChallengeMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			PKCE_CODE_CHALLENGE_METHOD_PLAIN => Ok(Self::Plain),
			PKCE_CODE_CHALLENGE_METHOD_S256 => Ok(Self::S256),
			_ => Err(InvalidPkceCodeChallengeMethod),
		}
	}
}

impl Serialize for PkceCodeChallengeMethod {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.as_str().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for PkceCodeChallengeMethod {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer)?
			.parse()
			.map_err(serde::de::Error::custom)
	}
}

/// Code challenge and method pair, serialized into the authorization request
/// as the `code_challenge` and `code_challenge_method` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PkceCodeChallengeAndMethod {
	#[serde(rename = "code_challenge")]
	pub challenge: PkceCodeChallengeBuf,

	#[serde(rename = "code_challenge_method")]
	pub method: PkceCodeChallengeMethod,
}

impl PkceCodeChallengeAndMethod {
	/// Derives a challenge from the given verifier using the given method.
	pub fn from_code_verifier(
		code_verifier: &PkceCodeVerifier,
		method: PkceCodeChallengeMethod,
	) -> Self {
		Self {
			challenge: method.transform(code_verifier).into_owned(),
			method,
		}
	}

	/// Derives a SHA-256 challenge from the given verifier.
	pub fn from_code_verifier_sha256(code_verifier: &PkceCodeVerifier) -> Self {
		Self::from_code_verifier(code_verifier, PkceCodeChallengeMethod::S256)
	}

	/// Returns the PKCE code challenge as a string.
	pub fn as_str(&self) -> &str {
		&self.challenge
	}

	/// Returns the PKCE code challenge method.
	pub fn method(&self) -> &PkceCodeChallengeMethod {
		&self.method
	}
}

const fn validate_verifier_or_challenge(bytes: &[u8]) -> bool {
	if bytes.len() < 43 || bytes.len() > 128 {
		return false;
	}

	let mut i = 0;

	while i < bytes.len() {
		if !bytes[i].is_ascii_alphanumeric() && !matches!(bytes[i], b'-' | b'.' | b'_' | b'~') {
			return false;
		}

		i += 1
	}

	true
}

#[cfg(test)]
mod tests {
	use super::*;

	// 43 characters of valid unreserved chars.
	const MIN_VALID: &str = "abcdefghijklmnopqrstuvwxyz01234567890123456";

	// --- generation ---

	#[test]
	fn generated_verifier_has_exact_length() {
		for length in [43, 64, 96, 128] {
			let verifier = PkceCodeVerifierBuf::generate(length);
			assert_eq!(verifier.as_str().len(), length);
		}
	}

	#[test]
	fn generated_verifier_is_alphanumeric() {
		let verifier = PkceCodeVerifierBuf::generate(128);
		assert!(verifier.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
	}

	#[test]
	fn generated_verifier_is_valid() {
		let verifier = PkceCodeVerifierBuf::generate(128);
		assert!(PkceCodeVerifier::new(verifier.as_str()).is_ok());
	}

	#[test]
	fn generated_verifiers_differ() {
		let a = PkceCodeVerifierBuf::generate(128);
		let b = PkceCodeVerifierBuf::generate(128);
		assert_ne!(a, b);
	}

	#[test]
	#[should_panic]
	fn generate_rejects_short_length() {
		PkceCodeVerifierBuf::generate(42);
	}

	#[test]
	#[should_panic]
	fn generate_rejects_long_length() {
		PkceCodeVerifierBuf::generate(129);
	}

	// --- challenge transform ---

	#[test]
	fn s256_challenge_is_deterministic() {
		let verifier = PkceCodeVerifier::new(MIN_VALID).unwrap();
		let a = PkceCodeChallengeMethod::S256.transform(verifier);
		let b = PkceCodeChallengeMethod::S256.transform(verifier);
		assert_eq!(a, b);
	}

	#[test]
	fn s256_challenge_has_no_base64_specials() {
		for _ in 0..16 {
			let verifier = PkceCodeVerifierBuf::generate(128);
			let challenge = PkceCodeChallengeMethod::S256.transform(&verifier);
			assert!(!challenge.as_str().contains('+'));
			assert!(!challenge.as_str().contains('/'));
			assert!(!challenge.as_str().contains('='));
		}
	}

	#[test]
	fn s256_encode_known_digest() {
		// SHA-256("abc123"), the reference vector for the encoding step.
		let digest = Sha256::digest(b"abc123");
		assert_eq!(
			s256_encode(&digest),
			"bKE9UspwyIPg8LsQHkJaiehiTeUdstI5JZOvaoQRgJA"
		);
	}

	#[test]
	fn s256_challenge_known_verifier() {
		// "abc123" padded with `x` up to the 43-character minimum.
		let verifier = PkceCodeVerifier::new(
			"abc123xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
		)
		.unwrap();
		let challenge = PkceCodeChallengeMethod::S256.transform(verifier);
		assert_eq!(
			challenge.as_str(),
			"Js3IfH8joe4yuSaQIYh1dMFMYEwLVa-5vcwG-yp-bDQ"
		);
	}

	#[test]
	fn s256_maps_plus_to_dash() {
		let verifier = PkceCodeVerifier::new(MIN_VALID).unwrap();
		let challenge = PkceCodeChallengeMethod::S256.transform(verifier);
		// Plain Base64 of this digest is `u8TGNi3sPNDodh8+YpQ8nLwueew+shRqUmtTP5TU5xo=`.
		assert_eq!(
			challenge.as_str(),
			"u8TGNi3sPNDodh8-YpQ8nLwueew-shRqUmtTP5TU5xo"
		);
	}

	#[test]
	fn s256_maps_slash_to_dash() {
		// The standard URL-safe alphabet would give `_` for the `/` in this
		// digest; this encoding maps both `+` and `/` to `-`.
		let s = "a".repeat(43);
		let verifier = PkceCodeVerifier::new(&s).unwrap();
		let challenge = PkceCodeChallengeMethod::S256.transform(verifier);
		assert_eq!(
			challenge.as_str(),
			"ZtNPunH49FD35FWYhT5Tv8I7vRKQJ8uxMaL0-9eHjNA"
		);
	}

	#[test]
	fn plain_challenge_equals_verifier() {
		let verifier = PkceCodeVerifierBuf::generate(64);
		let challenge = PkceCodeChallengeAndMethod::from_code_verifier(
			&verifier,
			PkceCodeChallengeMethod::Plain,
		);
		assert_eq!(challenge.as_str(), verifier.as_str());
	}

	#[test]
	fn sha256_challenge_is_valid() {
		let verifier = PkceCodeVerifierBuf::generate(128);
		let challenge = PkceCodeChallengeAndMethod::from_code_verifier_sha256(&verifier);
		assert_eq!(challenge.method, PkceCodeChallengeMethod::S256);
		assert!(PkceCodeChallenge::new(challenge.as_str()).is_ok());
	}

	// --- grammar ---

	#[test]
	fn valid_verifier() {
		assert!(PkceCodeVerifier::new(MIN_VALID).is_ok());
	}

	#[test]
	fn verifier_too_short() {
		// 42 characters, one below minimum.
		assert!(PkceCodeVerifier::new(&MIN_VALID[..42]).is_err());
	}

	#[test]
	fn verifier_too_long() {
		// 129 characters, one above maximum.
		let long = "a".repeat(129);
		assert!(PkceCodeVerifier::new(&long).is_err());
	}

	#[test]
	fn verifier_max_length() {
		let max = "a".repeat(128);
		assert!(PkceCodeVerifier::new(&max).is_ok());
	}

	#[test]
	fn verifier_allows_unreserved_chars() {
		let s = "abcdefghijklmnopqrstuvwxyz-._~ABCDEFGHIJKLMN";
		assert!(PkceCodeVerifier::new(s).is_ok());
	}

	#[test]
	fn verifier_rejects_invalid_chars() {
		let mut bytes = MIN_VALID.as_bytes().to_vec();
		bytes[0] = b' ';
		let s = String::from_utf8(bytes).unwrap();
		assert!(PkceCodeVerifier::new(&s).is_err());
	}

	#[test]
	fn challenge_rejects_plus() {
		let mut bytes = MIN_VALID.as_bytes().to_vec();
		bytes[0] = b'+';
		let s = String::from_utf8(bytes).unwrap();
		assert!(PkceCodeChallenge::new(&s).is_err());
	}

	// --- PkceCodeChallengeMethod ---

	#[test]
	fn parse_challenge_method() {
		assert_eq!(
			"S256".parse::<PkceCodeChallengeMethod>().unwrap(),
			PkceCodeChallengeMethod::S256,
		);
		assert_eq!(
			"plain".parse::<PkceCodeChallengeMethod>().unwrap(),
			PkceCodeChallengeMethod::Plain,
		);
		assert!("invalid".parse::<PkceCodeChallengeMethod>().is_err());
	}

	#[test]
	fn challenge_method_as_str() {
		assert_eq!(PkceCodeChallengeMethod::S256.as_str(), "S256");
		assert_eq!(PkceCodeChallengeMethod::Plain.as_str(), "plain");
	}
}
