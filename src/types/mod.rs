//! Core protocol string types.
//!
//! This module defines the validated string types exchanged with the Spotify
//! accounts service, each checked against the grammar specified in
//! [RFC 6749](https://datatracker.ietf.org/doc/html/rfc6749).
//!
//! All types come in borrowed/owned pairs (e.g. [`AccessToken`] /
//! [`AccessTokenBuf`]) following the same pattern as [`str`] / [`String`].
mod access_token;
mod client_id;
mod code;
mod scope;

pub use access_token::*;
pub use client_id::*;
pub use code::*;
pub use scope::*;

/// Returns `true` if the byte is a VSCHAR (visible ASCII character plus
/// space), i.e. in the range `0x20..=0x7E`.
const fn is_vschar(c: u8) -> bool {
	c >= 0x20 && c <= 0x7e
}

/// Returns `true` if the byte is an NQCHAR (visible ASCII character
/// excluding space, `"` and `\`).
const fn is_nqchar(c: u8) -> bool {
	matches!(c, 0x21 | 0x23..=0x5b | 0x5d..=0x7e)
}
