//! Spotify Web API client using the [OAuth 2.0 Authorization Code flow with
//! PKCE][pkce-flow].
//!
//! This crate implements the client half of the [RFC 7636][rfc7636] handshake
//! against the Spotify accounts service, then uses the resulting bearer token
//! to call the [Spotify Web API][web-api]:
//!
//! 1. generate a high-entropy code verifier and derive its code challenge,
//! 2. build the authorization redirect URL and persist the verifier across
//!    the navigation boundary,
//! 3. exchange the authorization code (plus the stored verifier) for an
//!    access token,
//! 4. fetch the authenticated user's profile and track search results.
//!
//! # Modules
//!
//! - [`api`] — Authenticated resource calls (profile, track search) and
//!   pure view-model mapping.
//! - [`config`] — Client configuration (client id, redirect URI, scope).
//! - [`endpoints`] — Authorization and token endpoint requests.
//! - [`error`] — Error taxonomy for every step of the flow.
//! - [`flow`] — The authorization flow state machine.
//! - [`pkce`] — Code verifier and code challenge types ([RFC 7636][rfc7636]).
//! - [`store`] — Verifier persistence across the redirect boundary.
//! - [`transport`] — HTTP transport layer and client abstraction.
//! - [`util`] — URI query string utilities.
//!
//! Core protocol types ([`AccessToken`], [`ClientId`], [`Code`], [`Scope`],
//! etc.) are re-exported at the crate root.
//!
//! [pkce-flow]: https://developer.spotify.com/documentation/web-api/tutorials/code-pkce-flow
//! [rfc7636]: https://datatracker.ietf.org/doc/html/rfc7636
//! [web-api]: https://developer.spotify.com/documentation/web-api
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;

pub mod api;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod flow;
pub mod pkce;
pub mod store;
pub mod transport;
mod types;
pub mod util;

pub use types::*;
