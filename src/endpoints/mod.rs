//! Spotify accounts service and Web API endpoints.
//!
//! All upstream collaborators are fixed:
//!
//! - [`AUTHORIZATION_URI`] — user-agent redirect target starting the flow.
//! - [`TOKEN_URI`] — authorization code + verifier exchange.
//! - [`PROFILE_URI`] / [`SEARCH_URI`] — protected resources.
use iref::{Uri, uri};

pub mod authorization;
pub mod token;

/// Spotify authorization endpoint.
pub const AUTHORIZATION_URI: &Uri = uri!("https://accounts.spotify.com/authorize");

/// Spotify token endpoint.
pub const TOKEN_URI: &Uri = uri!("https://accounts.spotify.com/api/token");

/// Current user's profile resource.
pub const PROFILE_URI: &Uri = uri!("https://api.spotify.com/v1/me");

/// Catalog search resource.
pub const SEARCH_URI: &Uri = uri!("https://api.spotify.com/v1/search");
