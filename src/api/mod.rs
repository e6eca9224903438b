//! Authenticated Web API calls and their response records.
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	AccessToken,
	endpoints::{PROFILE_URI, SEARCH_URI},
	error::AuthError,
	transport::{APPLICATION_JSON, HttpClient, expect_content_type},
	util::extend_uri_query,
};

pub mod view;

/// The authenticated user's profile.
///
/// See: <https://developer.spotify.com/documentation/web-api/reference/get-current-users-profile>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
	/// Display name, absent when the user has not set one.
	pub display_name: Option<String>,

	#[serde(default)]
	pub images: Vec<ImageRecord>,

	/// Spotify user id.
	pub id: String,

	/// Requires the `user-read-email` scope.
	pub email: Option<String>,

	/// Spotify URI (`spotify:user:…`).
	pub uri: String,

	#[serde(default)]
	pub external_urls: ExternalUrls,

	/// Web API endpoint of this profile.
	pub href: String,
}

/// An image in one of the standard catalog sizes.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
	pub url: String,
	pub height: Option<u32>,
	pub width: Option<u32>,
}

/// Known external URLs for an object.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
	/// Open Spotify page of the object.
	pub spotify: Option<String>,
}

/// A track from a catalog search.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
	pub name: String,

	#[serde(default)]
	pub artists: Vec<ArtistRecord>,

	#[serde(default)]
	pub album: AlbumRecord,

	#[serde(default)]
	pub external_urls: ExternalUrls,

	/// 30-second preview clip, not available for every track.
	pub preview_url: Option<String>,

	pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
	pub name: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
	pub name: Option<String>,

	#[serde(default)]
	pub images: Vec<ImageRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
	#[serde(default)]
	items: Vec<TrackRecord>,
}

#[skip_serializing_none]
#[derive(Serialize)]
struct SearchQuery<'a> {
	q: &'a str,
	#[serde(rename = "type")]
	kind: &'a str,
	limit: Option<u8>,
}

/// Fetches the authenticated user's profile.
///
/// Fails with [`AuthError::Unauthorized`] when the resource server rejects
/// the token (401), [`AuthError::Network`] on transport failure, and
/// [`AuthError::MalformedResponse`] when the body cannot be parsed.
pub async fn fetch_profile(
	http_client: &impl HttpClient,
	token: &AccessToken,
) -> Result<ProfileRecord, AuthError> {
	let request = http::Request::builder()
		.method(http::Method::GET)
		.uri(PROFILE_URI.as_str())
		.header(http::header::AUTHORIZATION, token.authorization_header())
		.body(Vec::new())
		// UNWRAP SAFETY: request parts are statically valid.
		.unwrap();

	decode_resource(http_client.send(request).await?)
}

/// Searches the catalog for tracks matching `query`.
pub async fn search_tracks(
	http_client: &impl HttpClient,
	token: &AccessToken,
	query: &str,
	limit: Option<u8>,
) -> Result<Vec<TrackRecord>, AuthError> {
	let mut uri = SEARCH_URI.to_owned();
	extend_uri_query(
		&mut uri,
		SearchQuery {
			q: query,
			kind: "track",
			limit,
		},
	);

	let request = http::Request::builder()
		.method(http::Method::GET)
		.uri(uri.as_str())
		.header(http::header::AUTHORIZATION, token.authorization_header())
		.body(Vec::new())
		// UNWRAP SAFETY: request parts are statically valid.
		.unwrap();

	let response: SearchResponse = decode_resource(http_client.send(request).await?)?;
	Ok(response.tracks.items)
}

fn decode_resource<T: serde::de::DeserializeOwned>(
	response: http::Response<Vec<u8>>,
) -> Result<T, AuthError> {
	let status = response.status();

	if status == http::StatusCode::UNAUTHORIZED {
		log::error!("resource server rejected the access token");
		return Err(AuthError::Unauthorized);
	}

	if !status.is_success() {
		return Err(AuthError::server(status));
	}

	expect_content_type(response.headers(), &APPLICATION_JSON)?;

	serde_json::from_slice(response.body()).map_err(AuthError::malformed)
}
