//! Pure mapping from API records to renderable view models.
//!
//! Rendering is a function from a data record to a view model; how the view
//! model reaches the screen is the embedder's concern. Nothing here performs
//! I/O.
use crate::api::{ProfileRecord, TrackRecord};

/// A labelled line of profile detail, optionally linking somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
	pub label: &'static str,
	pub value: String,
	pub link: Option<String>,
}

/// Renderable form of a [`ProfileRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
	/// "Logged in as …" heading; falls back to the user id when no display
	/// name is set.
	pub heading: String,

	/// Avatar image URL, when the profile has one.
	pub avatar_url: Option<String>,

	/// Detail lines, in display order. Absent record fields produce no
	/// line.
	pub details: Vec<DetailLine>,
}

impl ProfileView {
	pub fn from_record(record: &ProfileRecord) -> Self {
		let name = record.display_name.as_deref().unwrap_or(&record.id);
		let avatar_url = record.images.first().map(|image| image.url.clone());

		let mut details = vec![DetailLine {
			label: "User ID",
			value: record.id.clone(),
			link: None,
		}];

		if let Some(email) = &record.email {
			details.push(DetailLine {
				label: "Email",
				value: email.clone(),
				link: None,
			});
		}

		details.push(DetailLine {
			label: "Spotify URI",
			value: record.uri.clone(),
			link: record.external_urls.spotify.clone(),
		});

		details.push(DetailLine {
			label: "Link",
			value: record.href.clone(),
			link: Some(record.href.clone()),
		});

		if let Some(url) = &avatar_url {
			details.push(DetailLine {
				label: "Profile Image",
				value: url.clone(),
				link: None,
			});
		}

		Self {
			heading: format!("Logged in as {name}"),
			avatar_url,
			details,
		}
	}
}

/// Renderable form of a [`TrackRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackView {
	pub title: String,

	/// Artist names joined with `, `.
	pub artist_line: String,

	/// Album art URL, when the album has one.
	pub artwork_url: Option<String>,

	/// "Play on Spotify" link target.
	pub play_url: Option<String>,

	/// 30-second preview clip URL.
	pub preview_url: Option<String>,
}

impl TrackView {
	pub fn from_record(record: &TrackRecord) -> Self {
		let artist_line = record
			.artists
			.iter()
			.map(|artist| artist.name.as_str())
			.collect::<Vec<_>>()
			.join(", ");

		Self {
			title: record.name.clone(),
			artist_line,
			artwork_url: record.album.images.first().map(|image| image.url.clone()),
			play_url: record.external_urls.spotify.clone(),
			preview_url: record.preview_url.clone(),
		}
	}
}
