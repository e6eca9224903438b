//! End-to-end authorization flow tests over a scripted HTTP client.
use std::{
	collections::{BTreeMap, VecDeque},
	sync::Mutex,
};

use spotify_pkce::{
	ClientIdBuf,
	api::view::ProfileView,
	config::Config,
	endpoints::authorization::CallbackParams,
	error::AuthError,
	flow::{AuthorizationCodeFlow, FlowStage},
	pkce::{PkceCodeChallengeMethod, PkceCodeVerifier},
	store::{MemoryStore, VerifierStore},
	transport::HttpClient,
};

/// Replays a fixed sequence of responses and records every request sent.
#[derive(Default)]
struct ScriptedClient {
	responses: Mutex<VecDeque<http::Response<Vec<u8>>>>,
	requests: Mutex<Vec<http::Request<Vec<u8>>>>,
}

impl ScriptedClient {
	fn respond(self, status: u16, content_type: &'static str, body: &str) -> Self {
		self.responses.lock().unwrap().push_back(
			http::Response::builder()
				.status(status)
				.header(http::header::CONTENT_TYPE, content_type)
				.body(body.as_bytes().to_vec())
				.unwrap(),
		);
		self
	}

	fn requests(&self) -> std::sync::MutexGuard<'_, Vec<http::Request<Vec<u8>>>> {
		self.requests.lock().unwrap()
	}
}

impl HttpClient for ScriptedClient {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, AuthError> {
		self.requests.lock().unwrap().push(request);
		self.responses
			.lock()
			.unwrap()
			.pop_front()
			.ok_or_else(|| AuthError::network("no scripted response left"))
	}
}

fn flow() -> AuthorizationCodeFlow<MemoryStore> {
	let config = Config::new(ClientIdBuf::new("my-client".to_owned()).unwrap());
	AuthorizationCodeFlow::new(config, MemoryStore::new())
}

fn form_params(body: &[u8]) -> BTreeMap<String, String> {
	serde_html_form::from_bytes(body).unwrap()
}

#[tokio::test]
async fn full_flow_exchanges_stored_verifier() {
	let client = ScriptedClient::default().respond(
		200,
		"application/json",
		r#"{"access_token": "tok_1", "token_type": "Bearer", "expires_in": 3600}"#,
	);

	let mut flow = flow();
	let redirect = flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=AQDXmd2Dl8").unwrap())
		.unwrap();

	let token = flow.exchange(&client).await.unwrap();
	assert_eq!(token.as_str(), "tok_1");
	assert_eq!(flow.stage(), FlowStage::Authenticated);
	assert_eq!(flow.access_token().map(|t| t.as_str()), Some("tok_1"));

	let requests = client.requests();
	assert_eq!(requests.len(), 1);
	let request = &requests[0];
	assert_eq!(request.method(), http::Method::POST);
	assert_eq!(request.uri(), "https://accounts.spotify.com/api/token");

	// The exchanged verifier must hash to the challenge sent with the
	// redirect.
	let params = form_params(request.body());
	assert_eq!(params["grant_type"], "authorization_code");
	assert_eq!(params["code"], "AQDXmd2Dl8");
	let verifier = PkceCodeVerifier::new(&params["code_verifier"]).unwrap();
	let challenge = PkceCodeChallengeMethod::S256.transform(verifier);
	assert!(redirect.as_str().contains(challenge.as_str()));
}

#[tokio::test]
async fn rejected_exchange_resets_the_flow() {
	let client = ScriptedClient::default().respond(
		400,
		"application/json",
		r#"{"error": "invalid_grant", "error_description": "Invalid authorization code"}"#,
	);

	let mut flow = flow();
	flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=expired").unwrap())
		.unwrap();

	let err = flow.exchange(&client).await.unwrap_err();
	assert!(matches!(
		err,
		AuthError::TokenExchange(payload) if payload.error == "invalid_grant"
	));
	assert_eq!(flow.stage(), FlowStage::Unauthenticated);
	assert!(flow.access_token().is_none());
}

#[tokio::test]
async fn exchange_without_stored_verifier_sends_nothing() {
	let config = Config::new(ClientIdBuf::new("my-client".to_owned()).unwrap());
	let store = MemoryStore::new();
	let client = ScriptedClient::default();

	let mut flow = AuthorizationCodeFlow::new(config, &store);
	flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=AQDXmd2Dl8").unwrap())
		.unwrap();

	// Another consumer drains the slot before the exchange runs.
	store.take().unwrap().unwrap();

	let err = flow.exchange(&client).await.unwrap_err();
	assert!(matches!(err, AuthError::MissingVerifier));
	assert_eq!(flow.stage(), FlowStage::Unauthenticated);
	assert!(client.requests().is_empty());
}

#[tokio::test]
async fn denied_callback_never_reaches_the_token_endpoint() {
	let config = Config::new(ClientIdBuf::new("my-client".to_owned()).unwrap());
	let store = MemoryStore::new();
	let client = ScriptedClient::default();

	let mut flow = AuthorizationCodeFlow::new(config, &store);
	flow.begin().unwrap();
	let err = flow
		.callback(
			CallbackParams::from_query("error=access_denied&error_description=User%20declined")
				.unwrap(),
		)
		.unwrap_err();
	assert!(matches!(err, AuthError::Callback(_)));

	let err = flow.exchange(&client).await.unwrap_err();
	assert!(matches!(err, AuthError::Callback(_)));
	assert!(client.requests().is_empty());

	// The failed exchange drops the verifier written by `begin`.
	assert!(store.take().unwrap().is_none());
}

#[tokio::test]
async fn profile_requires_authentication() {
	let client = ScriptedClient::default();
	let flow = flow();

	let err = flow.profile(&client).await.unwrap_err();
	assert!(matches!(err, AuthError::Unauthorized));
	assert!(client.requests().is_empty());
}

#[tokio::test]
async fn profile_after_exchange_renders() {
	let client = ScriptedClient::default()
		.respond(200, "application/json", r#"{"access_token": "tok_1"}"#)
		.respond(
			200,
			"application/json",
			r#"{
				"display_name": "Teboho",
				"images": [],
				"id": "teboho",
				"email": "teboho@example.com",
				"uri": "spotify:user:teboho",
				"external_urls": {"spotify": "https://open.spotify.com/user/teboho"},
				"href": "https://api.spotify.com/v1/users/teboho"
			}"#,
		);

	let mut flow = flow();
	flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=AQDXmd2Dl8").unwrap())
		.unwrap();
	flow.exchange(&client).await.unwrap();

	let profile = flow.profile(&client).await.unwrap();
	let view = ProfileView::from_record(&profile);
	assert_eq!(view.heading, "Logged in as Teboho");

	let requests = client.requests();
	let request = &requests[1];
	assert_eq!(request.uri(), "https://api.spotify.com/v1/me");
	assert_eq!(
		request.headers()[http::header::AUTHORIZATION],
		"Bearer tok_1"
	);
}

#[tokio::test]
async fn revoked_token_surfaces_as_unauthorized() {
	let client = ScriptedClient::default()
		.respond(200, "application/json", r#"{"access_token": "tok_1"}"#)
		.respond(
			401,
			"application/json",
			r#"{"error": {"status": 401, "message": "The access token expired"}}"#,
		);

	let mut flow = flow();
	flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=AQDXmd2Dl8").unwrap())
		.unwrap();
	flow.exchange(&client).await.unwrap();

	let err = flow.profile(&client).await.unwrap_err();
	assert!(matches!(err, AuthError::Unauthorized));
	// The flow keeps its token; no logout transition exists.
	assert_eq!(flow.stage(), FlowStage::Authenticated);
}

#[tokio::test]
async fn track_search_builds_query_and_parses_items() {
	let client = ScriptedClient::default()
		.respond(200, "application/json", r#"{"access_token": "tok_1"}"#)
		.respond(
			200,
			"application/json",
			r#"{
				"tracks": {
					"items": [{
						"name": "Khona",
						"artists": [{"name": "Mafikizolo"}, {"name": "Uhuru"}],
						"album": {"images": [{"url": "https://i.scdn.co/image/art"}]},
						"external_urls": {"spotify": "https://open.spotify.com/track/xyz"},
						"preview_url": null
					}]
				}
			}"#,
		);

	let mut flow = flow();
	flow.begin().unwrap();
	flow.callback(CallbackParams::from_query("code=AQDXmd2Dl8").unwrap())
		.unwrap();
	flow.exchange(&client).await.unwrap();

	let tracks = flow.search_tracks(&client, "khona", Some(5)).await.unwrap();
	assert_eq!(tracks.len(), 1);
	assert_eq!(tracks[0].name, "Khona");

	let requests = client.requests();
	let uri = requests[1].uri().to_string();
	assert!(uri.starts_with("https://api.spotify.com/v1/search?"));
	let params: BTreeMap<String, String> =
		serde_html_form::from_str(uri.split_once('?').unwrap().1).unwrap();
	assert_eq!(params["q"], "khona");
	assert_eq!(params["type"], "track");
	assert_eq!(params["limit"], "5");
}
