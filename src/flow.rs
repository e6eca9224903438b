//! Authorization Code flow orchestration.
//!
//! The flow crosses a full navigation boundary: [`begin`] runs before the
//! user agent leaves for the authorization endpoint, and the remaining steps
//! run when it comes back to the callback, possibly in a fresh process. The
//! code verifier is the only state carried across that boundary, through a
//! [`VerifierStore`].
//!
//! Only one flow can be in flight per store: a second [`begin`] overwrites
//! the shared verifier slot and the first flow's exchange is then rejected
//! upstream.
//!
//! [`begin`]: AuthorizationCodeFlow::begin
use iref::UriBuf;

use crate::{
	AccessToken, AccessTokenBuf, CodeBuf,
	api::{self, ProfileRecord, TrackRecord},
	config::Config,
	endpoints::{
		authorization::{AuthorizationRequest, CallbackParams, ResponseType},
		token::{TokenRequest, request_token},
	},
	error::AuthError,
	pkce::{PkceCodeChallengeAndMethod, PkceCodeVerifierBuf},
	store::VerifierStore,
	transport::HttpClient,
};

/// Observable stage of an [`AuthorizationCodeFlow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowStage {
	/// Initial state; also re-entered when any step fails.
	#[default]
	Unauthenticated,

	/// The authorization URL has been handed out; the user agent is
	/// expected to navigate away.
	AwaitingRedirect,

	/// The callback delivered an authorization code, not yet exchanged.
	AwaitingCallback,

	/// The token request is in flight.
	ExchangingCode,

	/// An access token is held. Terminal: no logout or refresh transition
	/// exists.
	Authenticated,
}

/// Drives one instance of the Authorization Code flow with PKCE.
pub struct AuthorizationCodeFlow<S> {
	config: Config,
	store: S,
	stage: FlowStage,
	code: Option<CodeBuf>,
	access_token: Option<AccessTokenBuf>,
}

impl<S> AuthorizationCodeFlow<S>
where
	S: VerifierStore,
{
	/// Creates an unauthenticated flow over the given verifier store.
	pub fn new(config: Config, store: S) -> Self {
		Self {
			config,
			store,
			stage: FlowStage::default(),
			code: None,
			access_token: None,
		}
	}

	/// Current stage of the flow.
	pub fn stage(&self) -> FlowStage {
		self.stage
	}

	/// The access token held after a successful exchange.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.access_token.as_deref()
	}

	/// Starts the flow: generates a fresh code verifier, persists it, and
	/// returns the authorization URL to navigate the user agent to.
	///
	/// The verifier is written to the store *before* the URL is handed out;
	/// a storage failure surfaces here rather than after navigation, when
	/// the exchange could never complete.
	pub fn begin(&mut self) -> Result<UriBuf, AuthError> {
		let verifier = PkceCodeVerifierBuf::generate(self.config.verifier_length);
		let pkce = PkceCodeChallengeAndMethod::from_code_verifier_sha256(&verifier);

		self.store.put(&verifier)?;

		let uri = AuthorizationRequest {
			client_id: &self.config.client_id,
			response_type: ResponseType::Code,
			redirect_uri: &self.config.redirect_uri,
			scope: &self.config.scope,
			pkce: &pkce,
		}
		.to_uri();

		self.stage = FlowStage::AwaitingRedirect;
		log::info!("authorization flow started; awaiting redirect");
		Ok(uri)
	}

	/// Records the outcome of the redirect callback.
	///
	/// An error redirect (e.g. `error=access_denied`) or a redirect without
	/// a code resets the flow and fails with [`AuthError::Callback`].
	pub fn callback(&mut self, params: CallbackParams) -> Result<(), AuthError> {
		match params.code {
			Some(code) => {
				log::debug!("authorization code received from callback");
				self.code = Some(code);
				self.stage = FlowStage::AwaitingCallback;
				Ok(())
			}
			None => {
				self.stage = FlowStage::Unauthenticated;
				let reason = match params.error {
					Some(error) => match params.error_description {
						Some(description) => format!("{}: {description}", error.as_str()),
						None => error.as_str().to_owned(),
					},
					None => "redirect delivered no authorization code".to_owned(),
				};
				log::error!("authorization callback failed: {reason}");
				Err(AuthError::Callback(reason))
			}
		}
	}

	/// Exchanges the recorded authorization code plus the stored verifier
	/// for an access token.
	///
	/// The verifier is taken from the store, never peeked: neither success
	/// nor failure leaves a verifier behind to be silently reused. Any
	/// failure resets the flow to [`FlowStage::Unauthenticated`].
	pub async fn exchange(
		&mut self,
		http_client: &impl HttpClient,
	) -> Result<&AccessToken, AuthError> {
		let code = match self.code.take() {
			Some(code) => code,
			None => {
				self.stage = FlowStage::Unauthenticated;
				// Drop any verifier written by `begin`; a failed exchange
				// must not leave one behind for reuse.
				self.store.take()?;
				return Err(AuthError::Callback(
					"no authorization code recorded".to_owned(),
				));
			}
		};

		let verifier = match self.store.take()? {
			Some(verifier) => verifier,
			None => {
				self.stage = FlowStage::Unauthenticated;
				log::error!("token exchange attempted with no stored verifier");
				return Err(AuthError::MissingVerifier);
			}
		};

		self.stage = FlowStage::ExchangingCode;

		let request = TokenRequest {
			client_id: &self.config.client_id,
			code: &code,
			redirect_uri: &self.config.redirect_uri,
			code_verifier: &verifier,
		};

		match request_token(&request, http_client).await {
			Ok(response) => {
				self.stage = FlowStage::Authenticated;
				log::info!("authorization flow completed");
				Ok(&**self.access_token.insert(response.access_token))
			}
			Err(e) => {
				self.stage = FlowStage::Unauthenticated;
				Err(e)
			}
		}
	}

	/// Fetches the authenticated user's profile with the held token.
	///
	/// Fails with [`AuthError::Unauthorized`] when the flow is not
	/// authenticated.
	pub async fn profile(&self, http_client: &impl HttpClient) -> Result<ProfileRecord, AuthError> {
		let token = self.access_token().ok_or(AuthError::Unauthorized)?;
		api::fetch_profile(http_client, token).await
	}

	/// Searches the catalog for tracks with the held token.
	pub async fn search_tracks(
		&self,
		http_client: &impl HttpClient,
		query: &str,
		limit: Option<u8>,
	) -> Result<Vec<TrackRecord>, AuthError> {
		let token = self.access_token().ok_or(AuthError::Unauthorized)?;
		api::search_tracks(http_client, token, query, limit).await
	}
}
