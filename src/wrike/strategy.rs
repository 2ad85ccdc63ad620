//! Wrike implementation of [`ProviderStrategy`].

// self
use crate::{
	_prelude::*,
	error::{ConfigError, ProfileError},
	flows::Authenticator,
	http::HttpTransport,
	oauth::{OAuth2Client, TokenPlacement},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	profile::Profile,
	provider::{AuthorizationOptions, AuthorizationParams, ProfileFuture, ProviderStrategy},
	wrike::{self, NAME, StrategyConfig},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestWrikeStrategy = WrikeStrategy<ReqwestHttpClient>;

/// Authenticates Wrike users through the authorization-code flow.
///
/// The strategy owns an [`OAuth2Client`] configured for Wrike's endpoints with header token
/// placement, and the URL of Wrike's "current user" endpoint. It keeps no per-request state.
pub struct WrikeStrategy<C>
where
	C: HttpTransport,
{
	client: Arc<OAuth2Client<C>>,
	profile_url: Url,
}
#[cfg(feature = "reqwest")]
impl WrikeStrategy<ReqwestHttpClient> {
	/// Creates a strategy backed by a redirect-free reqwest client.
	///
	/// The configured `user_agent`, if any, is installed on the client.
	pub fn new(config: StrategyConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_user_agent(config.user_agent())?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> WrikeStrategy<C>
where
	C: HttpTransport,
{
	/// Creates a strategy that reuses the caller-provided transport.
	///
	/// The transport's redirect policy is used as is; reqwest clients should come from
	/// [`ReqwestHttpClient::client_builder`](crate::http::ReqwestHttpClient::client_builder) so
	/// the bearer header is never replayed to a redirect target.
	pub fn with_http_client(config: StrategyConfig, http_client: impl Into<Arc<C>>) -> Self {
		let client = OAuth2Client::new(config.client_settings(), http_client)
			.with_token_placement(TokenPlacement::AuthorizationHeader);

		Self { client: Arc::new(client), profile_url: config.profile_url().clone() }
	}

	/// OAuth client the strategy delegates to.
	pub fn oauth2_client(&self) -> &Arc<OAuth2Client<C>> {
		&self.client
	}

	/// Endpoint queried for the authenticated user.
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}

	/// Binds a verification callback, producing the flow driver for this strategy.
	pub fn authenticator<V>(self, verify: V) -> Authenticator<C, Self, V> {
		let client = self.client.clone();

		Authenticator::new(client, self, verify)
	}

	async fn fetch_profile(&self, access_token: &str) -> Result<Profile> {
		if access_token.is_empty() {
			return Err(ConfigError::EmptyAccessToken.into());
		}

		let raw_body = self
			.client
			.get(&self.profile_url, access_token)
			.await
			.map_err(|source| ProfileError::Fetch { source })?;
		let raw_json = serde_json::from_str::<Value>(&raw_body)
			.map_err(|source| ProfileError::Parse { source })?;
		let contact = raw_json
			.get("data")
			.and_then(|data| data.get(0))
			.ok_or(ProfileError::MissingContact)?;
		let fields = wrike::normalize(contact)?;

		Ok(fields.into_profile(NAME, raw_body, raw_json))
	}
}
impl<C> ProviderStrategy for WrikeStrategy<C>
where
	C: HttpTransport,
{
	fn name(&self) -> &'static str {
		NAME
	}

	fn authorization_params(&self, _options: &AuthorizationOptions) -> AuthorizationParams {
		AuthorizationParams::from([("response_type".into(), "code".into())])
	}

	fn user_profile<'a>(&'a self, access_token: &'a str) -> ProfileFuture<'a> {
		const KIND: FlowKind = FlowKind::UserProfile;

		Box::pin(async move {
			let span = FlowSpan::new(KIND, "user_profile");

			obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

			let result = span.instrument(self.fetch_profile(access_token)).await;

			match &result {
				Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
				Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
			}

			result
		})
	}
}
impl<C> Clone for WrikeStrategy<C>
where
	C: HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), profile_url: self.profile_url.clone() }
	}
}
impl<C> Debug for WrikeStrategy<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WrikeStrategy")
			.field("client", &self.client)
			.field("profile_url", &self.profile_url.as_str())
			.finish()
	}
}
