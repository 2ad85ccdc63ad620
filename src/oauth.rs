//! OAuth client facade: authorization URLs, code exchange, and authenticated GETs.
//!
//! [`OAuth2Client`] plays the part of the generic protocol client that provider strategies
//! delegate to. Token exchanges go through the `oauth2` crate; profile requests use the same
//! [`HttpTransport`] with the access token placed according to [`TokenPlacement`].

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret,
	EndpointNotSet, EndpointSet, HttpClientError, RedirectUrl, RequestTokenError, TokenResponse,
	TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, USER_AGENT},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{TokenGrant, TokenSecret},
	error::{TokenEndpointError, TransportError},
	http::{self, HttpTransport},
	provider::AuthorizationParams,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOAuth2Client = OAuth2Client<ReqwestHttpClient>;

/// Where the access token travels on authenticated GET requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPlacement {
	/// `?access_token=<token>` appended to the request URL.
	#[default]
	QueryParameter,
	/// `Authorization: Bearer <token>` header.
	AuthorizationHeader,
}

/// Static settings consumed by [`OAuth2Client::new`].
#[derive(Clone, Debug)]
pub struct ClientSettings {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret sent in the token request body.
	pub client_secret: TokenSecret,
	/// Redirect URI registered with the provider.
	pub redirect_url: Url,
	/// Authorization endpoint.
	pub authorization_url: Url,
	/// Token endpoint.
	pub token_url: Url,
	/// Scopes requested when the caller does not override them.
	pub scope: Vec<String>,
	/// Character used to join scopes into the `scope` parameter.
	pub scope_delimiter: char,
	/// `User-Agent` forwarded on authenticated GETs.
	pub user_agent: Option<String>,
}

/// Generic OAuth 2.0 client that provider strategies delegate protocol mechanics to.
pub struct OAuth2Client<C>
where
	C: HttpTransport,
{
	settings: ClientSettings,
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	token_placement: TokenPlacement,
}
impl<C> OAuth2Client<C>
where
	C: HttpTransport,
{
	/// Creates a client that sends the client secret in the token request body.
	pub fn new(settings: ClientSettings, http_client: impl Into<Arc<C>>) -> Self {
		let oauth_client = BasicClient::new(ClientId::new(settings.client_id.clone()))
			.set_client_secret(ClientSecret::new(settings.client_secret.expose().to_owned()))
			.set_auth_uri(AuthUrl::from_url(settings.authorization_url.clone()))
			.set_token_uri(TokenUrl::from_url(settings.token_url.clone()))
			.set_redirect_uri(RedirectUrl::from_url(settings.redirect_url.clone()))
			.set_auth_type(AuthType::RequestBody);

		Self {
			settings,
			oauth_client,
			http_client: http_client.into(),
			token_placement: TokenPlacement::default(),
		}
	}

	/// Overrides where [`OAuth2Client::get`] places the access token.
	pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
		self.token_placement = placement;

		self
	}

	/// Settings the client was built with.
	pub fn settings(&self) -> &ClientSettings {
		&self.settings
	}

	/// Current access-token placement for GET requests.
	pub fn token_placement(&self) -> TokenPlacement {
		self.token_placement
	}

	/// Builds the authorization redirect URL.
	///
	/// Strategy-supplied `params` are merged first; `client_id`, `redirect_uri`, `scope`, and
	/// `state` always reflect the client configuration. `scope` falls back to the configured
	/// scopes when `None`.
	pub fn authorize_url(
		&self,
		params: &AuthorizationParams,
		scope: Option<&[String]>,
		state: &str,
	) -> Url {
		let mut query = params.clone();

		query.insert("client_id".into(), self.settings.client_id.clone());
		query.insert("redirect_uri".into(), self.settings.redirect_url.to_string());

		if let Some(scope_value) = format_scope(
			scope.unwrap_or(self.settings.scope.as_slice()),
			self.settings.scope_delimiter,
		) {
			query.insert("scope".into(), scope_value);
		}

		query.insert("state".into(), state.to_owned());

		let mut url = self.settings.authorization_url.clone();

		url.query_pairs_mut().extend_pairs(query.iter());

		url
	}

	/// Exchanges an authorization code for a [`TokenGrant`].
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		let handle = self.http_client.handle();
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&handle)
			.await
			.map_err(map_request_error)?;

		map_token_response(response)
	}

	/// Issues an authenticated GET and returns the response body verbatim.
	///
	/// Non-2xx responses fail with [`TransportError::Status`] carrying the body.
	pub async fn get(&self, url: &Url, access_token: &str) -> Result<String, TransportError> {
		let mut url = url.clone();
		let mut builder = Request::builder().method(Method::GET).header(ACCEPT, "application/json");

		match self.token_placement {
			TokenPlacement::AuthorizationHeader =>
				builder = builder.header(AUTHORIZATION, format!("Bearer {access_token}")),
			TokenPlacement::QueryParameter => {
				url.query_pairs_mut().append_pair("access_token", access_token);
			},
		}

		if let Some(user_agent) = self.settings.user_agent.as_deref() {
			builder = builder.header(USER_AGENT, user_agent);
		}

		let request = builder.uri(url.as_str()).body(Vec::new())?;
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(http::map_http_client_error)?;
		let status = response.status();
		let body = String::from_utf8_lossy(response.body()).into_owned();

		if !status.is_success() {
			return Err(TransportError::Status { status: status.as_u16(), body });
		}

		Ok(body)
	}
}
impl<C> Debug for OAuth2Client<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field("client_id", &self.settings.client_id)
			.field("authorization_url", &self.settings.authorization_url.as_str())
			.field("token_url", &self.settings.token_url.as_str())
			.field("token_placement", &self.token_placement)
			.finish()
	}
}

/// Joins scopes with the provider's delimiter.
pub(crate) fn format_scope(scope: &[String], delimiter: char) -> Option<String> {
	if scope.is_empty() {
		return None;
	}

	let mut buf = String::new();

	for (idx, value) in scope.iter().enumerate() {
		if idx > 0 {
			buf.push(delimiter);
		}

		buf.push_str(value);
	}

	Some(buf)
}

fn map_token_response(response: BasicTokenResponse) -> Result<TokenGrant> {
	let mut grant = TokenGrant::new(response.access_token().secret().to_owned());

	if let Some(refresh) = response.refresh_token() {
		grant = grant.with_refresh_token(refresh.secret().to_owned());
	}
	if let Some(scopes) = response.scopes() {
		grant.scope = scopes.iter().map(|scope| scope.as_str().to_owned()).collect();
	}
	if let Some(expires_in) = response.expires_in() {
		let secs = i64::try_from(expires_in.as_secs())
			.map_err(|_| TokenEndpointError::ExpiresInOutOfRange)?;
		let expires_at = grant
			.issued_at
			.checked_add(Duration::seconds(secs))
			.ok_or(TokenEndpointError::ExpiresInOutOfRange)?;

		grant.expires_at = Some(expires_at);
	}

	Ok(grant)
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response),
		RequestTokenError::Request(error) => http::map_http_client_error(error).into(),
		RequestTokenError::Parse(source, _body) => TokenEndpointError::Parse { source }.into(),
		RequestTokenError::Other(message) => TokenEndpointError::Unexpected { message }.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse) -> Error {
	let error = response.error().as_ref().to_string();
	let message = response.error_description().cloned().unwrap_or_else(|| error.clone());

	match error.to_ascii_lowercase().as_str() {
		"invalid_grant" | "access_denied" => Error::InvalidGrant { reason: message },
		"invalid_client" | "unauthorized_client" => Error::InvalidClient { reason: message },
		_ => TokenEndpointError::Rejected { error, message }.into(),
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn settings() -> ClientSettings {
		ClientSettings {
			client_id: "client-id".into(),
			client_secret: TokenSecret::new("client-secret"),
			redirect_url: Url::parse("https://app.example.com/auth/callback")
				.expect("Redirect URL fixture should parse."),
			authorization_url: Url::parse("https://provider.example.com/oauth2/authorize")
				.expect("Authorization URL fixture should parse."),
			token_url: Url::parse("https://provider.example.com/oauth2/token")
				.expect("Token URL fixture should parse."),
			scope: vec!["Default".into(), "wsReadOnly".into()],
			scope_delimiter: ',',
			user_agent: None,
		}
	}

	fn client() -> ReqwestOAuth2Client {
		let http_client = ReqwestHttpClient::with_user_agent(None)
			.expect("Redirect-free reqwest client should build.");

		OAuth2Client::new(settings(), http_client)
	}

	#[test]
	fn scope_formatting_handles_custom_delimiters() {
		let scope = vec!["email".to_owned(), "profile".to_owned()];

		assert_eq!(format_scope(&scope, ' '), Some("email profile".into()));
		assert_eq!(format_scope(&scope, ','), Some("email,profile".into()));
		assert_eq!(format_scope(&[], ','), None);
	}

	#[test]
	fn authorize_url_merges_strategy_params() {
		let params = AuthorizationParams::from([("response_type".into(), "code".into())]);
		let url = client().authorize_url(&params, None, "state-123");
		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(url.path(), "/oauth2/authorize");
		assert_eq!(pairs.get("response_type"), Some(&"code".into()));
		assert_eq!(pairs.get("client_id"), Some(&"client-id".into()));
		assert_eq!(
			pairs.get("redirect_uri"),
			Some(&"https://app.example.com/auth/callback".into())
		);
		assert_eq!(pairs.get("scope"), Some(&"Default,wsReadOnly".into()));
		assert_eq!(pairs.get("state"), Some(&"state-123".into()));
	}

	#[test]
	fn authorize_url_uses_scope_override_and_keeps_client_fields() {
		let params = AuthorizationParams::from([("client_id".into(), "spoofed".into())]);
		let scope = vec!["amReadOnlyUser".to_owned()];
		let url = client().authorize_url(&params, Some(&scope), "s");
		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("client_id"), Some(&"client-id".into()));
		assert_eq!(pairs.get("scope"), Some(&"amReadOnlyUser".into()));
		assert!(!pairs.contains_key("response_type"));
	}

	#[test]
	fn token_placement_defaults_to_query() {
		let client = client();

		assert_eq!(client.token_placement(), TokenPlacement::QueryParameter);

		let client = client.with_token_placement(TokenPlacement::AuthorizationHeader);

		assert_eq!(client.token_placement(), TokenPlacement::AuthorizationHeader);
	}

	#[test]
	fn server_errors_are_classified() {
		let response: BasicErrorResponse = serde_json::from_str(
			"{\"error\":\"invalid_grant\",\"error_description\":\"code already used\"}",
		)
		.expect("Error response fixture should deserialize.");

		assert!(matches!(
			map_server_response_error(response),
			Error::InvalidGrant { ref reason } if reason == "code already used"
		));

		let response: BasicErrorResponse =
			serde_json::from_str("{\"error\":\"invalid_client\"}")
				.expect("Error response fixture should deserialize.");

		assert!(matches!(map_server_response_error(response), Error::InvalidClient { .. }));

		let response: BasicErrorResponse =
			serde_json::from_str("{\"error\":\"invalid_scope\"}")
				.expect("Error response fixture should deserialize.");

		assert!(matches!(
			map_server_response_error(response),
			Error::TokenEndpoint(TokenEndpointError::Rejected { .. })
		));
	}

	#[test]
	fn debug_output_omits_client_secret() {
		let rendered = format!("{:?}", client());

		assert!(rendered.contains("client-id"));
		assert!(!rendered.contains("client-secret"));
	}
}
