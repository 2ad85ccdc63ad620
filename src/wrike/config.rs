//! Strategy configuration with Wrike endpoint defaults.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	oauth::ClientSettings,
	wrike::{DEFAULT_AUTHORIZATION_URL, DEFAULT_PROFILE_URL, DEFAULT_TOKEN_URL, SCOPE_DELIMITER},
};

/// Validated, immutable configuration for [`WrikeStrategy`](crate::wrike::WrikeStrategy).
///
/// Deserializing goes through [`StrategyConfigBuilder`], so configuration files get the same
/// defaults and validation as code.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "StrategyConfigBuilder")]
pub struct StrategyConfig {
	client_id: String,
	client_secret: TokenSecret,
	callback_url: Url,
	authorization_url: Url,
	token_url: Url,
	profile_url: Url,
	user_agent: Option<String>,
	scope: Vec<String>,
}
impl StrategyConfig {
	/// Creates a builder seeded with the three required options.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
		callback_url: impl Into<String>,
	) -> StrategyConfigBuilder {
		StrategyConfigBuilder::default()
			.client_id(client_id)
			.client_secret(client_secret)
			.callback_url(callback_url)
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Redirect URI Wrike sends users back to.
	pub fn callback_url(&self) -> &Url {
		&self.callback_url
	}

	/// Authorization endpoint.
	pub fn authorization_url(&self) -> &Url {
		&self.authorization_url
	}

	/// Token endpoint.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Profile endpoint.
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}

	/// `User-Agent` forwarded to the HTTP client.
	pub fn user_agent(&self) -> Option<&str> {
		self.user_agent.as_deref()
	}

	/// Default scopes for authorization requests.
	pub fn scope(&self) -> &[String] {
		&self.scope
	}

	pub(crate) fn client_settings(&self) -> ClientSettings {
		ClientSettings {
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			redirect_url: self.callback_url.clone(),
			authorization_url: self.authorization_url.clone(),
			token_url: self.token_url.clone(),
			scope: self.scope.clone(),
			scope_delimiter: SCOPE_DELIMITER,
			user_agent: self.user_agent.clone(),
		}
	}
}
impl TryFrom<StrategyConfigBuilder> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(builder: StrategyConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder for [`StrategyConfig`].
///
/// Empty strings count as absent, both for required options and for URL overrides.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StrategyConfigBuilder {
	/// OAuth 2.0 client identifier (required).
	pub client_id: Option<String>,
	/// Client secret (required).
	pub client_secret: Option<TokenSecret>,
	/// Redirect URI (required).
	pub callback_url: Option<String>,
	/// Authorization endpoint override.
	pub authorization_url: Option<String>,
	/// Token endpoint override.
	pub token_url: Option<String>,
	/// Profile endpoint override.
	pub profile_url: Option<String>,
	/// `User-Agent` forwarded to the HTTP client.
	pub user_agent: Option<String>,
	/// Default scopes.
	pub scope: Vec<String>,
}
impl StrategyConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<TokenSecret>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn callback_url(mut self, callback_url: impl Into<String>) -> Self {
		self.callback_url = Some(callback_url.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
		self.authorization_url = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = Some(url.into());

		self
	}

	/// Sets the `User-Agent` forwarded to the HTTP client.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Sets the default scopes.
	pub fn scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Validates required options and applies endpoint defaults.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		let client_id = required("client_id", self.client_id)?;
		let client_secret = self
			.client_secret
			.filter(|secret| !secret.is_empty())
			.ok_or(ConfigError::MissingOption { option: "client_secret" })?;
		let callback_url = parse_url("callback_url", &required("callback_url", self.callback_url)?)?;
		let authorization_url = parse_url(
			"authorization_url",
			non_empty(self.authorization_url.as_deref()).unwrap_or(DEFAULT_AUTHORIZATION_URL),
		)?;
		let token_url = parse_url(
			"token_url",
			non_empty(self.token_url.as_deref()).unwrap_or(DEFAULT_TOKEN_URL),
		)?;
		let profile_url = parse_url(
			"profile_url",
			non_empty(self.profile_url.as_deref()).unwrap_or(DEFAULT_PROFILE_URL),
		)?;

		Ok(StrategyConfig {
			client_id,
			client_secret,
			callback_url,
			authorization_url,
			token_url,
			profile_url,
			user_agent: self.user_agent,
			scope: self.scope,
		})
	}
}

fn required(option: &'static str, value: Option<String>) -> Result<String, ConfigError> {
	value.filter(|value| !value.is_empty()).ok_or(ConfigError::MissingOption { option })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}

fn parse_url(option: &'static str, value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl { option, source })?;

	if url.cannot_be_a_base() {
		return Err(ConfigError::NonHierarchicalUrl { option, url: url.to_string() });
	}

	Ok(url)
}
