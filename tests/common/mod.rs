//! Shared fixtures for the httpmock-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use oauth2_wrike::{
	http::ReqwestHttpClient,
	url::Url,
	wrike::{ReqwestWrikeStrategy, StrategyConfig, StrategyConfigBuilder, WrikeStrategy},
};

pub const CLIENT_ID: &str = "client-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const CALLBACK_URL: &str = "https://app.example.com/auth/wrike/callback";
pub const ACCESS_TOKEN: &str = "access-success";
pub const PROFILE_PATH: &str = "/api/v3/contacts";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const CONTACT_BODY: &str = "{\"kind\":\"contacts\",\"data\":[{\"id\":\"KUAAAAHK\",\"firstName\":\"Ann\",\"lastName\":\"Lee\",\"type\":\"Person\",\"profiles\":[{\"accountId\":\"IEAAAAAQ\",\"email\":\"ann@x.com\",\"role\":\"User\",\"external\":false,\"admin\":false,\"owner\":false}],\"avatarUrl\":\"https://www.wrike.com/avatars/KU/AA/ann.png\",\"timezone\":\"Europe/Moscow\",\"locale\":\"en\",\"deleted\":false,\"me\":true}]}";

/// Builder pointing every Wrike endpoint at the mock server.
pub fn config_builder(server: &MockServer) -> StrategyConfigBuilder {
	StrategyConfig::builder(CLIENT_ID, CLIENT_SECRET, CALLBACK_URL)
		.authorization_url(server.url("/oauth2/authorize"))
		.token_url(server.url(TOKEN_PATH))
		.profile_url(server.url(format!("{PROFILE_PATH}?me")))
		.scope(["Default", "wsReadOnly"])
}

/// Reqwest-backed strategy for the mock server.
pub fn strategy(server: &MockServer) -> ReqwestWrikeStrategy {
	strategy_with(config_builder(server))
}

/// Reqwest-backed strategy built from a customized builder.
pub fn strategy_with(builder: StrategyConfigBuilder) -> ReqwestWrikeStrategy {
	let config = builder.build().expect("Mock strategy config should build.");
	let http_client = test_reqwest_http_client(config.user_agent());

	WrikeStrategy::with_http_client(config, http_client)
}

/// Redirect-free reqwest client that accepts the self-signed certificates served by `httpmock`.
pub fn test_reqwest_http_client(user_agent: Option<&str>) -> ReqwestHttpClient {
	let mut builder = ReqwestHttpClient::client_builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true);

	if let Some(user_agent) = user_agent {
		builder = builder.user_agent(user_agent);
	}

	let client = builder.build().expect("Failed to build insecure reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Parses a URL fixture.
pub fn url(value: &str) -> Url {
	Url::parse(value).expect("URL fixture should parse.")
}
