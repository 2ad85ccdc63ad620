#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::Value;
// self
use common::*;
use oauth2_wrike::{
	auth::TokenSecret,
	error::{Error, ProfileError, TransportError},
	oauth::{ClientSettings, OAuth2Client, ReqwestOAuth2Client, TokenPlacement},
	profile::ProfileValue,
	provider::ProviderStrategy,
};

#[tokio::test]
async fn user_profile_sends_bearer_header_and_normalizes_contact() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(PROFILE_PATH)
				.query_param_exists("me")
				.query_param_missing("access_token")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"))
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").body(CONTACT_BODY);
		})
		.await;
	let profile =
		strategy.user_profile(ACCESS_TOKEN).await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "wrike");
	assert_eq!(profile.id, "KUAAAAHK");
	assert_eq!(profile.display_name.as_deref(), Some("Ann"));
	assert_eq!(profile.username.as_deref(), Some("ann@x.com"));
	assert_eq!(profile.name.given_name.as_deref(), Some("Lee"));
	assert_eq!(profile.name.family_name.as_deref(), Some("Ann"));
	assert_eq!(profile.emails, Some(vec![ProfileValue::new("ann@x.com")]));
	assert_eq!(profile.photo_url(), Some("https://www.wrike.com/avatars/KU/AA/ann.png"));
	assert_eq!(profile.raw_body, CONTACT_BODY);
	assert_eq!(
		profile.raw_json,
		serde_json::from_str::<Value>(CONTACT_BODY).expect("Contact fixture should parse.")
	);
}

#[tokio::test]
async fn query_placement_appends_access_token_to_the_url() {
	let server = MockServer::start_async().await;
	let settings = ClientSettings {
		client_id: CLIENT_ID.into(),
		client_secret: TokenSecret::new(CLIENT_SECRET),
		redirect_url: url(CALLBACK_URL),
		authorization_url: url(&server.url("/oauth2/authorize")),
		token_url: url(&server.url(TOKEN_PATH)),
		scope: Vec::new(),
		scope_delimiter: ',',
		user_agent: None,
	};
	let client: ReqwestOAuth2Client = OAuth2Client::new(settings, test_reqwest_http_client(None));

	assert_eq!(client.token_placement(), TokenPlacement::QueryParameter);

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(PROFILE_PATH)
				.query_param_exists("me")
				.query_param("access_token", ACCESS_TOKEN)
				.header_missing("authorization");
			then.status(200).header("content-type", "application/json").body(CONTACT_BODY);
		})
		.await;
	let body = client
		.get(&url(&server.url(format!("{PROFILE_PATH}?me"))), ACCESS_TOKEN)
		.await
		.expect("Query-placed GET should succeed.");

	mock.assert_async().await;

	assert_eq!(body, CONTACT_BODY);
}

#[tokio::test]
async fn profile_redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);
	let target = server
		.mock_async(|when, then| {
			when.method(GET).path("/elsewhere");
			then.status(200).header("content-type", "application/json").body(CONTACT_BODY);
		})
		.await;
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(302).header("location", server.url("/elsewhere"));
		})
		.await;
	let err = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect_err("Redirected profile requests should fail.");

	redirect.assert_async().await;
	target.assert_hits_async(0).await;

	assert!(matches!(
		err,
		Error::Profile(ProfileError::Fetch { source: TransportError::Status { status: 302, .. } })
	));
}

#[tokio::test]
async fn user_profile_forwards_user_agent() {
	let server = MockServer::start_async().await;
	let strategy = strategy_with(config_builder(&server).user_agent("myapp.com"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH).header("user-agent", "myapp.com");
			then.status(200).header("content-type", "application/json").body(CONTACT_BODY);
		})
		.await;

	strategy.user_profile(ACCESS_TOKEN).await.expect("Profile fetch should succeed.");
	mock.assert_async().await;
}

#[tokio::test]
async fn error_status_becomes_fetch_error() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(500).body("upstream exploded");
		})
		.await;
	let err = strategy.user_profile(ACCESS_TOKEN).await.expect_err("HTTP 500 should fail.");

	mock.assert_async().await;

	assert_eq!(err.to_string(), "Failed to fetch user profile.");

	let source = match err {
		Error::Profile(ProfileError::Fetch { source }) => source,
		other => panic!("Expected a profile fetch error, got {other:?}."),
	};

	assert!(matches!(
		source,
		TransportError::Status { status: 500, ref body } if body == "upstream exploded"
	));
}

#[tokio::test]
async fn unreachable_endpoint_becomes_fetch_error() {
	let server = MockServer::start_async().await;
	let strategy = strategy_with(
		config_builder(&server).profile_url("http://127.0.0.1:1/api/v3/contacts?me"),
	);
	let err = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect_err("Unreachable profile endpoint should fail.");

	assert!(matches!(
		err,
		Error::Profile(ProfileError::Fetch { source: TransportError::Network { .. } })
	));
}

#[tokio::test]
async fn non_json_body_becomes_parse_error() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "text/html").body("<html>maintenance</html>");
		})
		.await;

	let err = strategy.user_profile(ACCESS_TOKEN).await.expect_err("HTML body should fail.");

	assert_eq!(err.to_string(), "Failed to parse user profile.");
	assert!(matches!(err, Error::Profile(ProfileError::Parse { .. })));
}

#[tokio::test]
async fn structural_gaps_are_reported_without_panicking() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);
	let mut empty = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body("{\"data\":[]}");
		})
		.await;
	let err = strategy.user_profile(ACCESS_TOKEN).await.expect_err("Empty data should fail.");

	assert!(matches!(err, Error::Profile(ProfileError::MissingContact)));

	empty.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"id\":\"1\",\"firstName\":\"Ann\"}]}");
		})
		.await;

	let err =
		strategy.user_profile(ACCESS_TOKEN).await.expect_err("Missing profiles should fail.");

	assert!(matches!(err, Error::Profile(ProfileError::MissingProfiles)));
}

#[tokio::test]
async fn concurrent_fetches_share_one_strategy() {
	let server = MockServer::start_async().await;
	let strategy = strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE_PATH);
			then.status(200).header("content-type", "application/json").body(CONTACT_BODY);
		})
		.await;
	let (first, second) =
		tokio::join!(strategy.user_profile(ACCESS_TOKEN), strategy.user_profile("other-token"));

	mock.assert_hits_async(2).await;

	let first = first.expect("First fetch should succeed.");
	let second = second.expect("Second fetch should succeed.");

	assert_eq!(first, second);
	assert_eq!(first.id, "KUAAAAHK");
}
