//! Walks through sending a user to Wrike and completing the callback.
//!
//! Run without arguments to print the authorization URL. Pass the full callback URL Wrike
//! redirected to (plus the `state` printed earlier) to exchange the code and fetch the profile:
//!
//! ```sh
//! cargo run --example wrike_authorization -- '<callback url>' '<state>'
//! ```

// std
use std::env;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_wrike::{
	auth::TokenGrant,
	error::BoxError,
	flows::{Authentication, CallbackParams},
	profile::Profile,
	provider::AuthorizationOptions,
	wrike::{StrategyConfig, WrikeStrategy},
};

async fn verify(grant: TokenGrant, profile: Profile) -> Result<Option<Profile>, BoxError> {
	println!("Access token expires at {:?}.", grant.expires_at);

	Ok(Some(profile))
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = StrategyConfig::builder(
		env::var("WRIKE_CLIENT_ID").unwrap_or_else(|_| "demo-client".into()),
		env::var("WRIKE_CLIENT_SECRET").unwrap_or_else(|_| "demo-secret".into()),
		"http://localhost:3000/auth/wrike/callback",
	)
	.scope(["Default", "wsReadOnly"])
	.user_agent("oauth2-wrike-demo")
	.build()?;
	let authenticator = WrikeStrategy::new(config)?.authenticator(verify);
	let mut args = env::args().skip(1);
	let (Some(callback_url), Some(state)) = (args.next(), args.next()) else {
		let request = authenticator.authorize(AuthorizationOptions::default());
		println!("Send your user to {}.", &request.url);
		println!("Persist state `{}` for the callback handler.", &request.state);

		return Ok(());
	};
	let callback = CallbackParams::from_url(&Url::parse(&callback_url)?);

	match authenticator.authenticate(&callback, Some(&state)).await? {
		Authentication::Success { user, .. } => println!(
			"Authenticated {} <{}>.",
			user.display_name.as_deref().unwrap_or(&user.id),
			user.primary_email().unwrap_or("no email")
		),
		Authentication::Failure(reason) => eprintln!("Authentication failed: {reason:?}."),
	}

	Ok(())
}
