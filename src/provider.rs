//! Provider capability interface consumed by the generic flow driver.
//!
//! A provider module implements [`ProviderStrategy`] to contribute its name, the extra
//! parameters its authorization endpoint needs, and the profile fetch that turns an access token
//! into a [`Profile`]. [`Authenticator`](crate::flows::Authenticator) handles everything else.

// self
use crate::{_prelude::*, profile::Profile};

/// Extra query parameters contributed to the authorization request.
pub type AuthorizationParams = BTreeMap<String, String>;

/// Boxed future returned by [`ProviderStrategy::user_profile`].
pub type ProfileFuture<'a> = Pin<Box<dyn Future<Output = Result<Profile>> + 'a + Send>>;

/// Per-request options for building an authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationOptions {
	/// Scopes overriding the configured defaults.
	pub scope: Option<Vec<String>>,
	/// Caller-supplied `state`; a random value is generated when absent.
	pub state: Option<String>,
}
impl AuthorizationOptions {
	/// Overrides the requested scopes.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}

	/// Pins the `state` value instead of generating one.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}
}

/// Provider-specific hooks for the authorization-code flow.
///
/// Implementations hold no per-request state, so one instance can serve concurrent
/// authentication attempts.
pub trait ProviderStrategy: Send + Sync {
	/// Fixed provider name stamped on every profile.
	fn name(&self) -> &'static str;

	/// Extra parameters for the authorization request.
	///
	/// The default implementation adds nothing.
	fn authorization_params(&self, _options: &AuthorizationOptions) -> AuthorizationParams {
		AuthorizationParams::new()
	}

	/// Fetches and normalizes the authenticated user's profile.
	///
	/// The future resolves exactly once, with either a complete profile or an error.
	fn user_profile<'a>(&'a self, access_token: &'a str) -> ProfileFuture<'a>;
}
