//! Authorization-code flow driver shared by every provider strategy.
//!
//! [`Authenticator`] builds the redirect through [`Authenticator::authorize`] and completes the
//! callback through [`Authenticator::authenticate`]: it exchanges the code with the strategy's
//! [`OAuth2Client`], asks the strategy for the user profile, and hands both to the caller's
//! [`Verify`] callback. Persisting the `state` between the two calls is the caller's job.

pub mod authorize;
pub mod callback;

pub use authorize::*;
pub use callback::*;

// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	error::BoxError,
	http::HttpTransport,
	oauth::OAuth2Client,
	profile::Profile,
	provider::ProviderStrategy,
};

/// Verification callback invoked once the profile is available.
///
/// Resolve to `Ok(Some(user))` to authenticate, `Ok(None)` when the user is not acceptable, or
/// `Err(_)` for a hard failure (surfaced as [`Error::Verify`]).
///
/// Any `Fn(TokenGrant, Profile) -> impl Future` closure with a matching output implements this
/// trait.
pub trait Verify<User>: Send + Sync {
	/// Resolves the application user for the authenticated profile.
	fn verify(
		&self,
		grant: TokenGrant,
		profile: Profile,
	) -> impl Future<Output = Result<Option<User>, BoxError>> + Send;
}
impl<F, Fut, User> Verify<User> for F
where
	F: Send + Sync + Fn(TokenGrant, Profile) -> Fut,
	Fut: Send + Future<Output = Result<Option<User>, BoxError>>,
{
	fn verify(
		&self,
		grant: TokenGrant,
		profile: Profile,
	) -> impl Future<Output = Result<Option<User>, BoxError>> + Send {
		self(grant, profile)
	}
}

/// Drives the redirect/callback pair for one provider strategy.
///
/// The driver only holds immutable state and can be shared across concurrent attempts.
pub struct Authenticator<C, S, V>
where
	C: HttpTransport,
{
	client: Arc<OAuth2Client<C>>,
	strategy: S,
	verify: V,
}
impl<C, S, V> Authenticator<C, S, V>
where
	C: HttpTransport,
	S: ProviderStrategy,
{
	/// Creates a driver from the strategy's OAuth client, the strategy, and a verify callback.
	pub fn new(client: Arc<OAuth2Client<C>>, strategy: S, verify: V) -> Self {
		Self { client, strategy, verify }
	}

	/// Strategy the driver delegates provider-specific work to.
	pub fn strategy(&self) -> &S {
		&self.strategy
	}

	/// OAuth client used for authorization URLs and code exchanges.
	pub fn oauth2_client(&self) -> &Arc<OAuth2Client<C>> {
		&self.client
	}
}
impl<C, S, V> Debug for Authenticator<C, S, V>
where
	C: HttpTransport,
	S: ProviderStrategy,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("provider", &self.strategy.name())
			.field("client", &self.client)
			.finish()
	}
}
