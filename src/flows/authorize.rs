//! Authorization redirect construction.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	flows::Authenticator,
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{AuthorizationOptions, ProviderStrategy},
};

const STATE_LEN: usize = 32;

/// Redirect target plus the `state` the caller must persist until the callback arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully-formed authorization URL to send the user agent to.
	pub url: Url,
	/// Opaque value that must round-trip through the provider.
	pub state: String,
}
impl AuthorizationRequest {
	/// Returns `true` when the callback carried the expected `state`.
	pub fn matches_state(&self, returned_state: &str) -> bool {
		returned_state == self.state
	}
}

impl<C, S, V> Authenticator<C, S, V>
where
	C: HttpTransport,
	S: ProviderStrategy,
{
	/// Builds the provider redirect.
	///
	/// The strategy contributes its extra parameters; `state` is a fresh 32-character
	/// alphanumeric value unless the options pin one.
	pub fn authorize(&self, options: AuthorizationOptions) -> AuthorizationRequest {
		const KIND: FlowKind = FlowKind::Authorize;

		let _guard = FlowSpan::new(KIND, "authorize").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let params = self.strategy.authorization_params(&options);
		let AuthorizationOptions { scope, state } = options;
		let state = state.unwrap_or_else(|| random_string(STATE_LEN));
		let url = self.client.authorize_url(&params, scope.as_deref(), &state);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		AuthorizationRequest { url, state }
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
