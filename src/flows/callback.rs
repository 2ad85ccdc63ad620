//! Callback handling: code exchange, profile fetch, and verification.

// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	flows::{Authenticator, Verify},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderStrategy,
};

/// Query parameters delivered to the redirect URI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
	/// Authorization code.
	pub code: Option<String>,
	/// Round-tripped `state`.
	pub state: Option<String>,
	/// OAuth error code, when the provider refused the request.
	pub error: Option<String>,
	/// Human-readable error description.
	pub error_description: Option<String>,
	/// Link to an error explanation page.
	pub error_uri: Option<String>,
}
impl CallbackParams {
	/// Extracts the callback parameters from a redirect URL's query string.
	///
	/// Unknown parameters are ignored; when a key repeats, the last value wins.
	pub fn from_url(url: &Url) -> Self {
		let mut params = Self::default();

		for (key, value) in url.query_pairs() {
			let slot = match key.as_ref() {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				"error_uri" => &mut params.error_uri,
				_ => continue,
			};

			*slot = Some(value.into_owned());
		}

		params
	}
}

/// Result of a completed callback.
#[derive(Clone, Debug)]
pub enum Authentication<User> {
	/// Verification accepted the profile.
	Success {
		/// Application user produced by the verify callback.
		user: User,
		/// Tokens issued by the provider.
		grant: TokenGrant,
	},
	/// The attempt ended without a user and without a hard error.
	Failure(FailureReason),
}
impl<User> Authentication<User> {
	/// Returns the authenticated user, if any.
	pub fn user(&self) -> Option<&User> {
		match self {
			Self::Success { user, .. } => Some(user),
			Self::Failure(_) => None,
		}
	}

	/// Returns the failure reason, if any.
	pub fn failure(&self) -> Option<&FailureReason> {
		match self {
			Self::Success { .. } => None,
			Self::Failure(reason) => Some(reason),
		}
	}
}

/// Why an attempt failed softly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
	/// The user declined the authorization request.
	AccessDenied {
		/// Provider-supplied description, when present.
		description: Option<String>,
	},
	/// Returned `state` differs from the one issued with the redirect.
	StateMismatch,
	/// Callback carried neither an error nor a code.
	MissingCode,
	/// Verify callback declined the profile.
	Rejected,
}

impl<C, S, V> Authenticator<C, S, V>
where
	C: HttpTransport,
	S: ProviderStrategy,
{
	/// Completes the authorization-code flow from the callback parameters.
	///
	/// `expected_state` is the value persisted from [`Authenticator::authorize`]; pass `None`
	/// to skip the comparison. Provider errors other than `access_denied` fail with
	/// [`Error::Authorization`]; token, profile, and verification failures propagate as errors.
	pub async fn authenticate<User>(
		&self,
		callback: &CallbackParams,
		expected_state: Option<&str>,
	) -> Result<Authentication<User>>
	where
		V: Verify<User>,
	{
		const KIND: FlowKind = FlowKind::Authenticate;

		let span = FlowSpan::new(KIND, "authenticate");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.complete(callback, expected_state)).await;

		match &result {
			Ok(Authentication::Success { .. }) =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Ok(Authentication::Failure(_)) | Err(_) =>
				obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn complete<User>(
		&self,
		callback: &CallbackParams,
		expected_state: Option<&str>,
	) -> Result<Authentication<User>>
	where
		V: Verify<User>,
	{
		if let Some(error) = callback.error.as_deref() {
			if error == "access_denied" {
				return Ok(Authentication::Failure(FailureReason::AccessDenied {
					description: callback.error_description.clone(),
				}));
			}

			return Err(Error::Authorization {
				error: error.to_owned(),
				description: callback.error_description.clone(),
				uri: callback.error_uri.clone(),
			});
		}
		if expected_state.is_some_and(|expected| callback.state.as_deref() != Some(expected)) {
			return Ok(Authentication::Failure(FailureReason::StateMismatch));
		}

		let Some(code) = callback.code.as_deref().filter(|code| !code.is_empty()) else {
			return Ok(Authentication::Failure(FailureReason::MissingCode));
		};
		let grant = self.client.exchange_code(code).await?;
		let profile = self.strategy.user_profile(grant.access_token.expose()).await?;
		let verified = self
			.verify
			.verify(grant.clone(), profile)
			.await
			.map_err(|source| Error::Verify { source })?;

		Ok(match verified {
			Some(user) => Authentication::Success { user, grant },
			None => Authentication::Failure(FailureReason::Rejected),
		})
	}
}
