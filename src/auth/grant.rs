//! Token grant produced by the authorization-code exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Tokens issued by the provider for one authentication attempt.
///
/// The grant is handed to the verification callback alongside the profile and is never cached
/// by this crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Scopes echoed back by the token endpoint, if any.
	pub scope: Vec<String>,
	/// Instant the grant was received.
	pub issued_at: OffsetDateTime,
	/// Expiry derived from `expires_in`, when the provider supplied it.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenGrant {
	/// Creates a grant carrying only an access token, issued now.
	pub fn new(access_token: impl Into<TokenSecret>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: None,
			scope: Vec::new(),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		}
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Derives the expiry from a relative lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_at = Some(self.issued_at.saturating_add(expires_in));

		self
	}

	/// Returns `true` if the grant is past its expiry at the provided instant.
	///
	/// Grants without an expiry never report as expired.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}
}
