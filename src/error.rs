//! Crate-level error types shared by the strategy, the OAuth client facade, and flows.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for foreign transport failures and verification callbacks.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered with something other than a usable token.
	#[error(transparent)]
	TokenEndpoint(#[from] TokenEndpointError),
	/// Profile could not be fetched or normalized.
	#[error(transparent)]
	Profile(#[from] ProfileError),

	/// Provider rejected the grant (e.g., bad or reused code).
	#[error("Provider rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Provider redirected back with an error other than `access_denied`.
	#[error("Authorization request failed with `{error}`.")]
	Authorization {
		/// OAuth `error` code from the redirect.
		error: String,
		/// OAuth `error_description`, when supplied.
		description: Option<String>,
		/// OAuth `error_uri`, when supplied.
		uri: Option<String>,
	},
	/// Verification callback reported a hard failure.
	#[error("Verification callback failed.")]
	Verify {
		/// Error returned by the callback.
		#[source]
		source: BoxError,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required option was absent or empty.
	#[error("Option `{option}` is required.")]
	MissingOption {
		/// Option name.
		option: &'static str,
	},
	/// A configured URL could not be parsed as an absolute URL.
	#[error("Option `{option}` is not a valid absolute URL.")]
	InvalidUrl {
		/// Option name.
		option: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL parsed but cannot carry a path or query.
	#[error("Option `{option}` must be a hierarchical URL: {url}.")]
	NonHierarchicalUrl {
		/// Option name.
		option: &'static str,
		/// Offending URL.
		url: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Profile fetches need a token to authenticate with.
	#[error("Access token must not be empty.")]
	EmptyAccessToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Outgoing request could not be assembled.
	#[error("HTTP request could not be built.")]
	Request(#[from] oauth2::http::Error),
	/// Provider answered with a non-success status.
	#[error("Provider responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, verbatim.
		body: String,
	},
	/// Transport reported a failure without a structured cause.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status code attached to the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Token endpoint failures that are not transport problems.
#[derive(Debug, ThisError)]
pub enum TokenEndpointError {
	/// Provider returned an OAuth error the flow does not classify further.
	#[error("Token endpoint returned an OAuth error: {message}.")]
	Rejected {
		/// OAuth `error` code.
		error: String,
		/// Description (or the code when no description was supplied).
		message: String,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint failed in a way the OAuth client could not describe.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	Unexpected {
		/// Client-supplied message.
		message: String,
	},
}

/// Failures raised while fetching or normalizing a user profile.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Profile endpoint could not be reached or answered with an error status.
	#[error("Failed to fetch user profile.")]
	Fetch {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Profile body is not valid JSON.
	#[error("Failed to parse user profile.")]
	Parse {
		/// JSON syntax failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response carried no contact under `data[0]`.
	#[error("Profile response does not contain a contact record.")]
	MissingContact,
	/// Contact record has no `profiles[0]` entry.
	#[error("Contact record does not contain any profiles.")]
	MissingProfiles,
	/// Contact record fields have unexpected types.
	#[error("Contact record is malformed.")]
	Malformed {
		/// Structured deserialization failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
