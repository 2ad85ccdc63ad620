//! Wrike OAuth 2.0 authorization-code strategy with canonical profile normalization.
//!
//! [`wrike::WrikeStrategy`] configures Wrike's endpoints, injects the parameters Wrike expects on
//! the authorization request, and fetches `/contacts?me` with a header-placed bearer token.
//! [`wrike::normalize`] maps Wrike's contact JSON onto the provider-agnostic
//! [`profile::Profile`]. [`flows::Authenticator`] drives the redirect/callback pair on top of any
//! [`provider::ProviderStrategy`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod provider;
pub mod wrike;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
