//! Wrike contact normalization.
//!
//! Wrike's `/contacts?me` answers with `{ "data": [contact] }`. A contact looks like
//! `{ id, firstName, lastName, profiles: [{ email, .. }], avatarUrl? }`; [`normalize`] maps one
//! such record onto [`ProfileFields`] without trimming, defaulting, or format checks.

// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	error::ProfileError,
	profile::{ProfileFields, ProfileName, ProfileValue},
};

/// Contact record accepted by [`normalize`]: JSON text or an already-parsed value.
#[derive(Clone, Copy, Debug)]
pub enum RawContact<'a> {
	/// JSON-encoded contact.
	Text(&'a str),
	/// Parsed contact.
	Json(&'a Value),
}
impl<'a> From<&'a str> for RawContact<'a> {
	fn from(value: &'a str) -> Self {
		Self::Text(value)
	}
}
impl<'a> From<&'a String> for RawContact<'a> {
	fn from(value: &'a String) -> Self {
		Self::Text(value)
	}
}
impl<'a> From<&'a Value> for RawContact<'a> {
	fn from(value: &'a Value) -> Self {
		Self::Json(value)
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Contact {
	#[serde(deserialize_with = "scalar_id")]
	id: String,
	first_name: Option<String>,
	last_name: Option<String>,
	#[serde(default)]
	profiles: Vec<ContactProfile>,
	avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContactProfile {
	email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarId {
	Text(String),
	Number(serde_json::Number),
	Flag(bool),
}

fn scalar_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match ScalarId::deserialize(deserializer)? {
		ScalarId::Text(id) => id,
		ScalarId::Number(id) => id.to_string(),
		ScalarId::Flag(id) => id.to_string(),
	})
}

/// Maps a Wrike contact onto the canonical profile fragment.
///
/// `name.given_name` takes `lastName` and `name.family_name` takes `firstName`; downstream
/// consumers rely on that exact mapping. `display_name` is `firstName` alone.
///
/// `id` is copied verbatim: strings pass through, numbers and booleans are rendered as JSON.
/// A missing, `null`, array, or object `id` cannot be represented and is rejected.
///
/// # Errors
///
/// - [`ProfileError::Parse`] when text input is not valid JSON.
/// - [`ProfileError::MissingProfiles`] when `profiles` is absent or empty.
/// - [`ProfileError::Malformed`] when a field has an unexpected type (e.g. an object `id` or a
///   numeric `firstName`).
pub fn normalize<'a>(raw: impl Into<RawContact<'a>>) -> Result<ProfileFields, ProfileError> {
	let parsed;
	let value = match raw.into() {
		RawContact::Text(text) => {
			parsed = serde_json::from_str::<Value>(text)
				.map_err(|source| ProfileError::Parse { source })?;

			&parsed
		},
		RawContact::Json(value) => value,
	};
	let contact: Contact = serde_path_to_error::deserialize(value)
		.map_err(|source| ProfileError::Malformed { source })?;
	let email = contact.profiles.into_iter().next().ok_or(ProfileError::MissingProfiles)?.email;
	let emails = email
		.as_deref()
		.filter(|email| !email.is_empty())
		.map(|email| vec![ProfileValue::new(email)]);
	let photos = contact
		.avatar_url
		.filter(|url| !url.is_empty())
		.map(|url| vec![ProfileValue { value: url }]);

	Ok(ProfileFields {
		id: contact.id,
		display_name: contact.first_name.clone(),
		username: email,
		name: ProfileName { given_name: contact.last_name, family_name: contact.first_name },
		emails,
		photos,
	})
}
