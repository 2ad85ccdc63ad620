//! Provider-agnostic profile schema.
//!
//! Normalizers produce [`ProfileFields`]; strategies stamp the provider name and the raw response
//! onto them via [`ProfileFields::into_profile`]. Optional fields are omitted from the serialized
//! form rather than emitted as `null` or empty arrays.

// self
use crate::_prelude::*;

/// Split name components.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
}

/// Single-valued entry in `emails` or `photos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValue {
	/// Email address or photo URL, unmodified.
	pub value: String,
}
impl ProfileValue {
	/// Wraps a value.
	pub fn new(value: impl Into<String>) -> Self {
		Self { value: value.into() }
	}
}

/// Normalized profile fragment, before provider stamping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
	/// Provider-scoped user identifier.
	pub id: String,
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Username.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Split name components.
	pub name: ProfileName,
	/// Email addresses; absent rather than empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<ProfileValue>>,
	/// Photo URLs; absent rather than empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub photos: Option<Vec<ProfileValue>>,
}
impl ProfileFields {
	/// Stamps provider metadata onto the fragment.
	pub fn into_profile(self, provider: &str, raw_body: String, raw_json: Value) -> Profile {
		let ProfileFields { id, display_name, username, name, emails, photos } = self;

		Profile {
			provider: provider.to_owned(),
			id,
			display_name,
			username,
			name,
			emails,
			photos,
			raw_body,
			raw_json,
		}
	}
}

/// Canonical profile handed to the verification callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Provider name (e.g. `wrike`).
	pub provider: String,
	/// Provider-scoped user identifier.
	pub id: String,
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Username.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Split name components.
	pub name: ProfileName,
	/// Email addresses; absent rather than empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<ProfileValue>>,
	/// Photo URLs; absent rather than empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub photos: Option<Vec<ProfileValue>>,
	/// Response body exactly as received.
	pub raw_body: String,
	/// Parsed response body.
	pub raw_json: Value,
}
impl Profile {
	/// First email address, if any.
	pub fn primary_email(&self) -> Option<&str> {
		self.emails.as_deref().and_then(<[_]>::first).map(|email| email.value.as_str())
	}

	/// First photo URL, if any.
	pub fn photo_url(&self) -> Option<&str> {
		self.photos.as_deref().and_then(<[_]>::first).map(|photo| photo.value.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fields() -> ProfileFields {
		ProfileFields {
			id: "42".into(),
			display_name: Some("Ann".into()),
			username: None,
			name: ProfileName { given_name: Some("Lee".into()), family_name: Some("Ann".into()) },
			emails: None,
			photos: Some(vec![ProfileValue::new("http://x/a.png")]),
		}
	}

	#[test]
	fn absent_collections_are_not_serialized() {
		let json = serde_json::to_value(fields()).expect("Profile fields should serialize.");

		assert_eq!(
			json,
			serde_json::json!({
				"id": "42",
				"displayName": "Ann",
				"name": { "givenName": "Lee", "familyName": "Ann" },
				"photos": [{ "value": "http://x/a.png" }],
			})
		);
	}

	#[test]
	fn stamping_keeps_fragment_and_raw_payload() {
		let raw_json = serde_json::json!({ "data": [] });
		let profile = fields().into_profile("wrike", "{\"data\":[]}".into(), raw_json.clone());

		assert_eq!(profile.provider, "wrike");
		assert_eq!(profile.id, "42");
		assert_eq!(profile.raw_body, "{\"data\":[]}");
		assert_eq!(profile.raw_json, raw_json);
		assert_eq!(profile.primary_email(), None);
		assert_eq!(profile.photo_url(), Some("http://x/a.png"));
	}
}
