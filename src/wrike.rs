//! Wrike provider: endpoint defaults, strategy, and contact normalization.
//!
//! Wrike's `/contacts?me` endpoint rejects `?access_token=` query tokens, so the strategy always
//! configures its client for header placement. Its authorization endpoint also insists on an
//! explicit `response_type=code`.

pub mod config;
pub mod profile;
pub mod strategy;

pub use config::*;
pub use profile::normalize;
pub use strategy::*;

/// Provider name stamped on every Wrike profile.
pub const NAME: &str = "wrike";
/// Wrike's authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://www.wrike.com/oauth2/authorize";
/// Wrike's token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.wrike.com/oauth2/token";
/// Wrike's "current user" endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://www.wrike.com/api/v3/contacts?me";
/// Wrike joins scopes with commas.
pub const SCOPE_DELIMITER: char = ',';
