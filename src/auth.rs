//! Credential models: redacted secrets and the token grant returned by the code exchange.

pub mod grant;
pub mod secret;

pub use grant::*;
pub use secret::*;
