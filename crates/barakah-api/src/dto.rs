//! Wire-only request/response shapes.
//!
//! Most domain models serialize to the backend's JSON directly; this module
//! holds the handful of envelopes that exist only on the wire.

use barakah_core::user::AuthProvider;
use serde::{Deserialize, Serialize};

/// Error body the backend returns on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Request body for social sign-in.
#[derive(Debug, Serialize)]
pub struct SocialLoginRequest {
    pub provider: AuthProvider,
}

/// Request body for starting a stream.
#[derive(Debug, Serialize)]
pub struct StartStreamRequest<'a> {
    pub title: &'a str,
    pub category: &'a str,
}

/// Response body of a stream like.
#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    pub likes: u64,
}
