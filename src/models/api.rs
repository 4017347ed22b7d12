//! Bodies of the operational endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /api/version`: crate version plus build metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    /// Git commit the binary was built from, or `unknown`
    pub commit: String,
    /// RFC 3339 build timestamp
    pub build_time: String,
}
