// API response types

use serde::Serialize;
use std::collections::BTreeMap;

/// Response body for GET /api/status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    /// RFC 3339 timestamp of the response
    pub timestamp: String,
    pub version: &'static str,
    pub storage_dir: String,
    /// File names present in the storage directory
    pub files: Vec<String>,
}

/// Response body for GET /api/info
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub hostname: String,
    pub ip_address: String,
    pub server: String,
    pub version: &'static str,
    pub storage_dir: String,
    /// Full process environment; present only when api.expose_environment is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
}
