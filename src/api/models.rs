use serde::{Deserialize, Serialize};

use crate::projection::{Coordinate, RestrictedCoordinate};

pub const RESTRICT_PATH: &str = "/spatial/restricttonavmesh";
pub const LOGIN_PATH: &str = "/user/login";
pub const DDS_TOKEN_PATH: &str = "/service/domains-access-token";
pub const DOMAIN_AUTH_ROUTE: &str = "/api/v1/domains/:domain_id/auth";

/// Path of the domain auth call for one domain
pub fn domain_auth_path(domain_id: &str) -> String {
    format!("/api/v1/domains/{}/auth", domain_id)
}

/// Body of `POST /spatial/restricttonavmesh`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictRequest {
    pub domain_id: String,
    pub domain_server_url: String,
    pub target: Coordinate,
    pub radius: f64,
}

impl RestrictRequest {
    /// Builds a request for a floor target; y is always sent as 0
    pub fn new(domain_id: &str, domain_server_url: &str, target: Coordinate, radius: f64) -> Self {
        Self {
            domain_id: domain_id.to_string(),
            domain_server_url: domain_server_url.to_string(),
            target: Coordinate::on_floor(target.x, target.z),
            radius,
        }
    }
}

/// Successful response; the service may send more fields than these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictResponse {
    pub restricted: RestrictedCoordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Coordinate>,
}

/// Body of `POST /user/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token answer of the login and domains-access-token calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainServer {
    pub url: String,
}

/// Answer of `POST /api/v1/domains/{id}/auth`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAuthResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_server: Option<DomainServer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
