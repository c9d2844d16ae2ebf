//! HTTP client for the restrict-to-navmesh endpoint

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::api::models::{RestrictRequest, RestrictResponse};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::projection::{Coordinate, RestrictedCoordinate};

/// A raw exchange with the service, kept so callers can print it
#[derive(Debug, Clone)]
pub struct Exchange {
    pub request: RestrictRequest,
    pub status: u16,
    pub body: String,
}

/// Sends single restrict requests to one navmesh endpoint
pub struct NavmeshClient {
    http: reqwest::Client,
    settings: Settings,
}

impl NavmeshClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            settings,
        })
    }

    /// Builds the request body for an already normalized target
    pub fn request_for(&self, target: Coordinate) -> RestrictRequest {
        RestrictRequest::new(
            &self.settings.domain_id,
            &self.settings.domain_server_url,
            target,
            self.settings.radius,
        )
    }

    /// Posts the request and returns the status and body as received
    pub async fn send(&self, request: RestrictRequest) -> Result<Exchange> {
        info!(endpoint = %self.settings.endpoint, "Sending restrict request");

        let mut call = self
            .http
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&request);

        if let Some(token) = &self.settings.access_token {
            call = call.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = call.send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), "Response received");

        Ok(Exchange {
            request,
            status: status.as_u16(),
            body,
        })
    }

    /// Restricts a normalized target to the navmesh.
    ///
    /// Only a 200 with a `restricted` object counts as success.
    pub async fn restrict(&self, target: Coordinate) -> Result<RestrictedCoordinate> {
        let exchange = self.send(self.request_for(target)).await?;
        parse_exchange(&exchange)
    }
}

/// Turns a raw exchange into the restricted coordinate or a request failure
pub fn parse_exchange(exchange: &Exchange) -> Result<RestrictedCoordinate> {
    if exchange.status != StatusCode::OK.as_u16() {
        warn!(status = exchange.status, body = %exchange.body, "Navmesh restriction failed");
        return Err(Error::Status {
            status: exchange.status,
            body: exchange.body.clone(),
        });
    }

    let response: RestrictResponse = serde_json::from_str(&exchange.body)?;
    Ok(response.restricted)
}
