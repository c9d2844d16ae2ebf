//! The probe pipeline: normalize, restrict, derive the navigation target

use tracing::{error, info};

use crate::client::{parse_exchange, NavmeshClient};
use crate::error::Result;
use crate::projection::{compute_target, Coordinate};
use crate::types::{NavTarget, Restriction, Verification};

/// Tolerance used when comparing a probe result against a known answer
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Runs one probe and returns everything it observed.
///
/// Request failures are returned as errors; see [`probe`] for the variant
/// that reports and swallows them.
pub async fn run(client: &NavmeshClient, input: Coordinate) -> Result<Restriction> {
    info!(x = input.x, y = input.y, z = input.z, "Input coordinates");

    let sent = input.normalized();
    info!(x = sent.x, y = sent.y, z = sent.z, "Transformed coordinates for request");

    let request = client.request_for(sent);
    info!(body = %serde_json::to_string(&request)?, "Request body");

    let exchange = client.send(request).await?;
    info!(status = exchange.status, raw = %exchange.body, "Raw response");

    let restricted = parse_exchange(&exchange)?;
    let target = compute_target(sent, restricted);
    let record = Restriction::new(input, sent, restricted, target);

    info!(
        x = target.x,
        z = target.z,
        yaw = target.yaw,
        facing_yaw = target.facing_yaw(),
        delta_x = record.delta_x,
        delta_z = record.delta_z,
        "Calculated result"
    );
    Ok(record)
}

/// Runs one probe; a failed request is logged and yields `None`
pub async fn probe(client: &NavmeshClient, input: Coordinate) -> Option<NavTarget> {
    match run(client, input).await {
        Ok(record) => Some(record.target),
        Err(e) => {
            error!("Navmesh probe failed: {}", e);
            None
        }
    }
}

/// Compares a probe result against the expected target
pub fn verify(expected: NavTarget, actual: NavTarget, tolerance: f64) -> Verification {
    Verification::new(expected, actual, tolerance)
}
