//! navmesh-probe - verify navmesh restriction results against a known answer
//!
//! navmesh-probe sends a target coordinate to a restrict-to-navmesh service,
//! maps the restricted point back into the robot frame, and derives the yaw
//! the robot should hold when it arrives.
//!
//! # Examples
//!
//! ## Probing a service
//!
//! ```no_run
//! use navmesh_probe::{probe, Coordinate, NavmeshClient, Settings};
//!
//! # async fn run() -> navmesh_probe::Result<()> {
//! let settings = navmesh_probe::authorize(Settings::load()?).await?;
//! let client = NavmeshClient::new(settings)?;
//!
//! if let Some(target) = probe(&client, Coordinate::new(-6.77, 0.0, 0.60)).await {
//!     println!("Drive to x={}, z={}, yaw={}", target.x, target.z, target.yaw);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## The sign convention
//!
//! ```
//! use navmesh_probe::{compute_target, sign_normalize, Coordinate, RestrictedCoordinate};
//!
//! assert_eq!(sign_normalize(0.60), -0.60);
//! assert_eq!(sign_normalize(0.0), 0.0);
//!
//! let sent = Coordinate::new(-6.77, 0.0, 0.60).normalized();
//! let restricted = RestrictedCoordinate::new(-6.270300406695041, -0.6000000413170843);
//! let target = compute_target(sent, restricted);
//! assert_eq!(target.yaw, -3.14);
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod projection;
pub mod types;

pub use crate::auth::{authorize, DomainAccess, DomainAuthClient};
pub use crate::client::{Exchange, NavmeshClient};
pub use crate::config::Settings;
pub use crate::error::{Error, Result};
pub use crate::probe::{probe, run, verify, DEFAULT_TOLERANCE};
pub use crate::projection::{
    compute_target, facing_yaw, sign_normalize, Coordinate, RestrictedCoordinate,
};
pub use crate::types::{NavTarget, Restriction, Verification};
