//! Local stand-in for the navmesh restriction service.
//!
//! Serves the same `POST /spatial/restricttonavmesh` contract as the hosted
//! service, plus the posemesh login and domain auth calls, so the probe can
//! be run offline and tested end to end.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod walkable;

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::Result;
use crate::projection::RestrictedCoordinate;
use models::{RestrictRequest, RESTRICT_PATH};

pub use routes::create_router;
pub use walkable::WalkableArea;

/// How the mock answers restrict requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Project onto a walkable rectangle, 404 when out of radius
    Walkable(WalkableArea),
    /// Always answer this point
    Fixed(RestrictedCoordinate),
    /// Always answer this status
    Fail(u16),
}

pub const MOCK_POSEMESH_TOKEN: &str = "mock-posemesh-token";
pub const MOCK_DDS_TOKEN: &str = "mock-dds-token";
pub const MOCK_DOMAIN_SERVER: &str = "https://domain-server.mock";

/// Domain token the mock hands out for a domain
pub fn mock_domain_token(domain_id: &str) -> String {
    format!("mock-domain-token-{}", domain_id)
}

/// One call of the login chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    Login,
    DdsToken,
    DomainAuth,
}

/// Account the mock accepts, and optionally a step it refuses
#[derive(Debug, Clone, PartialEq)]
pub struct MockAuth {
    pub email: String,
    pub password: String,
    pub reject: Option<AuthStep>,
}

impl MockAuth {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            reject: None,
        }
    }

    /// Same account, but the given step answers 403
    pub fn rejecting(self, step: AuthStep) -> Self {
        Self {
            reject: Some(step),
            ..self
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("robot@example.com", "secret")
    }
}

/// A request as the mock received it
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub request: RestrictRequest,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Clone)]
pub struct MockState {
    behavior: MockBehavior,
    auth: Arc<MockAuth>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockState {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            auth: Arc::new(MockAuth::default()),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_auth(self, auth: MockAuth) -> Self {
        Self {
            auth: Arc::new(auth),
            ..self
        }
    }

    pub fn behavior(&self) -> MockBehavior {
        self.behavior
    }

    pub fn auth(&self) -> &MockAuth {
        &self.auth
    }

    pub fn record(&self, request: SeenRequest) {
        self.seen.lock().push(request);
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().clone()
    }
}

/// Serves the mock on an already bound listener until the task is dropped or fails
pub async fn serve(listener: TcpListener, state: MockState) -> Result<()> {
    info!(
        addr = ?listener.local_addr()?,
        behavior = ?state.behavior(),
        "Mock navmesh listening"
    );
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

/// A mock running in the background on an ephemeral local port
pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://host:port`, usable as posemesh or dds base URL
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL of the restrict endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url(), RESTRICT_PATH)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.requests()
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.state.requests().pop()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Starts a mock on `127.0.0.1:0` inside the current runtime
pub async fn spawn(behavior: MockBehavior) -> Result<MockServer> {
    spawn_with(MockState::new(behavior)).await
}

/// Like [`spawn`], with a fully configured state
pub async fn spawn_with(state: MockState) -> Result<MockServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn({
        let state = state.clone();
        async move {
            if let Err(e) = serve(listener, state).await {
                error!("Mock navmesh stopped: {}", e);
            }
        }
    });

    Ok(MockServer { addr, state, handle })
}
