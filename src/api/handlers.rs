use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

use super::models::*;
use super::{
    mock_domain_token, AuthStep, MockBehavior, MockState, SeenRequest, MOCK_DDS_TOKEN,
    MOCK_DOMAIN_SERVER, MOCK_POSEMESH_TOKEN,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub async fn restrict_to_navmesh(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<RestrictRequest>,
) -> Result<Json<RestrictResponse>, ApiError> {
    info!(
        domain_id = %req.domain_id,
        x = req.target.x,
        z = req.target.z,
        radius = req.radius,
        "Restrict request"
    );

    state.record(SeenRequest {
        request: req.clone(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        accept: header_value(&headers, header::ACCEPT),
        authorization: header_value(&headers, header::AUTHORIZATION),
    });

    if !req.radius.is_finite() || req.radius <= 0.0 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("radius must be positive, got {}", req.radius),
        ));
    }

    let restricted = match state.behavior() {
        MockBehavior::Fixed(restricted) => restricted,
        MockBehavior::Fail(status) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            warn!(%status, "Answering with configured failure");
            return Err(api_error(status, "configured failure"));
        }
        MockBehavior::Walkable(area) => area.restrict(&req.target, req.radius).ok_or_else(|| {
            api_error(
                StatusCode::NOT_FOUND,
                format!(
                    "no navigable point within {} of ({}, {})",
                    req.radius, req.target.x, req.target.z
                ),
            )
        })?,
    };

    Ok(Json(RestrictResponse {
        restricted,
        target: Some(req.target),
    }))
}

/// Fails with 401 unless the request carries `Bearer <expected>`,
/// and with 403 when the mock is set to refuse `step`
fn check_step(
    state: &MockState,
    headers: &HeaderMap,
    expected: &str,
    step: AuthStep,
) -> Result<(), ApiError> {
    let authorized = header_value(headers, header::AUTHORIZATION)
        .and_then(|value| value.strip_prefix("Bearer ").map(str::to_string))
        .is_some_and(|token| token == expected);

    if !authorized {
        return Err(api_error(StatusCode::UNAUTHORIZED, "missing or invalid bearer token"));
    }
    if state.auth().reject == Some(step) {
        warn!(?step, "Refusing configured auth step");
        return Err(api_error(StatusCode::FORBIDDEN, "access denied"));
    }
    Ok(())
}

pub async fn login(
    State(state): State<MockState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!(email = %req.email, "Login request");

    let auth = state.auth();
    if req.email != auth.email || req.password != auth.password {
        return Err(api_error(StatusCode::UNAUTHORIZED, "invalid email or password"));
    }
    if auth.reject == Some(AuthStep::Login) {
        return Err(api_error(StatusCode::FORBIDDEN, "account disabled"));
    }

    Ok(Json(TokenResponse {
        access_token: MOCK_POSEMESH_TOKEN.to_string(),
    }))
}

pub async fn domains_access_token(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    check_step(&state, &headers, MOCK_POSEMESH_TOKEN, AuthStep::DdsToken)?;

    Ok(Json(TokenResponse {
        access_token: MOCK_DDS_TOKEN.to_string(),
    }))
}

pub async fn domain_auth(
    State(state): State<MockState>,
    Path(domain_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DomainAuthResponse>, ApiError> {
    info!(%domain_id, "Domain auth request");
    check_step(&state, &headers, MOCK_DDS_TOKEN, AuthStep::DomainAuth)?;

    Ok(Json(DomainAuthResponse {
        access_token: mock_domain_token(&domain_id),
        domain_server: Some(DomainServer {
            url: MOCK_DOMAIN_SERVER.to_string(),
        }),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
