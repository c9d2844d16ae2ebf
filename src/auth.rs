//! Posemesh login chain that yields a domain access token.
//!
//! Three calls, each authorized by the token of the previous one:
//! `POST {posemesh}/user/login`, `POST {posemesh}/service/domains-access-token`,
//! then `POST {dds}/api/v1/domains/{id}/auth`. Any non-2xx answer stops the
//! chain with a request failure.

use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::api::models::{
    domain_auth_path, DomainAuthResponse, LoginRequest, TokenResponse, DDS_TOKEN_PATH, LOGIN_PATH,
};
use crate::config::{AuthSettings, Settings};
use crate::error::{Error, Result};

/// What the domain auth call grants
#[derive(Debug, Clone, PartialEq)]
pub struct DomainAccess {
    pub access_token: String,
    pub domain_server_url: Option<String>,
}

pub struct DomainAuthClient {
    http: reqwest::Client,
    auth: AuthSettings,
    domain_id: String,
}

impl DomainAuthClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            auth: settings.auth.clone(),
            domain_id: settings.domain_id.clone(),
        })
    }

    /// Logs in to posemesh and returns the user token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let call = self
            .http
            .post(format!("{}{}", self.auth.posemesh_url, LOGIN_PATH))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            });

        let token: TokenResponse = self.post_for("posemesh login", call).await?;
        Ok(token.access_token)
    }

    /// Trades the user token for a domain discovery token
    pub async fn domains_access_token(&self, posemesh_token: &str) -> Result<String> {
        let call = self
            .http
            .post(format!("{}{}", self.auth.posemesh_url, DDS_TOKEN_PATH))
            .bearer_auth(posemesh_token);

        let token: TokenResponse = self.post_for("dds auth", call).await?;
        Ok(token.access_token)
    }

    /// Trades the discovery token for access to the configured domain
    pub async fn domain_access(&self, dds_token: &str) -> Result<DomainAccess> {
        let call = self
            .http
            .post(format!("{}{}", self.auth.dds_url, domain_auth_path(&self.domain_id)))
            .bearer_auth(dds_token);

        let response: DomainAuthResponse = self.post_for("domain auth", call).await?;
        if response.domain_server.is_none() {
            warn!(domain_id = %self.domain_id, "Domain auth response has no domain_server");
        }

        Ok(DomainAccess {
            access_token: response.access_token,
            domain_server_url: response.domain_server.map(|server| server.url),
        })
    }

    /// Runs the whole chain
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<DomainAccess> {
        let posemesh_token = self.login(email, password).await?;
        let dds_token = self.domains_access_token(&posemesh_token).await?;
        self.domain_access(&dds_token).await
    }

    async fn post_for<T: DeserializeOwned>(&self, step: &str, call: RequestBuilder) -> Result<T> {
        let response = call.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!(step, status = status.as_u16(), "Auth response received");

        if !status.is_success() {
            warn!(step, status = status.as_u16(), body = %body, "Auth step failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Fills in `access_token` (and the domain server URL, when granted) by
/// running the login chain.
///
/// Settings that already carry a token, or carry no credentials, come back
/// unchanged.
pub async fn authorize(settings: Settings) -> Result<Settings> {
    if settings.access_token.is_some() {
        info!("Using configured access token");
        return Ok(settings);
    }
    let Some((email, password)) = settings.auth.credentials() else {
        info!("No posemesh credentials configured, sending requests without a token");
        return Ok(settings);
    };

    info!(email, domain_id = %settings.domain_id, "Authenticating domain access");
    let access = DomainAuthClient::new(&settings)?
        .authenticate(email, password)
        .await?;

    Ok(Settings {
        access_token: Some(access.access_token),
        domain_server_url: access
            .domain_server_url
            .unwrap_or(settings.domain_server_url.clone()),
        ..settings
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        mock_domain_token, spawn, spawn_with, AuthStep, MockAuth, MockBehavior, MockServer,
        MockState, MOCK_DDS_TOKEN, MOCK_DOMAIN_SERVER, MOCK_POSEMESH_TOKEN,
    };
    use crate::client::NavmeshClient;
    use crate::projection::{Coordinate, RestrictedCoordinate};

    fn settings_for(server: &MockServer, password: &str) -> Settings {
        let mut settings = Settings {
            endpoint: server.endpoint(),
            domain_id: "679705fe".to_string(),
            ..Settings::default()
        };
        settings.auth.posemesh_url = server.base_url();
        settings.auth.dds_url = server.base_url();
        settings.auth.email = Some("robot@example.com".to_string());
        settings.auth.password = Some(password.to_string());
        settings
    }

    async fn fixed_server() -> MockServer {
        spawn(MockBehavior::Fixed(RestrictedCoordinate::new(0.0, 0.0)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_each_step() {
        let server = fixed_server().await;
        let client = DomainAuthClient::new(&settings_for(&server, "secret")).unwrap();

        let posemesh_token = client.login("robot@example.com", "secret").await.unwrap();
        assert_eq!(posemesh_token, MOCK_POSEMESH_TOKEN);

        let dds_token = client.domains_access_token(&posemesh_token).await.unwrap();
        assert_eq!(dds_token, MOCK_DDS_TOKEN);

        let access = client.domain_access(&dds_token).await.unwrap();
        assert_eq!(access.access_token, mock_domain_token("679705fe"));
        assert_eq!(access.domain_server_url.as_deref(), Some(MOCK_DOMAIN_SERVER));
    }

    #[tokio::test]
    async fn test_wrong_password_stops_at_login() {
        let server = fixed_server().await;
        let settings = settings_for(&server, "wrong");

        let err = authorize(settings).await.unwrap_err();

        assert!(matches!(err, Error::Status { status: 401, .. }));
        assert!(err.is_request_failure());
    }

    #[tokio::test]
    async fn test_refused_step_is_request_failure() {
        for step in [AuthStep::Login, AuthStep::DdsToken, AuthStep::DomainAuth] {
            let state = MockState::new(MockBehavior::Fail(500))
                .with_auth(MockAuth::default().rejecting(step));
            let server = spawn_with(state).await.unwrap();
            let client = DomainAuthClient::new(&settings_for(&server, "secret")).unwrap();

            let err = client
                .authenticate("robot@example.com", "secret")
                .await
                .unwrap_err();

            assert!(matches!(err, Error::Status { status: 403, .. }), "{:?}: {}", step, err);
        }
    }

    #[tokio::test]
    async fn test_authorize_fills_token_and_domain_server() {
        let server = fixed_server().await;

        let settings = authorize(settings_for(&server, "secret")).await.unwrap();

        assert_eq!(settings.access_token, Some(mock_domain_token("679705fe")));
        assert_eq!(settings.domain_server_url, MOCK_DOMAIN_SERVER);
    }

    #[tokio::test]
    async fn test_configured_token_skips_login() {
        let server = fixed_server().await;
        let settings = Settings {
            access_token: Some("static".to_string()),
            ..settings_for(&server, "wrong")
        };

        let settings = authorize(settings).await.unwrap();

        assert_eq!(settings.access_token.as_deref(), Some("static"));
        assert_eq!(settings.domain_server_url, "test");
    }

    #[tokio::test]
    async fn test_no_credentials_is_unchanged() {
        let settings = authorize(Settings::default()).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_restrict_uses_domain_token() {
        let server = fixed_server().await;
        let settings = authorize(settings_for(&server, "secret")).await.unwrap();
        let client = NavmeshClient::new(settings).unwrap();

        client.restrict(Coordinate::on_floor(1.0, -1.0)).await.unwrap();

        let seen = server.last_request().unwrap();
        let expected = format!("Bearer {}", mock_domain_token("679705fe"));
        assert_eq!(seen.authorization.as_deref(), Some(expected.as_str()));
        assert_eq!(seen.request.domain_id, "679705fe");
        assert_eq!(seen.request.domain_server_url, MOCK_DOMAIN_SERVER);
    }
}
