//! PingOne identity client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::models::{
    AccessToken, Collection, Credentials, Population, PopulationsEmbedded, TokenResponse, User,
    UsersEmbedded,
};
use super::{IdentityApi, LinkedPage};
use crate::error::{ApiError, Result};

/// Default PingOne authentication host (North America region)
pub const DEFAULT_AUTH_HOST: &str = "https://auth.pingone.com";

/// Default PingOne Platform API host (North America region)
pub const DEFAULT_API_HOST: &str = "https://api.pingone.com";

/// Timeout for the token exchange. Collection calls are unbounded.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Hosts the client talks to.
///
/// Overridable for other PingOne regions (`auth.pingone.eu`, ...) and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_host: String,
    pub api_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_host: DEFAULT_AUTH_HOST.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

impl Endpoints {
    /// Default endpoints with optional per-host overrides
    pub fn with_overrides(auth_host: Option<&str>, api_host: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            auth_host: auth_host
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.auth_host),
            api_host: api_host
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_host),
        }
    }
}

/// Client for one PingOne environment
pub struct IdentityClient {
    http: HttpClient,
    credentials: Credentials,
    token_url: String,
    base_url: String,
}

impl IdentityClient {
    /// Create a client against the default PingOne hosts
    #[cfg(test)]
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_endpoints(credentials, Endpoints::default())
    }

    /// Create a client against custom hosts
    pub fn with_endpoints(credentials: Credentials, endpoints: Endpoints) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("usermanager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let token_url = format!("{}/{}/as/token", endpoints.auth_host, credentials.env_id);
        let base_url = format!(
            "{}/v1/environments/{}",
            endpoints.api_host, credentials.env_id
        );

        Ok(Self {
            http,
            credentials,
            token_url,
            base_url,
        })
    }

    /// Base URL of the environment's resources
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token exchange with the failure cause preserved, for logging.
    async fn request_token(&self) -> Result<AccessToken> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await
            .map_err(ApiError::from)?;

        let response = check_status(response).await?;
        let body: TokenResponse = decode(response).await?;

        body.access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| ApiError::InvalidResponse("missing access_token".to_string()).into())
    }

    /// Authenticated GET returning a decoded JSON body
    async fn get_json<T: DeserializeOwned>(&self, token: &AccessToken, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header("Authorization", token.bearer())
            .send()
            .await
            .map_err(ApiError::from)?;

        decode(check_status(response).await?).await
    }
}

/// Map non-success statuses onto typed API errors
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(body),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest(body),
        status if status.is_server_error() => {
            ApiError::ServerError(format!("{}: {}", status, body))
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    };
    Err(err.into())
}

/// Read the body and decode it as JSON
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

    serde_json::from_str(&text).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
    })
}

#[async_trait]
impl IdentityApi for IdentityClient {
    async fn acquire_token(&self) -> Option<AccessToken> {
        match self.request_token().await {
            Ok(token) => {
                debug!("Obtained access token for environment {}", self.credentials.env_id);
                Some(token)
            }
            Err(e) => {
                debug!(
                    "Token request for environment {} failed: {}",
                    self.credentials.env_id, e
                );
                None
            }
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    async fn list_populations(&self, token: &AccessToken) -> Result<Vec<Population>> {
        let url = format!("{}/populations", self.base_url);
        let page: Collection<PopulationsEmbedded> = self.get_json(token, &url).await?;
        Ok(page.embedded.into_populations())
    }

    async fn fetch_users_page(&self, token: &AccessToken, url: &str) -> Result<LinkedPage<User>> {
        let page: Collection<UsersEmbedded> = self.get_json(token, url).await?;
        let next = page.next_href().map(str::to_string);
        Ok(LinkedPage {
            items: page.embedded.users,
            next,
        })
    }

    async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<()> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let response = self
            .http
            .delete(&url)
            .header("Authorization", token.bearer())
            .send()
            .await
            .map_err(ApiError::from)?;

        check_status(response).await?;
        Ok(())
    }
}
