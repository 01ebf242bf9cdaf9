use async_trait::async_trait;
use auth::MembershipResolver;
use auth::Principal;
use auth::ResolverError;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use secrecy::SecretString;

use super::models::GiteaOrganization;
use crate::config::GiteaConfig;

/// Membership resolver backed by the Gitea REST API.
///
/// Authenticates with HTTP Basic credentials and lists the caller's organizations.
pub struct GiteaMembershipResolver {
    client: reqwest::Client,
    api_uri: String,
}

impl GiteaMembershipResolver {
    /// Create a resolver from configuration.
    ///
    /// # Arguments
    /// * `config` - Gitea API base URI and request timeout
    ///
    /// # Errors
    /// * `Unavailable` - HTTP client could not be built
    pub fn new(config: &GiteaConfig) -> Result<Self, ResolverError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| ResolverError::Unavailable(format!("Failed to build client: {}", e)))?;

        Ok(Self::with_client(client, &config.api_uri))
    }

    pub fn with_client(client: reqwest::Client, api_uri: &str) -> Self {
        Self {
            client,
            api_uri: api_uri.trim_end_matches('/').to_string(),
        }
    }

    fn orgs_url(&self) -> String {
        format!("{}/v1/user/orgs", self.api_uri)
    }

    /// Fetch the organizations visible to the authenticated user.
    pub async fn fetch_user_orgs(
        &self,
        principal: &Principal,
        credential: &SecretString,
    ) -> Result<Vec<GiteaOrganization>, ResolverError> {
        let response = self
            .client
            .get(self.orgs_url())
            .basic_auth(principal.as_str(), Some(credential.expose_secret()))
            .send()
            .await
            .map_err(|e| ResolverError::Unavailable(format!("Request to Gitea failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ResolverError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ResolverError::Unavailable(format!(
                "Could not get user orgs, status: {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            ResolverError::Unavailable(format!("Could not read response body: {}", e))
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            ResolverError::MalformedResponse(format!("Could not parse Gitea response: {}", e))
        })
    }
}

#[async_trait]
impl MembershipResolver for GiteaMembershipResolver {
    fn name(&self) -> &'static str {
        "gitea"
    }

    async fn resolve(
        &self,
        principal: &Principal,
        credential: &SecretString,
    ) -> Result<Vec<String>, ResolverError> {
        let organizations = self.fetch_user_orgs(principal, credential).await?;

        tracing::debug!(
            principal = %principal,
            organizations = organizations.len(),
            "Resolved Gitea organizations"
        );

        Ok(organizations
            .into_iter()
            .map(|organization| organization.name)
            .collect())
    }
}
