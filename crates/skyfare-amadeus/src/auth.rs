//! Credential providers: anything that can hand out a bearer token.

use std::future::Future;

use crate::client::{AmadeusClient, Credentials};
use crate::error::AmadeusError;
use crate::types::AccessToken;

/// Source of Amadeus bearer tokens.
pub trait CredentialProvider: Send + Sync {
    /// Returns a token valid for at least one upstream request.
    fn access_token(&self) -> impl Future<Output = Result<AccessToken, AmadeusError>> + Send;
}

/// Runs the OAuth2 client-credentials grant on every call. Tokens are not cached.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client: AmadeusClient,
    credentials: Credentials,
}

impl ClientCredentials {
    #[must_use]
    pub fn new(client: AmadeusClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

impl CredentialProvider for ClientCredentials {
    async fn access_token(&self) -> Result<AccessToken, AmadeusError> {
        let token = self.client.fetch_token(&self.credentials).await?;
        tracing::debug!(expires_in = ?token.expires_in, "obtained amadeus access token");
        Ok(token)
    }
}
