// # Azure DNS Zone Service
//
// Implements `ZoneService` on top of the Azure Resource Manager REST API.
//
// ## Scope
//
// - ✅ Service principal token (OAuth2 client credentials), fetched once per run
// - ✅ Zone lookup, record set listing (all pages), lookup and creation
// - ✅ Specific error handling for HTTP status codes (401/403, 404, 412, 429, 5xx)
// - ✅ Create is create-only (`If-None-Match: *`), existing sets are never overwritten
// - ❌ NO retry logic and NO backoff
// - ❌ NO token refresh (a run is far shorter than a token's lifetime)
//
// ## Security Requirements
//
// - Client secret and access token NEVER appear in logs or Debug output
//
// ## API Reference
//
// - Token: POST `{authority}/{tenant}/oauth2/v2.0/token`
// - Zone: GET `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Network/dnsZones/{zone}`
// - List: GET `.../dnsZones/{zone}/all`
// - Record set: GET / PUT `.../dnsZones/{zone}/{type}/{name}`

pub mod models;

use async_trait::async_trait;
use dns_tools_core::{AzureCredentials, Error, RecordSet, RecordType, Result, Zone, ZoneService};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use models::{ArmErrorResponse, ArmRecordSet, ArmZone, RecordSetPage, TokenErrorResponse, TokenResponse};

/// Provider name used in errors and logs
pub const PROVIDER: &str = "azure";

/// DNS management API version
pub const API_VERSION: &str = "2018-05-01";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Azure DNS zone service
///
/// Holds a bearer token for Azure Resource Manager; create one with
/// [`AzureDnsProvider::connect`].
pub struct AzureDnsProvider {
    subscription_id: String,

    /// Resource Manager base URL without trailing slash
    resource_manager_url: String,

    /// Bearer token for Resource Manager
    /// ⚠️ NEVER log this value
    access_token: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the access token
impl std::fmt::Debug for AzureDnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDnsProvider")
            .field("subscription_id", &self.subscription_id)
            .field("resource_manager_url", &self.resource_manager_url)
            .field("access_token", &"<REDACTED>")
            .finish()
    }
}

impl AzureDnsProvider {
    /// Authenticate as a service principal and build the provider
    pub async fn connect(credentials: &AzureCredentials) -> Result<Self> {
        let client = build_client()?;
        let access_token = acquire_token(&client, credentials).await?;

        Ok(Self {
            subscription_id: credentials.subscription_id.clone(),
            resource_manager_url: credentials.resource_manager_url.clone(),
            access_token,
            client,
        })
    }

    /// Build the provider from an already acquired token
    pub fn with_token(
        subscription_id: impl Into<String>,
        resource_manager_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(Error::auth("Access token cannot be empty"));
        }

        Ok(Self {
            subscription_id: subscription_id.into(),
            resource_manager_url: resource_manager_url.into().trim_end_matches('/').to_string(),
            access_token,
            client: build_client()?,
        })
    }

    fn zone_url(&self, resource_group: &str, zone_name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/dnsZones/{}",
            self.resource_manager_url, self.subscription_id, resource_group, zone_name
        )
    }

    fn record_set_url(
        &self,
        resource_group: &str,
        zone_name: &str,
        record_type: &RecordType,
        relative_name: &str,
    ) -> String {
        format!(
            "{}/{}/{}",
            self.zone_url(resource_group, zone_name),
            record_type,
            relative_name
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
    }

    /// Send a request and decode a successful JSON response
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, context: &str) -> Result<T> {
        let response = send(request, context).await?;
        response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("{}: failed to parse response: {}", context, e)))
    }
}

fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(DEFAULT_HTTP_TIMEOUT)
        .build()
        .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))
}

/// Request a Resource Manager token with the client credentials grant
async fn acquire_token(client: &reqwest::Client, credentials: &AzureCredentials) -> Result<String> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        credentials.authority_host, credentials.tenant_id
    );
    let scope = format!("{}/.default", credentials.resource_manager_url);

    tracing::debug!("Requesting access token for client {}", credentials.client_id);

    let response = client
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("scope", scope.as_str()),
        ])
        .send()
        .await
        .map_err(|e| Error::http(format!("Token request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<TokenErrorResponse>(&body)
            .map(|e| format!("{}: {}", e.error, e.error_description))
            .unwrap_or(body);
        return Err(Error::auth(format!(
            "Token request rejected ({}): {}",
            status, detail
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::auth(format!("Failed to parse token response: {}", e)))?;

    tracing::debug!("Access token acquired (expires in {:?}s)", token.expires_in);
    Ok(token.access_token)
}

/// Send a request, mapping transport failures and error statuses
async fn send(request: RequestBuilder, context: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::http(format!("{}: HTTP request failed: {}", context, e)))?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    Err(status_error(status, &body, context))
}

/// Map an ARM error status to an [`Error`]
fn status_error(status: StatusCode, body: &str, context: &str) -> Error {
    let message = serde_json::from_str::<ArmErrorResponse>(body)
        .map(|e| format!("{} ({})", e.error.message, e.error.code))
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "{}: invalid credentials or insufficient permissions. Status: {} - {}",
            context, status, message
        )),
        404 => Error::not_found(format!("{}: {}", context, message)),
        412 => Error::provider(
            PROVIDER,
            format!("{}: record set already exists. Status: {}", context, status),
        ),
        429 => Error::rate_limited(format!("{}: {}", context, message)),
        500..=599 => Error::provider(
            PROVIDER,
            format!("{}: Azure server error (transient): {} - {}", context, status, message),
        ),
        _ => Error::provider(PROVIDER, format!("{}: {} - {}", context, status, message)),
    }
}

#[async_trait]
impl ZoneService for AzureDnsProvider {
    async fn get_zone(&self, resource_group: &str, zone_name: &str) -> Result<Zone> {
        let url = self.zone_url(resource_group, zone_name);
        tracing::debug!("Looking up zone {} in resource group {}", zone_name, resource_group);

        let zone: ArmZone = self
            .send_json(
                self.get(&url).query(&[("api-version", API_VERSION)]),
                &format!("Zone lookup for {}", zone_name),
            )
            .await?;
        Ok(zone.into())
    }

    async fn list_record_sets(&self, resource_group: &str, zone_name: &str) -> Result<Vec<RecordSet>> {
        let context = format!("Record set listing for {}", zone_name);
        let first = format!("{}/all", self.zone_url(resource_group, zone_name));

        let mut page: RecordSetPage = self
            .send_json(self.get(&first).query(&[("api-version", API_VERSION)]), &context)
            .await?;
        let mut sets = Vec::new();

        loop {
            for arm in page.value {
                sets.push(arm.into_record_set()?);
            }
            let Some(next) = page.next_link else {
                break;
            };
            tracing::debug!("Fetching next record set page");
            // nextLink already carries the api-version
            page = self.send_json(self.get(&next), &context).await?;
        }

        tracing::debug!("Listed {} record set(s) in {}", sets.len(), zone_name);
        Ok(sets)
    }

    async fn get_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        relative_name: &str,
        record_type: &RecordType,
    ) -> Result<Option<RecordSet>> {
        let url = self.record_set_url(resource_group, zone_name, record_type, relative_name);
        let context = format!("Record set lookup for {} {}", record_type, relative_name);

        let result: Result<ArmRecordSet> = self
            .send_json(self.get(&url).query(&[("api-version", API_VERSION)]), &context)
            .await;

        match result {
            Ok(arm) => arm.into_record_set().map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        record_set: &RecordSet,
    ) -> Result<RecordSet> {
        let record_type = record_set.record_type();
        let url = self.record_set_url(resource_group, zone_name, &record_type, &record_set.name);
        let body = ArmRecordSet::create_body(record_set)?;

        tracing::info!(
            "Creating record set {} {} in {} (TTL {})",
            record_type,
            record_set.name,
            zone_name,
            record_set.ttl
        );

        let request = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .query(&[("api-version", API_VERSION)])
            .header("If-None-Match", "*")
            .json(&body);
        let created: ArmRecordSet = self
            .send_json(
                request,
                &format!("Record set creation for {} {}", record_type, record_set.name),
            )
            .await?;

        created.into_record_set()
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
