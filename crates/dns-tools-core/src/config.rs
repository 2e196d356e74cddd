//! Configuration types for dns-tools
//!
//! Credentials come from the environment first, then from command-line
//! flags. The client secret is never taken from a flag: when
//! `AZURE_CLIENT_SECRET` is unset it is prompted for.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::zone;

pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const ENV_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const ENV_RESOURCE_MANAGER_URL: &str = "AZURE_RESOURCE_MANAGER_URL";

/// Default Microsoft identity platform host
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Default Azure Resource Manager endpoint
pub const DEFAULT_RESOURCE_MANAGER_URL: &str = "https://management.azure.com";

/// Identifiers given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialArgs {
    pub tenant_id: Option<String>,
    pub subscription_id: Option<String>,
    pub client_id: Option<String>,
}

/// Service principal credentials and endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct AzureCredentials {
    pub tenant_id: String,
    pub subscription_id: String,
    pub client_id: String,
    /// ⚠️ NEVER log this value
    pub client_secret: String,
    pub authority_host: String,
    pub resource_manager_url: String,
}

// Custom Debug implementation that hides the client secret
impl fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<REDACTED>")
            .field("authority_host", &self.authority_host)
            .field("resource_manager_url", &self.resource_manager_url)
            .finish()
    }
}

impl AzureCredentials {
    /// Resolve credentials: environment, then flags, then (secret only) prompt
    ///
    /// `env` looks up an environment variable; `prompt` asks the user for
    /// the client secret and is only called once all identifiers resolved.
    pub fn resolve<E, P>(args: &CredentialArgs, env: E, prompt: P) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
        P: FnOnce(&str) -> Result<String>,
    {
        let required = |name: &str, flag: &Option<String>| {
            env(name)
                .or_else(|| flag.clone())
                .ok_or_else(|| Error::missing_parameter(name))
        };

        let subscription_id = required(ENV_SUBSCRIPTION_ID, &args.subscription_id)?;
        let client_id = required(ENV_CLIENT_ID, &args.client_id)?;
        let tenant_id = required(ENV_TENANT_ID, &args.tenant_id)?;

        let client_secret = match env(ENV_CLIENT_SECRET) {
            Some(secret) => secret,
            None => prompt("client-secret: ")?,
        };

        let authority_host =
            env(ENV_AUTHORITY_HOST).unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());
        let resource_manager_url = env(ENV_RESOURCE_MANAGER_URL)
            .unwrap_or_else(|| DEFAULT_RESOURCE_MANAGER_URL.to_string());

        Ok(Self {
            tenant_id,
            subscription_id,
            client_id,
            client_secret,
            authority_host: authority_host.trim_end_matches('/').to_string(),
            resource_manager_url: resource_manager_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve against the process environment
    pub fn from_env<P>(args: &CredentialArgs, prompt: P) -> Result<Self>
    where
        P: FnOnce(&str) -> Result<String>,
    {
        Self::resolve(args, |name| std::env::var(name).ok(), prompt)
    }
}

/// Zone and file a tool run works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTarget {
    pub resource_group: String,
    /// Normalized zone name (no leading or trailing dot)
    pub zone_name: String,
    pub csv_file: PathBuf,
}

impl ZoneTarget {
    pub fn new(
        resource_group: impl Into<String>,
        zone_name: &str,
        csv_file: impl Into<PathBuf>,
    ) -> Result<Self> {
        let resource_group = resource_group.into();
        if resource_group.is_empty() {
            return Err(Error::config("Resource group cannot be empty"));
        }

        let zone_name = zone::normalize_zone_name(zone_name);
        if zone_name.is_empty() {
            return Err(Error::config("Zone name cannot be empty"));
        }

        Ok(Self {
            resource_group,
            zone_name,
            csv_file: csv_file.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn flags() -> CredentialArgs {
        CredentialArgs {
            tenant_id: Some("flag-tenant".into()),
            subscription_id: Some("flag-sub".into()),
            client_id: Some("flag-client".into()),
        }
    }

    #[test]
    fn test_environment_overrides_flags() {
        let env = env_of(&[
            (ENV_TENANT_ID, "env-tenant"),
            (ENV_CLIENT_SECRET, "s3cret"),
        ]);
        let creds = AzureCredentials::resolve(&flags(), env, |_| panic!("no prompt")).unwrap();
        assert_eq!(creds.tenant_id, "env-tenant");
        assert_eq!(creds.subscription_id, "flag-sub");
        assert_eq!(creds.client_id, "flag-client");
        assert_eq!(creds.client_secret, "s3cret");
        assert_eq!(creds.authority_host, DEFAULT_AUTHORITY_HOST);
        assert_eq!(creds.resource_manager_url, DEFAULT_RESOURCE_MANAGER_URL);
    }

    #[test]
    fn test_secret_is_prompted_when_unset() {
        let creds =
            AzureCredentials::resolve(&flags(), env_of(&[]), |label| {
                assert_eq!(label, "client-secret: ");
                Ok("typed".to_string())
            })
            .unwrap();
        assert_eq!(creds.client_secret, "typed");
    }

    #[test]
    fn test_missing_identifier_fails_before_prompt() {
        let args = CredentialArgs {
            tenant_id: None,
            ..flags()
        };
        let err = AzureCredentials::resolve(&args, env_of(&[]), |_| panic!("no prompt"))
            .unwrap_err();
        assert_eq!(err.to_string(), "AZURE_TENANT_ID is a required parameter.");

        let err = AzureCredentials::resolve(&CredentialArgs::default(), env_of(&[]), |_| {
            panic!("no prompt")
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "AZURE_SUBSCRIPTION_ID is a required parameter.");
    }

    #[test]
    fn test_endpoint_overrides_drop_trailing_slash() {
        let env = env_of(&[
            (ENV_CLIENT_SECRET, "s"),
            (ENV_AUTHORITY_HOST, "http://127.0.0.1:9000/"),
            (ENV_RESOURCE_MANAGER_URL, "http://127.0.0.1:9001/"),
        ]);
        let creds = AzureCredentials::resolve(&flags(), env, |_| unreachable!()).unwrap();
        assert_eq!(creds.authority_host, "http://127.0.0.1:9000");
        assert_eq!(creds.resource_manager_url, "http://127.0.0.1:9001");
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let env = env_of(&[(ENV_CLIENT_SECRET, "super_secret_value")]);
        let creds = AzureCredentials::resolve(&flags(), env, |_| unreachable!()).unwrap();
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret_value"));
        assert!(debug_str.contains("AzureCredentials"));
    }

    #[test]
    fn test_zone_target_normalizes_zone() {
        let target = ZoneTarget::new("dns-rg", ".example.com.", "zone.csv").unwrap();
        assert_eq!(target.zone_name, "example.com");
        assert!(ZoneTarget::new("dns-rg", ".", "zone.csv").is_err());
        assert!(ZoneTarget::new("", "example.com", "zone.csv").is_err());
    }
}
