//! Tenant (organization) records and default-tenant selection.

use serde::Deserialize;

use crate::SessionError;

/// Rate-limit tier that marks the consumer account's own organization.
pub const DEFAULT_TENANT_TIER: &str = "default_claude_ai";

/// One entry of the backend's organization listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rate_limit_tier: Option<String>,
}

/// Pick the tenant a session should use.
///
/// A single record is used as-is; with several, the one on the default
/// consumer tier wins.
pub fn select_tenant(tenants: &[Tenant]) -> Result<&Tenant, SessionError> {
    match tenants {
        [] => Err(SessionError::NoTenantFound),
        [only] => Ok(only),
        many => many
            .iter()
            .find(|t| t.rate_limit_tier.as_deref() == Some(DEFAULT_TENANT_TIER))
            .ok_or(SessionError::AmbiguousTenant),
    }
}
