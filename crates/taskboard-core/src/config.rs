//! Build-time Configuration
//!
//! Endpoint and log settings follow the build mode; the endpoint can be
//! pinned at compile time with `TASKBOARD_GRAPHQL_ENDPOINT`.

use log::LevelFilter;

pub const DEV_ENDPOINT: &str = "http://localhost:8000/graphql/";
pub const PROD_ENDPOINT: &str = "/graphql/";

/// Entry in the organization selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationOption {
    pub slug: &'static str,
    pub label: &'static str,
}

pub const ORGANIZATIONS: &[OrganizationOption] = &[
    OrganizationOption { slug: "acme-corp", label: "Acme Corporation" },
    OrganizationOption { slug: "techstart", label: "TechStart Inc" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub graphql_endpoint: String,
    pub organizations: &'static [OrganizationOption],
    pub default_organization: &'static str,
    pub log_level: LevelFilter,
    /// Number of log lines kept in memory
    pub log_capacity: usize,
}

impl TrackerConfig {
    pub fn from_build() -> Self {
        Self::resolve(option_env!("TASKBOARD_GRAPHQL_ENDPOINT"), cfg!(debug_assertions))
    }

    fn resolve(endpoint_override: Option<&str>, development: bool) -> Self {
        let graphql_endpoint = match endpoint_override.map(str::trim).filter(|e| !e.is_empty()) {
            Some(endpoint) => endpoint.to_string(),
            None if development => DEV_ENDPOINT.to_string(),
            None => PROD_ENDPOINT.to_string(),
        };
        Self {
            graphql_endpoint,
            organizations: ORGANIZATIONS,
            default_organization: ORGANIZATIONS[0].slug,
            log_level: if development { LevelFilter::Debug } else { LevelFilter::Info },
            log_capacity: 256,
        }
    }

    pub fn is_known_organization(&self, slug: &str) -> bool {
        self.organizations.iter().any(|o| o.slug == slug)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::from_build()
    }
}
