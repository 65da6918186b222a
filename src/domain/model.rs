//! Domain record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a domain record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DomainStatus {
    Activated,
    Deactivated,
    Unverified,
}

impl DomainStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainStatus::Activated => "ACTIVATED",
            DomainStatus::Deactivated => "DEACTIVATED",
            DomainStatus::Unverified => "UNVERIFIED",
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown domain status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for DomainStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVATED" => Ok(DomainStatus::Activated),
            "DEACTIVATED" => Ok(DomainStatus::Deactivated),
            "UNVERIFIED" => Ok(DomainStatus::Unverified),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One routable application endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    /// Fully qualified domain name, unique among active records.
    pub domain_name: String,
    pub application_id: String,
    pub owner_id: String,
    /// Contact address passed to the ACME issuer.
    pub soa_email: String,
    pub status: DomainStatus,
}

impl DomainRecord {
    pub fn is_active(&self) -> bool {
        self.status == DomainStatus::Activated
    }
}

/// Keep only `ACTIVATED` records, preserving input order.
pub fn select_active<I>(records: I) -> Vec<DomainRecord>
where
    I: IntoIterator<Item = DomainRecord>,
{
    records.into_iter().filter(DomainRecord::is_active).collect()
}
