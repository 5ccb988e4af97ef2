use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role identifier used for RBAC.
///
/// Roles form a closed set: every role a principal can authenticate with has
/// exactly one entry in the permission matrix. The external string form is the
/// upper-case name (`"SUPERVISOR"`), both on the wire and in policy files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Supervisor,
    Technician,
    Hr,
    /// External customer using the order-tracking portal.
    Client,
}

/// A role string that does not name any [`Role`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manager,
        Role::Supervisor,
        Role::Technician,
        Role::Hr,
        Role::Client,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Supervisor => "SUPERVISOR",
            Role::Technician => "TECHNICIAN",
            Role::Hr => "HR",
            Role::Client => "CLIENT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "Tenant administrator",
            Role::Manager => "Operations manager with payment approval",
            Role::Supervisor => "Field supervisor coordinating orders and crews",
            Role::Technician => "Field technician executing orders",
            Role::Hr => "Human resources (attendance and staff accounts)",
            Role::Client => "Customer with portal access to their own orders",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
