//! Permission matrix: role -> granted actions, loaded once and read-only after.
//!
//! The matrix is built from a JSON policy definitions document:
//!
//! ```json
//! {
//!   "roles": {
//!     "ADMIN":   { "grants": ["*"] },
//!     "MANAGER": { "inherits": ["SUPERVISOR"], "grants": ["payments.approve"] }
//!   }
//! }
//! ```
//!
//! `"*"` and `inherits` are resolved while loading. The loaded matrix holds one
//! flat set per role, so every runtime lookup is a single membership test and
//! the full grant set of a role can be read off the matrix directly.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::{Action, Role};

const BUILTIN_POLICY: &str = include_str!("../policy/default.json");

const WILDCARD: &str = "*";

/// Policy definitions could not be turned into a matrix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed policy definitions: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read policy definitions from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown role '{0}' in policy definitions")]
    UnknownRole(String),

    #[error("role {0} has no entry in policy definitions")]
    MissingRole(Role),

    #[error("role {0} has more than one entry in policy definitions")]
    DuplicateRole(Role),

    #[error("role {role} grants unknown action '{action}'")]
    UnknownAction { role: Role, action: String },

    #[error("role {0} is part of an inheritance cycle")]
    InheritanceCycle(Role),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    #[serde(deserialize_with = "role_entries")]
    roles: Vec<(String, RoleDocument)>,
}

/// Role entries in document order, repeated keys included.
fn role_entries<'de, D>(deserializer: D) -> Result<Vec<(String, RoleDocument)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RoleEntries;

    impl<'de> Visitor<'de> for RoleEntries {
        type Value = Vec<(String, RoleDocument)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of role names to role definitions")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry::<String, RoleDocument>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(RoleEntries)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleDocument {
    #[serde(default)]
    inherits: Vec<String>,
    grants: Vec<String>,
}

struct RoleEntry {
    inherits: Vec<Role>,
    grants: HashSet<Action>,
}

/// Immutable mapping from each role to its flattened set of granted actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    grants: HashMap<Role, HashSet<Action>>,
}

impl PermissionMatrix {
    /// Build a matrix from a policy definitions document.
    ///
    /// Deterministic for a given document. Every [`Role`] must have an entry;
    /// every grant must name a catalog action or `"*"`.
    pub fn load(source: &str) -> Result<Self, ConfigError> {
        let document: PolicyDocument = serde_json::from_str(source)?;

        let mut entries: HashMap<Role, RoleEntry> = HashMap::new();
        for (name, role_doc) in document.roles {
            let role: Role = name.parse().map_err(|_| ConfigError::UnknownRole(name))?;
            if entries.contains_key(&role) {
                return Err(ConfigError::DuplicateRole(role));
            }
            entries.insert(role, parse_entry(role, role_doc)?);
        }

        if let Some(missing) = Role::ALL.into_iter().find(|r| !entries.contains_key(r)) {
            return Err(ConfigError::MissingRole(missing));
        }

        let mut flattened: HashMap<Role, HashSet<Action>> = HashMap::new();
        for role in Role::ALL {
            let mut path = Vec::new();
            flatten(role, &entries, &mut flattened, &mut path)?;
        }

        Ok(Self { grants: flattened })
    }

    /// Read and load a policy definitions file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&source)
    }

    /// The policy definitions compiled into the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::load(BUILTIN_POLICY)
    }

    /// Whether `role` is granted `action`.
    ///
    /// Never fails: a role without an entry is granted nothing.
    pub fn grants(&self, role: Role, action: Action) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Flattened grant set of a role, if it has an entry.
    pub fn granted(&self, role: Role) -> Option<&HashSet<Action>> {
        self.grants.get(&role)
    }

    /// Grants of a role in catalog order (for listing).
    pub fn granted_sorted(&self, role: Role) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|action| self.grants(role, *action))
            .collect()
    }

    /// Roles with an entry, in [`Role::ALL`] order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL
            .into_iter()
            .filter(|role| self.grants.contains_key(role))
    }

    #[cfg(test)]
    pub(crate) fn from_grants(grants: HashMap<Role, HashSet<Action>>) -> Self {
        Self { grants }
    }
}

fn parse_entry(role: Role, doc: RoleDocument) -> Result<RoleEntry, ConfigError> {
    let mut grants = HashSet::new();
    for key in doc.grants {
        if key == WILDCARD {
            grants.extend(Action::ALL.iter().copied());
            continue;
        }
        let action: Action = key
            .parse()
            .map_err(|_| ConfigError::UnknownAction { role, action: key })?;
        grants.insert(action);
    }

    let inherits = doc
        .inherits
        .into_iter()
        .map(|name| name.parse().map_err(|_| ConfigError::UnknownRole(name)))
        .collect::<Result<Vec<Role>, _>>()?;

    Ok(RoleEntry { inherits, grants })
}

fn flatten(
    role: Role,
    entries: &HashMap<Role, RoleEntry>,
    flattened: &mut HashMap<Role, HashSet<Action>>,
    path: &mut Vec<Role>,
) -> Result<HashSet<Action>, ConfigError> {
    if let Some(done) = flattened.get(&role) {
        return Ok(done.clone());
    }
    if path.contains(&role) {
        return Err(ConfigError::InheritanceCycle(role));
    }
    let entry = entries.get(&role).ok_or(ConfigError::MissingRole(role))?;

    path.push(role);
    let mut actions = entry.grants.clone();
    for parent in &entry.inherits {
        actions.extend(flatten(*parent, entries, flattened, path)?);
    }
    path.pop();

    flattened.insert(role, actions.clone());
    Ok(actions)
}
