//! Identity of the external database-tool services the bridge fronts.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Postgresql,
    Mongodb,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Postgresql, ServiceKind::Mongodb];

    /// Name used in routes, config tables and health payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Postgresql => "postgresql",
            ServiceKind::Mongodb => "mongodb",
        }
    }

    /// Human readable name, used in log lines and echo messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Postgresql => "PostgreSQL",
            ServiceKind::Mongodb => "MongoDB",
        }
    }

    pub fn from_name(name: &str) -> Option<ServiceKind> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
