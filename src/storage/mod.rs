//! Flat-file persistence: reference lists and capture directories.
//!
//! Both stores are append-only from the controller's point of view.
//! Nothing here rewrites, deduplicates or deletes existing records.

pub mod captures;
pub mod reference_list;

use core::fmt;
use core::str::FromStr;

use crate::error::EnrollError;

/// Which reference list an encoding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListId {
    Allowlist,
    Denylist,
}

impl ListId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowlist => "allowlist",
            Self::Denylist => "denylist",
        }
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListId {
    type Err = EnrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowlist" => Ok(Self::Allowlist),
            "denylist" => Ok(Self::Denylist),
            _ => Err(EnrollError::InvalidListId),
        }
    }
}
