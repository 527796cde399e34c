// ── Core identity types ──
//
// Hosts, categories and roles are all keyed by the integer primary keys
// the host-listing source hands out. Distinct newtypes keep them from
// being mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

integer_id! {
    /// Stable identifier of a managed host.
    HostId
}

integer_id! {
    /// Identifier of a node in the category hierarchy.
    CategoryId
}

integer_id! {
    /// Identifier of the role whose category permissions are edited.
    RoleId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<HostId>().unwrap(), HostId(42));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<CategoryId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&RoleId(7)).unwrap();
        assert_eq!(json, "7");
        let back: RoleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoleId(7));
    }
}
