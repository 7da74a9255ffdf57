//! Strongly-typed identifiers used across the domain.
//!
//! Every persisted entity is addressed by a 12-byte object id rendered as 24
//! lowercase hex characters. On the wire ids travel wrapped as
//! `{"$oid": "<hex>"}`; plain hex strings are accepted when reading.

use core::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::DomainError;

static OID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// 12-byte object identity (4-byte timestamp, 5 random bytes, 3-byte counter).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid([u8; 12]);

impl Oid {
    /// Placeholder id clients send for "this is a new entry, assign an id".
    pub const SENTINEL: Oid = Oid([0xff; 12]);

    /// Allocate a fresh id.
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let secs = chrono::Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&Uuid::new_v4().as_bytes()[..5]);
        let count = OID_COUNTER.fetch_add(1, Ordering::Relaxed);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl core::fmt::Display for Oid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Oid {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| DomainError::invalid_id(format!("Oid '{s}': {e}")))?;
        Ok(Self(bytes))
    }
}

#[derive(Serialize)]
struct OidWire<'a> {
    #[serde(rename = "$oid")]
    oid: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OidRepr {
    Wrapped {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OidWire { oid: &self.to_hex() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match OidRepr::deserialize(deserializer)? {
            OidRepr::Wrapped { oid } => oid,
            OidRepr::Plain(oid) => oid,
        };
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a player account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Oid);

/// Identifier of a guild (clan).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(Oid);

/// Identifier of a loadout aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadoutId(Oid);

macro_rules! impl_oid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            pub fn new() -> Self {
                Self(Oid::new())
            }

            pub fn from_oid(oid: Oid) -> Self {
                Self(oid)
            }

            pub fn as_oid(&self) -> &Oid {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Oid> for $t {
            fn from(value: Oid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Oid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let oid = Oid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(oid))
            }
        }
    };
}

impl_oid_newtype!(AccountId, "AccountId");
impl_oid_newtype!(GuildId, "GuildId");
impl_oid_newtype!(LoadoutId, "LoadoutId");
