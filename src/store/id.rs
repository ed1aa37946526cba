use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Canonical record identifier: 24 lowercase hex characters (12 bytes).
///
/// This is the document-store id format every handler validates before any
/// lookup. Construction goes through `parse` or `generate`, so a held
/// `RecordId` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub const LEN: usize = 24;

    /// Check whether a string is a well-formed identifier.
    /// Pure, never fails: wrong length or non-hex input is simply `false`.
    pub fn is_valid(s: &str) -> bool {
        s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse and canonicalize (lowercase) an identifier.
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid(s) {
            Some(Self(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Generate a fresh identifier from 12 bytes of v4 uuid entropy.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let hex: String = uuid.as_bytes()[..12].iter().map(|b| format!("{:02x}", b)).collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidRecordId(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid record id: {0}")]
pub struct InvalidRecordId(pub String);

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid record id: {}", s)))
    }
}
