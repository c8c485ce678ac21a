use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Holder of a key card. Equality and hashing are structural over both names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Person {
    first_name: String,
    last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// 31-polynomial over the UTF-16 units of each name, combined as
    /// `first * 31 + last`. Stable across runs and platforms, unlike `Hash`.
    pub fn fingerprint(&self) -> i32 {
        string_hash(&self.first_name)
            .wrapping_mul(31)
            .wrapping_add(string_hash(&self.last_name))
    }

    /// SHA-256 of the card form `first,last`.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = Sha256::new();
        h.update(self.first_name.as_bytes());
        h.update(b",");
        h.update(self.last_name.as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&h.finalize());
        out
    }
}

fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(unit as i32))
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person{{firstName='{}', lastName='{}'}}",
            self.first_name, self.last_name
        )
    }
}
