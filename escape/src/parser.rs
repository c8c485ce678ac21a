use crate::error::CardError;
use crate::person::Person;
use crate::room::{Prison, RoomKey};
use std::collections::HashSet;

const RESERVED_FINGERPRINT: i32 = 1819994586;
const RESERVED_DIGEST: [u8; 32] = [
    0xd2, 0x87, 0x7c, 0x71, 0x2d, 0xa7, 0x6f, 0x4e, 0x8c, 0xd9, 0xb5, 0xb9, 0x80, 0xc3, 0x94, 0x54,
    0x14, 0x74, 0xae, 0xd9, 0x5e, 0x52, 0x6a, 0x43, 0xad, 0x82, 0x62, 0x94, 0x32, 0x98, 0x76, 0x0b,
];

/// Turns raw key card data (`first,last`) into a `Person`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCardParser {
    reserved: i32,
    reserved_digest: [u8; 32],
}

impl Default for KeyCardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCardParser {
    pub fn new() -> Self {
        Self::watching(RESERVED_FINGERPRINT, RESERVED_DIGEST)
    }

    /// Parser whose reserved card has the given `Person::fingerprint` and
    /// `Person::digest`. The fingerprint is only a pre-filter.
    pub fn watching(fingerprint: i32, digest: [u8; 32]) -> Self {
        Self {
            reserved: fingerprint,
            reserved_digest: digest,
        }
    }

    fn is_reserved(&self, person: &Person) -> bool {
        person.fingerprint() == self.reserved && person.digest() == self.reserved_digest
    }

    pub fn read(&self, prison: &Prison, card_data: &str) -> Result<Person, CardError> {
        let fields: Vec<&str> = card_data.split(',').collect();
        let [first, last] = fields.as_slice() else {
            tracing::warn!(fields = fields.len(), "rejected malformed key card");
            return Err(CardError::Malformed {
                fields: fields.len(),
            });
        };
        let person = Person::new(*first, *last);
        tracing::debug!(fields = 2, "key card read");

        if self.is_reserved(&person) {
            if let Some(home) = prison.cell_for(&person) {
                refresh_access(prison, home, &person);
            }
        }
        Ok(person)
    }
}

fn refresh_access(prison: &Prison, home: RoomKey, holder: &Person) {
    for key in reachable_rooms(prison, home) {
        let fresh = Person::new(holder.first_name(), holder.last_name());
        prison[key].admit(fresh, key != home);
    }
}

/// Every room reachable from `start`, each exactly once, in depth-first order.
/// Keys that do not belong to `prison` are skipped.
pub fn reachable_rooms(prison: &Prison, start: RoomKey) -> Vec<RoomKey> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![start];

    while let Some(key) = stack.pop() {
        if !visited.insert(key) {
            continue;
        }
        let Some(room) = prison.room(key) else {
            continue;
        };
        order.push(key);
        stack.extend(
            room.neighbours()
                .iter()
                .rev()
                .filter(|k| !visited.contains(*k))
                .copied(),
        );
    }
    order
}
