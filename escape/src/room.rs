use crate::error::PrisonError;
use crate::person::Person;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;
use std::sync::{PoisonError, RwLock};

/// Identity of a room inside its `Prison`. Two rooms may share an `id`
/// but never a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(usize);

impl RoomKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Set of persons allowed into a room.
///
/// Members listed in `hidden` are full members for `contains`, `len` and
/// `iter`, but are left out when the set is rendered with `Display`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedPersons {
    members: HashSet<Person>,
    hidden: HashSet<Person>,
}

impl AllowedPersons {
    pub fn new(members: HashSet<Person>) -> Self {
        Self {
            members,
            hidden: HashSet::new(),
        }
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.members.contains(person)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_masked(&self) -> bool {
        !self.hidden.is_empty()
    }

    /// Builds a new set with `person` added. With `conceal` the person is
    /// also masked from rendering; without it any earlier mask on them is lifted.
    pub fn with_member(&self, person: Person, conceal: bool) -> Self {
        let mut members = self.members.clone();
        let mut hidden = self.hidden.clone();
        if conceal {
            hidden.insert(person.clone());
        } else {
            hidden.remove(&person);
        }
        members.insert(person);
        Self { members, hidden }
    }
}

impl fmt::Display for AllowedPersons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visible: Vec<&Person> = self
            .members
            .iter()
            .filter(|p| !self.hidden.contains(*p))
            .collect();
        visible.sort();

        f.write_str("[")?;
        for (i, person) in visible.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{person}")?;
        }
        f.write_str("]")
    }
}

#[derive(Debug)]
pub struct PrisonRoom {
    id: i32,
    neighbours: Vec<RoomKey>,
    allowed: RwLock<AllowedPersons>,
}

impl PrisonRoom {
    fn new(id: i32, allowed: HashSet<Person>) -> Self {
        Self {
            id,
            neighbours: Vec::new(),
            allowed: RwLock::new(AllowedPersons::new(allowed)),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn neighbours(&self) -> &[RoomKey] {
        &self.neighbours
    }

    pub fn allows_entrance(&self, person: &Person) -> bool {
        self.allowed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(person)
    }

    /// Copy of the current allowed set.
    pub fn allowed_persons(&self) -> AllowedPersons {
        self.allowed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps the allowed set for a copy that also holds `person`.
    pub(crate) fn admit(&self, person: Person, conceal: bool) {
        let mut allowed = self.allowed.write().unwrap_or_else(PoisonError::into_inner);
        let next = allowed.with_member(person, conceal);
        *allowed = next;
        tracing::trace!(room = self.id, members = allowed.len(), "allowed set replaced");
    }
}

impl fmt::Display for PrisonRoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed = self.allowed.read().unwrap_or_else(PoisonError::into_inner);
        write!(f, "allowed persons:{allowed}")
    }
}

/// Room graph plus the table assigning persons to their home cell.
#[derive(Debug, Default)]
pub struct Prison {
    rooms: Vec<PrisonRoom>,
    cells: HashMap<Person, RoomKey>,
}

impl Prison {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, id: i32, allowed: HashSet<Person>) -> RoomKey {
        let key = RoomKey(self.rooms.len());
        self.rooms.push(PrisonRoom::new(id, allowed));
        key
    }

    /// Links two rooms in both directions. Self-loops and repeated links are ignored.
    pub fn connect(&mut self, a: RoomKey, b: RoomKey) -> Result<(), PrisonError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(());
        }
        if !self.rooms[a.0].neighbours.contains(&b) {
            self.rooms[a.0].neighbours.push(b);
        }
        if !self.rooms[b.0].neighbours.contains(&a) {
            self.rooms[b.0].neighbours.push(a);
        }
        Ok(())
    }

    pub fn room(&self, key: RoomKey) -> Option<&PrisonRoom> {
        self.rooms.get(key.0)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomKey, &PrisonRoom)> {
        self.rooms.iter().enumerate().map(|(i, room)| (RoomKey(i), room))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn cell_for(&self, person: &Person) -> Option<RoomKey> {
        self.cells.get(person).copied()
    }

    /// Replaces the whole home-assignment table.
    pub fn set_cells(&mut self, cells: HashMap<Person, RoomKey>) -> Result<(), PrisonError> {
        for key in cells.values() {
            self.check(*key)?;
        }
        self.cells = cells;
        Ok(())
    }

    fn check(&self, key: RoomKey) -> Result<(), PrisonError> {
        if key.0 < self.rooms.len() {
            Ok(())
        } else {
            Err(PrisonError::UnknownRoom(key))
        }
    }
}

impl Index<RoomKey> for Prison {
    type Output = PrisonRoom;

    fn index(&self, key: RoomKey) -> &PrisonRoom {
        &self.rooms[key.0]
    }
}
