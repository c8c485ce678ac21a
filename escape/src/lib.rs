//! Key card access control for a prison made of connected rooms.

pub mod error;
pub mod layout;
pub mod parser;
pub mod person;
pub mod room;

mod random_test;

pub use error::{CardError, LayoutError, PrisonError};
pub use layout::{PrisonLayout, load_from_env};
pub use parser::{KeyCardParser, reachable_rooms};
pub use person::Person;
pub use room::{AllowedPersons, Prison, PrisonRoom, RoomKey};
