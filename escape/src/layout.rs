//! JSON description of a prison, used by setup code to build the room graph
//! and the home-assignment table before any card is read.
//!
//! ```json
//! {
//!   "rooms": [
//!     { "id": 1, "allowed": [{ "first_name": "Gus", "last_name": "Guard" }], "neighbours": [2] },
//!     { "id": 2, "allowed": [], "neighbours": [] }
//!   ],
//!   "cells": [{ "person": { "first_name": "Gus", "last_name": "Guard" }, "room": 1 }]
//! }
//! ```

use crate::error::LayoutError;
use crate::person::Person;
use crate::room::{Prison, RoomKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const LAYOUT_ENV: &str = "PRISON_LAYOUT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrisonLayout {
    pub rooms: Vec<RoomLayout>,
    #[serde(default)]
    pub cells: Vec<CellLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomLayout {
    pub id: i32,
    #[serde(default)]
    pub allowed: Vec<Person>,
    /// Ids of adjacent rooms. Links only need to be listed on one side.
    #[serde(default)]
    pub neighbours: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellLayout {
    pub person: Person,
    pub room: i32,
}

impl PrisonLayout {
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn build(&self) -> Result<Prison, LayoutError> {
        let mut prison = Prison::new();
        let mut keys: HashMap<i32, RoomKey> = HashMap::new();

        for room in &self.rooms {
            if keys.contains_key(&room.id) {
                return Err(LayoutError::DuplicateRoom(room.id));
            }
            let key = prison.add_room(room.id, room.allowed.iter().cloned().collect());
            keys.insert(room.id, key);
        }

        let lookup = |id: i32| keys.get(&id).copied().ok_or(LayoutError::UnknownRoom(id));

        for room in &self.rooms {
            let from = lookup(room.id)?;
            for &neighbour in &room.neighbours {
                prison.connect(from, lookup(neighbour)?)?;
            }
        }

        let mut cells = HashMap::new();
        for cell in &self.cells {
            cells.insert(cell.person.clone(), lookup(cell.room)?);
        }
        prison.set_cells(cells)?;

        tracing::info!(
            rooms = prison.len(),
            cells = self.cells.len(),
            "prison layout built"
        );
        Ok(prison)
    }
}

/// Builds the prison named by `PRISON_LAYOUT`, reading `.env` first if present.
pub fn load_from_env() -> Result<Prison> {
    dotenvy::dotenv().ok();
    let path = std::env::var(LAYOUT_ENV)
        .with_context(|| format!("{LAYOUT_ENV} environment variable is required"))?;
    let layout = PrisonLayout::from_path(&path)
        .with_context(|| format!("failed to load layout from {path}"))?;
    Ok(layout.build()?)
}
