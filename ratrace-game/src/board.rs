//! Static board layout and O(1) space lookup.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

const DEFAULT_BOARD_DATA: &str = include_str!("../data/board.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Payday,
    Opportunity,
    Market,
    Doodads,
    Baby,
    Downsize,
    Charity,
    Exit,
}

impl SpaceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payday => "payday",
            Self::Opportunity => "opportunity",
            Self::Market => "market",
            Self::Doodads => "doodads",
            Self::Baby => "baby",
            Self::Downsize => "downsize",
            Self::Charity => "charity",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Circle {
    #[default]
    RatRace,
    FastTrack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpace {
    pub id: u32,
    pub name: String,
    pub kind: SpaceKind,
    pub position: usize,
    #[serde(default)]
    pub circle: Circle,
}

/// Dense board indexed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    spaces: Vec<BoardSpace>,
}

impl Board {
    /// Build a board, checking positions run `0..N-1` and there is one exit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the layout breaks either invariant.
    pub fn new(spaces: Vec<BoardSpace>) -> Result<Self, ConfigError> {
        if spaces.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        if let Some((index, space)) = spaces
            .iter()
            .enumerate()
            .find(|(index, space)| space.position != *index)
        {
            return Err(ConfigError::NonContiguousBoard {
                index,
                position: space.position,
            });
        }
        let exits = spaces.iter().filter(|s| s.kind == SpaceKind::Exit).count();
        if exits != 1 {
            return Err(ConfigError::ExitCount { found: exits });
        }
        Ok(Self { spaces })
    }

    /// Load a board from a JSON array of spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the layout is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spaces: Vec<BoardSpace> =
            serde_json::from_str(json).map_err(|err| ConfigError::parse("board", &err))?;
        Self::new(spaces)
    }

    /// The standard 20-space Rat Race board.
    ///
    /// # Panics
    ///
    /// Panics if the embedded board asset is invalid, which the test suite
    /// rules out.
    #[must_use]
    pub fn rat_race() -> Self {
        Self::from_json(DEFAULT_BOARD_DATA).expect("embedded board asset is valid")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Space at `position`, wrapping out-of-range positions.
    #[must_use]
    pub fn space(&self, position: usize) -> &BoardSpace {
        &self.spaces[position % self.spaces.len()]
    }

    /// Position reached after moving `distance` spaces from `position`.
    #[must_use]
    pub fn advance(&self, position: usize, distance: usize) -> usize {
        (position + distance) % self.spaces.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoardSpace> {
        self.spaces.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::rat_race()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            spaces: Vec<BoardSpace>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.spaces).map_err(serde::de::Error::custom)
    }
}
