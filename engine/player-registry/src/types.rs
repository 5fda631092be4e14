use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a player across GameWeeks
pub type PlayerId = u32;

/// Upper bound of the fatigue resource; a fresh player starts here
pub const FULL_FITNESS: f64 = 1.0;

/// Pitch position, drawn from a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(alias = "GK", alias = "G")]
    Goalkeeper,
    #[serde(alias = "DEF", alias = "D")]
    Defender,
    #[serde(alias = "MID", alias = "M")]
    Midfielder,
    #[serde(alias = "ATT", alias = "FWD", alias = "A", alias = "F")]
    Attacker,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Attacker];

    /// Short code used in stats feeds (e.g. "GK")
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Attacker => "ATT",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = PlayerLookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "G" | "GOALKEEPER" => Ok(Position::Goalkeeper),
            "DEF" | "D" | "DEFENDER" => Ok(Position::Defender),
            "MID" | "M" | "MIDFIELDER" => Ok(Position::Midfielder),
            "ATT" | "FWD" | "A" | "F" | "ATTACKER" => Ok(Position::Attacker),
            _ => Err(PlayerLookupError::UnknownPosition(s.to_string())),
        }
    }
}

/// Coarse quality tier derived from a player's PGS
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    Star,
    Key,
    #[default]
    Wild,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Star => "Star",
            Category::Key => "Key",
            Category::Wild => "Wild",
        };
        f.write_str(label)
    }
}

fn full_fitness() -> f64 {
    FULL_FITNESS
}

/// A rosterable athlete.
///
/// `pgs` and `category` are refreshed before each GameWeek from the latest
/// rolling summary; `fatigue` is written back once per GameWeek after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,

    /// Display name (e.g. "Kylian Mbappé")
    pub name: String,

    pub position: Position,

    /// Club abbreviation (e.g. "RMA")
    #[serde(default)]
    pub team: String,

    pub birth_date: NaiveDate,

    #[serde(default)]
    pub pgs: f64,

    #[serde(default)]
    pub category: Category,

    #[serde(default = "full_fitness")]
    pub fatigue: f64,
}

impl Player {
    /// Create a fully rested, unrated player
    pub fn new(
        player_id: PlayerId,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            player_id,
            name: name.into(),
            position,
            team: team.into(),
            birth_date,
            pgs: 0.0,
            category: Category::Wild,
            fatigue: FULL_FITNESS,
        }
    }

    /// Set the category (builder style)
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Same player with a stored fatigue value
    pub fn with_fatigue(mut self, fatigue: f64) -> Self {
        self.fatigue = fatigue;
        self
    }

    /// Age in whole years on `date`; zero if `date` precedes the birth date
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.birth_date).unwrap_or(0)
    }
}

/// On-disk container for the player pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    /// Season label (e.g. "2025-26")
    pub season: String,

    /// When this data was last updated
    pub last_updated: DateTime<Utc>,

    pub players: Vec<Player>,
}

/// Errors that can occur during player lookup
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerLookupError {
    /// No player with this id in the registry
    PlayerNotFound(PlayerId),

    /// No player with this name in the registry
    NameNotFound(String),

    /// Two entries share the same id
    DuplicatePlayer(PlayerId),

    /// Position string outside the closed set
    UnknownPosition(String),
}

impl fmt::Display for PlayerLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerLookupError::PlayerNotFound(id) => {
                write!(f, "Player {id} not found in registry")
            }
            PlayerLookupError::NameNotFound(name) => {
                write!(f, "Player '{name}' not found in registry")
            }
            PlayerLookupError::DuplicatePlayer(id) => {
                write!(f, "Player {id} registered more than once")
            }
            PlayerLookupError::UnknownPosition(position) => {
                write!(f, "Unknown position: {position}")
            }
        }
    }
}

impl std::error::Error for PlayerLookupError {}
