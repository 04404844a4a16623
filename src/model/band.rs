use crate::core::{CommandError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Nested location value object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicGenre {
    Rock,
    PsychedelicRock,
    Soul,
    PostPunk,
}

impl fmt::Display for MusicGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MusicGenre::Rock => "ROCK",
            MusicGenre::PsychedelicRock => "PSYCHEDELIC_ROCK",
            MusicGenre::Soul => "SOUL",
            MusicGenre::PostPunk => "POST_PUNK",
        };
        write!(f, "{}", label)
    }
}

/// Client-supplied band fields, validated before they ever reach the store.
///
/// The server assigns everything else: id, creation date and owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPayload {
    pub name: String,
    pub coordinates: Coordinates,
    pub number_of_participants: i64,
    pub genre: Option<MusicGenre>,
}

impl BandPayload {
    pub fn new(name: impl Into<String>, coordinates: Coordinates, participants: i64) -> Self {
        Self {
            name: name.into(),
            coordinates,
            number_of_participants: participants,
            genre: None,
        }
    }

    pub fn genre(mut self, genre: MusicGenre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CommandError::Validation(
                "band name cannot be empty".into(),
            ));
        }
        if self.number_of_participants <= 0 {
            return Err(CommandError::Validation(format!(
                "number of participants must be positive, got {}",
                self.number_of_participants
            )));
        }
        Ok(())
    }
}

/// One stored record. Id, creation date and owner are server-assigned and
/// survive every update; only the business fields ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicBand {
    pub id: u64,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: DateTime<Utc>,
    pub number_of_participants: i64,
    pub genre: Option<MusicGenre>,
    pub owner: String,
}

impl MusicBand {
    /// Builds a band from a validated payload. Caller (the store) supplies
    /// the server-assigned id and owner; the creation date is stamped here.
    pub(crate) fn from_payload(id: u64, payload: &BandPayload, owner: &str) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            coordinates: payload.coordinates.clone(),
            creation_date: Utc::now(),
            number_of_participants: payload.number_of_participants,
            genre: payload.genre,
            owner: owner.to_string(),
        }
    }

    /// Total order for collection iteration: participants, then name,
    /// then id as the unique tiebreaker.
    pub fn ordering(&self, other: &Self) -> Ordering {
        (self.number_of_participants, &self.name, self.id).cmp(&(
            other.number_of_participants,
            &other.name,
            other.id,
        ))
    }
}

impl fmt::Display for MusicBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} '{}' ({} participants, genre: {}, owner: {})",
            self.id,
            self.name,
            self.number_of_participants,
            self.genre
                .map(|g| g.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.owner
        )
    }
}
