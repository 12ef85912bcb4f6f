//! Speaker selection policies
//!
//! A policy decides who speaks next from the transcript and the roster alone.
//! Policies hold no mutable state: the same transcript always yields the same
//! speaker, so a conversation can be replayed from its transcript.

use super::transcript::Transcript;
use crate::core::error::DomainError;
use crate::participant::{entities::Participant, roster::Roster};
use serde::{Deserialize, Serialize};

/// Chooses the next speaker
pub trait SpeakerSelectionPolicy: Send + Sync {
    /// Roster index of the next speaker, before reply budgets are applied
    fn select_index(&self, transcript: &Transcript, roster: &Roster) -> usize;

    fn select<'r>(&self, transcript: &Transcript, roster: &'r Roster) -> &'r Participant {
        roster.at(self.select_index(transcript, roster))
    }
}

/// Cycles through the roster in order
///
/// The cursor is the number of message turns so far modulo the roster size.
/// Execution results belong to the round of the message that produced them
/// and do not advance the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobin;

impl SpeakerSelectionPolicy for RoundRobin {
    fn select_index(&self, transcript: &Transcript, roster: &Roster) -> usize {
        transcript.message_count() % roster.len()
    }
}

/// Pseudo-random speaker, reproducible from `seed` and the message count
///
/// The same participant may be picked several times in a row, which is what
/// reply budgets exist to limit. The empty transcript always selects the seed
/// participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSelection {
    pub seed: u64,
}

impl SpeakerSelectionPolicy for RandomSelection {
    fn select_index(&self, transcript: &Transcript, roster: &Roster) -> usize {
        let count = transcript.message_count();
        if count == 0 {
            return 0;
        }
        let mixed = splitmix64(self.seed ^ (count as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        (mixed % roster.len() as u64) as usize
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Configured speaker selection method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum SpeakerSelection {
    #[default]
    RoundRobin,
    Random {
        #[serde(default)]
        seed: u64,
    },
}

impl SpeakerSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerSelection::RoundRobin => "round_robin",
            SpeakerSelection::Random { .. } => "random",
        }
    }
}

impl SpeakerSelectionPolicy for SpeakerSelection {
    fn select_index(&self, transcript: &Transcript, roster: &Roster) -> usize {
        match self {
            SpeakerSelection::RoundRobin => RoundRobin.select_index(transcript, roster),
            SpeakerSelection::Random { seed } => {
                RandomSelection { seed: *seed }.select_index(transcript, roster)
            }
        }
    }
}

impl std::fmt::Display for SpeakerSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeakerSelection {
    type Err = DomainError;

    /// Parses the method name; a random policy starts with seed 0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "round_robin" | "roundrobin" => Ok(SpeakerSelection::RoundRobin),
            "random" => Ok(SpeakerSelection::Random { seed: 0 }),
            other => Err(DomainError::UnknownSpeakerSelection(other.to_string())),
        }
    }
}
