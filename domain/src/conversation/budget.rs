//! Consecutive auto-reply budgets
//!
//! A participant with `max_auto_replies = Some(m)` may be selected at most `m`
//! times in a row. The streak is read from the transcript, so budgets need no
//! counters of their own.

use super::transcript::Transcript;
use crate::participant::{entities::Participant, roster::Roster};

/// Whether `participant` may not speak next
pub fn is_exhausted(participant: &Participant, transcript: &Transcript) -> bool {
    match participant.max_auto_replies() {
        None => false,
        Some(max) => transcript.trailing_streak(participant.name()) >= max,
    }
}

/// Apply reply budgets to the policy's choice
///
/// Returns `selected` when that participant still has budget, otherwise the
/// next eligible participant in roster order (wrapping). `None` means no
/// participant may speak.
pub fn resolve_speaker(selected: usize, roster: &Roster, transcript: &Transcript) -> Option<usize> {
    (0..roster.len())
        .map(|offset| (selected + offset) % roster.len())
        .find(|&index| !is_exhausted(roster.at(index), transcript))
}
