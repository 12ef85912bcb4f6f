//! Participants and the roster they form.
//!
//! - [`role::Role`]: coordinator, generator, reviewer, tester
//! - [`entities::Participant`]: name, directive, execution capability, reply budget
//! - [`roster::Roster`]: validated, ordered participant list

pub mod entities;
pub mod role;
pub mod roster;
