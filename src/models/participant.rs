//! Participant and Registration data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in registrations and match slots).
pub type ParticipantId = Uuid;

/// A registration for a tournament. Created unpaid; the payment gateway
/// (out of scope here) flips `paid` via payment confirmation. Only paid
/// registrations enter the bracket snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub participant_id: ParticipantId,
    pub name: String,
    /// Ranking points used as the seed value. Unranked players carry 0 and
    /// therefore seed last.
    pub ranking_points: u32,
    pub paid: bool,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Create a new unpaid registration timestamped now.
    pub fn new(participant_id: ParticipantId, name: impl Into<String>, ranking_points: u32) -> Self {
        Self {
            participant_id,
            name: name.into(),
            ranking_points,
            paid: false,
            registered_at: Utc::now(),
        }
    }
}

/// A seeded entrant in the bracket snapshot, frozen at generation time.
/// Higher `seed_value` means better seed; ties keep registration order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub seed_value: u32,
}

impl Participant {
    /// Snapshot a paid registration into a seeded entrant.
    pub fn from_registration(r: &Registration) -> Self {
        Self {
            id: r.participant_id,
            name: r.name.clone(),
            seed_value: r.ranking_points,
        }
    }
}
