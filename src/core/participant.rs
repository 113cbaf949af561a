use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a participant in the settlement group.
///
/// Participants are identified by their position `0..n-1` in the obligation
/// matrix. Human-readable labels, if any, are kept by the caller alongside
/// the matrix; the planner itself only ever sees indices.
///
/// # Examples
///
/// ```
/// use settlement_planner::core::participant::ParticipantId;
///
/// let alice = ParticipantId::new(0);
/// let bob = ParticipantId::new(1);
/// assert_ne!(alice, bob);
/// assert!(alice < bob);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticipantId(usize);

impl ParticipantId {
    /// Create a participant id from a matrix index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The underlying matrix index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ParticipantId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_equality() {
        let a = ParticipantId::new(3);
        let b = ParticipantId::new(3);
        let c = ParticipantId::new(4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_participant_ordering() {
        assert!(ParticipantId::new(0) < ParticipantId::new(1));
    }

    #[test]
    fn test_participant_display() {
        assert_eq!(format!("{}", ParticipantId::new(7)), "7");
    }
}
