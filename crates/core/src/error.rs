// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while generating or validating a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Fewer than two participants were supplied.
    NotEnoughParticipants(usize),
    /// The repair pass left a self-pairing in place. Retryable: a valid
    /// derangement always exists for two or more participants.
    SelfPairingRemained,
    /// The generator failed on every attempt; the draw was abandoned.
    DrawExhausted {
        /// How many attempts were made before giving up.
        attempts: usize,
    },
    /// An assignment set violates the derangement invariants.
    InvalidAssignmentSet(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEnoughParticipants(count) => {
                write!(f, "At least 2 participants required, got {count}")
            }
            Self::SelfPairingRemained => {
                write!(f, "Draw produced a self-pairing after the repair pass")
            }
            Self::DrawExhausted { attempts } => {
                write!(f, "Draw impossible after {attempts} attempts")
            }
            Self::InvalidAssignmentSet(msg) => {
                write!(f, "Invalid assignment set: {msg}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
