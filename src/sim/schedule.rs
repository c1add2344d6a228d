//! Deferred round events
//!
//! Crash recovery and the return to the title screen happen a fixed time after
//! their trigger. They are queued against the frame counter, which keeps
//! running while the round is frozen. A queued event cannot be cancelled; it
//! carries the round generation it was scheduled in so the handler can discard
//! it after a reset.

use serde::{Deserialize, Serialize};

/// What to do when a deferred event comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Clear the obstacle that was hit and unfreeze the round
    ResumeAfterCrash { obstacle: u32 },
    /// Leave the round-over screen for attract mode
    ReturnToAttract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    pub due_frame: u64,
    pub generation: u32,
    pub action: Deferred,
}

/// Pending deferred events, fired in due order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<Scheduled>,
}

impl Schedule {
    pub fn push(&mut self, due_frame: u64, generation: u32, action: Deferred) {
        self.pending.push(Scheduled {
            due_frame,
            generation,
            action,
        });
    }

    /// Remove and return every event due at or before `frame`
    pub fn take_due(&mut self, frame: u64) -> Vec<Scheduled> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|event| {
            if event.due_frame <= frame {
                due.push(*event);
                false
            } else {
                true
            }
        });
        // Stable: equal due frames keep insertion order
        due.sort_by_key(|event| event.due_frame);
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
