/// Logical mutual exclusion for in-flight intents. At most one poll and one
/// player action may be outstanding at a time; the flags express exclusion
/// of intents, not memory protection (everything runs on one thread).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateKind {
    Poll,
    Action,
}

#[derive(Debug, Default)]
pub struct InputGate {
    poll_held: bool,
    poll_retry_queued: bool,
    action_held: bool,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A contended poll coalesces into a single queued retry instead of
    /// firing. A contended action fails fast; the gesture is dropped rather
    /// than queued so input stays responsive.
    pub fn try_acquire(&mut self, kind: GateKind) -> bool {
        match kind {
            GateKind::Poll => {
                if self.poll_held {
                    self.poll_retry_queued = true;
                    false
                } else {
                    self.poll_held = true;
                    true
                }
            }
            GateKind::Action => {
                if self.action_held {
                    false
                } else {
                    self.action_held = true;
                    true
                }
            }
        }
    }

    /// Releases the gate. For polls, reports whether a retry was queued
    /// while held (and clears it), so the caller runs exactly one catch-up.
    pub fn release(&mut self, kind: GateKind) -> bool {
        match kind {
            GateKind::Poll => {
                self.poll_held = false;
                std::mem::take(&mut self.poll_retry_queued)
            }
            GateKind::Action => {
                self.action_held = false;
                false
            }
        }
    }

    pub fn is_held(&self, kind: GateKind) -> bool {
        match kind {
            GateKind::Poll => self.poll_held,
            GateKind::Action => self.action_held,
        }
    }
}
