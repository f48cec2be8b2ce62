//! Notification delivery seam.
//!
//! The core only requests a notification when an alarm starts ringing;
//! playing a sound or raising a platform alert is the collaborator's
//! concern. Delivery is fire-and-forget -- the only path back into the
//! core is the explicit user acknowledgment.

use crate::reminder::Occurrence;

/// Collaborator that delivers an alarm to the user.
pub trait Notify {
    fn notify(&self, occurrence: &Occurrence);
}

/// Notifier that records the request in the log stream. Useful as a
/// default and in tests.
#[derive(Debug, Default)]
pub struct LogNotify;

impl Notify for LogNotify {
    fn notify(&self, occurrence: &Occurrence) {
        tracing::info!(
            reminder_id = occurrence.reminder_id,
            kind = %occurrence.kind,
            message = %occurrence.message,
            "alarm ringing"
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// Records every notified reminder id, for asserting trigger counts.
    #[derive(Default)]
    pub struct RecordingNotify {
        pub notified: RefCell<Vec<i64>>,
    }

    impl Notify for RecordingNotify {
        fn notify(&self, occurrence: &Occurrence) {
            self.notified.borrow_mut().push(occurrence.reminder_id);
        }
    }
}
