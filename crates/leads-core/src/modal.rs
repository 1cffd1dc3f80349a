//! Lead detail modal lifecycle
//!
//! ```text
//! Closed --open--> Loading --loaded--> Open
//!                  Loading --failed--> Closed
//! Open/Loading --close--> Closed
//! ```
//!
//! Every detail request is tagged with a [`RequestTicket`]. A response only
//! takes effect while its ticket is the one in flight; anything older (a lead
//! the user clicked before the current one, or a request the user closed the
//! modal on) is discarded without rendering or notifying.

/// Identifies one detail request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub lead_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Loading {
        ticket: RequestTicket,
        /// Modal was already showing another lead when this request started
        was_open: bool,
    },
    Open {
        lead_id: String,
    },
}

/// What the view layer should do with a finished request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Populate slots, show the modal, lock page scroll
    Render,
    /// Keep/make the modal hidden, release scroll, notify the user
    ShowError,
    /// Superseded request; do nothing
    Discard,
}

#[derive(Debug)]
pub struct ModalMachine {
    state: ModalState,
    next_seq: u64,
}

impl Default for ModalMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalMachine {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            next_seq: 1,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Modal is on screen (and page scroll should be locked)
    pub fn is_visible(&self) -> bool {
        matches!(
            self.state,
            ModalState::Open { .. } | ModalState::Loading { was_open: true, .. }
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ModalState::Loading { .. })
    }

    /// Start a detail request for `lead_id`, superseding any request in flight
    pub fn open(&mut self, lead_id: &str) -> RequestTicket {
        let ticket = RequestTicket {
            seq: self.next_seq,
            lead_id: lead_id.to_string(),
        };
        self.next_seq += 1;

        let was_open = self.is_visible();
        self.state = ModalState::Loading {
            ticket: ticket.clone(),
            was_open,
        };
        ticket
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        matches!(&self.state, ModalState::Loading { ticket: current, .. } if current == ticket)
    }

    /// The request for `ticket` returned a lead
    pub fn loaded(&mut self, ticket: &RequestTicket) -> Resolution {
        if !self.is_current(ticket) {
            return Resolution::Discard;
        }
        self.state = ModalState::Open {
            lead_id: ticket.lead_id.clone(),
        };
        Resolution::Render
    }

    /// The request for `ticket` failed (transport, HTTP status or decode)
    pub fn failed(&mut self, ticket: &RequestTicket) -> Resolution {
        if !self.is_current(ticket) {
            return Resolution::Discard;
        }
        self.state = ModalState::Closed;
        Resolution::ShowError
    }

    /// Explicit close. Returns true if the modal was not already closed.
    pub fn close(&mut self) -> bool {
        let changed = self.state != ModalState::Closed;
        self.state = ModalState::Closed;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_then_loaded() {
        let mut modal = ModalMachine::new();
        let ticket = modal.open("42");
        assert!(modal.is_loading());
        assert!(!modal.is_visible());

        assert_eq!(modal.loaded(&ticket), Resolution::Render);
        assert_eq!(
            modal.state(),
            &ModalState::Open {
                lead_id: "42".to_string()
            }
        );
        assert!(modal.is_visible());
    }

    #[test]
    fn test_failure_returns_to_closed() {
        let mut modal = ModalMachine::new();
        let ticket = modal.open("42");
        assert_eq!(modal.failed(&ticket), Resolution::ShowError);
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_close_from_open() {
        let mut modal = ModalMachine::new();
        let ticket = modal.open("7");
        modal.loaded(&ticket);
        assert!(modal.close());
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!modal.close());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut modal = ModalMachine::new();
        let first = modal.open("1");
        let second = modal.open("2");
        assert_ne!(first.seq, second.seq);

        assert_eq!(modal.loaded(&first), Resolution::Discard);
        assert!(modal.is_loading());
        assert_eq!(modal.loaded(&second), Resolution::Render);
        assert_eq!(
            modal.state(),
            &ModalState::Open {
                lead_id: "2".to_string()
            }
        );
    }

    #[test]
    fn test_superseded_failure_is_silent() {
        let mut modal = ModalMachine::new();
        let first = modal.open("1");
        let second = modal.open("2");
        assert_eq!(modal.failed(&first), Resolution::Discard);
        assert_eq!(modal.loaded(&second), Resolution::Render);
    }

    #[test]
    fn test_response_after_close_is_discarded() {
        let mut modal = ModalMachine::new();
        let ticket = modal.open("9");
        modal.close();
        assert_eq!(modal.loaded(&ticket), Resolution::Discard);
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_same_lead_twice_gets_distinct_tickets() {
        let mut modal = ModalMachine::new();
        let first = modal.open("5");
        let second = modal.open("5");
        assert_eq!(modal.loaded(&first), Resolution::Discard);
        assert_eq!(modal.loaded(&second), Resolution::Render);
    }

    #[test]
    fn test_reopen_while_open_stays_visible() {
        let mut modal = ModalMachine::new();
        let first = modal.open("1");
        modal.loaded(&first);
        let second = modal.open("2");
        assert!(modal.is_visible());
        assert_eq!(modal.failed(&second), Resolution::ShowError);
        assert!(!modal.is_visible());
    }
}
