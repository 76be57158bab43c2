//! Request tickets: per-action generation counters.
//!
//! Every request an action issues gets a fresh [`Ticket`]. When the response
//! lands, the reducer settles the ticket against its [`TicketBook`]; only the
//! most recently issued ticket is accepted, so out-of-order completions can
//! never overwrite newer state.

#[cfg(test)]
#[path = "ticket_test.rs"]
mod ticket_test;

/// Identifies one issued request of one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues tickets for one action and remembers which one is outstanding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketBook {
    issued: u64,
    outstanding: Option<Ticket>,
}

impl TicketBook {
    /// Issue a new ticket, superseding any outstanding one.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.outstanding = Some(ticket);
        ticket
    }

    /// Accept a completion. Returns `true` only for the outstanding ticket,
    /// which is then cleared; anything else is stale.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Drop the outstanding ticket so its completion will be ignored.
    pub fn invalidate(&mut self) {
        self.outstanding = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }
}
