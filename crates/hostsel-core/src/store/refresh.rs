// ── Refresh supersession ──
//
// Listings arrive from one-shot fetches the presentation layer runs. A
// newer refresh request supersedes every fetch still in flight, so only
// the result belonging to the most recently issued ticket may land.

/// Handle identifying one refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides which fetch results are still wanted.
#[derive(Debug, Clone, Default)]
pub struct RefreshGate {
    issued: u64,
    applied: Option<u64>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh. Every earlier ticket becomes stale.
    pub fn begin(&mut self) -> RefreshTicket {
        self.issued += 1;
        tracing::debug!(generation = self.issued, "refresh requested");
        RefreshTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.issued && self.applied != Some(ticket.0)
    }

    /// Claim the right to apply `ticket`'s result. Returns `false` when a
    /// newer request was issued or the result was already applied.
    pub fn accept(&mut self, ticket: RefreshTicket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.0,
                latest = self.issued,
                "discarding superseded refresh result"
            );
            return false;
        }
        self.applied = Some(ticket.0);
        true
    }

    /// Generation of the last result that was applied.
    pub fn applied_generation(&self) -> Option<u64> {
        self.applied
    }
}
