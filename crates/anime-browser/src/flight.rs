//! At-most-one-in-flight guard for a request stream.
//!
//! Each stream (list pages, anime details) owns one [`SingleFlight`]. A
//! request is admitted only while the stream is idle. Resets bump the
//! generation: the response still in flight becomes stale and is discarded on
//! arrival, and the newest request issued meanwhile is parked until then.

/// Handle for one admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    sequence: u64,
}

/// Outcome of asking to start a request
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    /// Stream was idle; the request may run now
    Granted(Ticket),
    /// A stale request is still running; this one starts when it lands
    Deferred,
    /// A current request is already running
    Dropped,
}

/// What to do after a response arrives
#[derive(Debug, PartialEq, Eq)]
pub struct Landing<R> {
    /// False when the stream was reset after this request started
    pub current: bool,
    /// Parked request to start next
    pub deferred: Option<R>,
}

#[derive(Debug, Clone)]
pub struct SingleFlight<R> {
    in_flight: Option<Ticket>,
    generation: u64,
    sequence: u64,
    deferred: Option<R>,
}

impl<R> Default for SingleFlight<R> {
    fn default() -> Self {
        Self {
            in_flight: None,
            generation: 0,
            sequence: 0,
            deferred: None,
        }
    }
}

impl<R> SingleFlight<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ask to start `request`
    pub fn admit(&mut self, request: R) -> Admission {
        match self.in_flight {
            None => {
                self.sequence += 1;
                let ticket = Ticket {
                    generation: self.generation,
                    sequence: self.sequence,
                };
                self.in_flight = Some(ticket);
                Admission::Granted(ticket)
            }
            Some(running) if running.generation != self.generation => {
                self.deferred = Some(request);
                Admission::Deferred
            }
            Some(_) => Admission::Dropped,
        }
    }

    /// Mark whatever is in flight as stale and forget any parked request
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.deferred = None;
    }

    /// Release the stream after `ticket`'s response arrived
    ///
    /// Returns `None` for a ticket that is not the one in flight.
    pub fn finish(&mut self, ticket: Ticket) -> Option<Landing<R>> {
        if self.in_flight != Some(ticket) {
            return None;
        }
        self.in_flight = None;
        Some(Landing {
            current: ticket.generation == self.generation,
            deferred: self.deferred.take(),
        })
    }
}
