use crate::bug;
use pixabay::{PageNum, SearchQuery};

pub type Generation = u64;

/// What a single request belongs to, taken under the state lock before the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: Generation,
    pub keyword: String,
    pub page: PageNum,
}

impl Ticket {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.keyword.as_str(), self.page)
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }
}

/// Why `next` handed out no ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refused {
    NoSession,
    Busy,
    Exhausted,
    Stale,
}

/// State of one client's search session.
///
/// `reset` starts a new generation for a freshly submitted keyword, `next` hands out the
/// ticket for the following page, and `advance` accepts a page that came back for a
/// ticket. `release` ends a request that brought no page and `exhaust` closes the session
/// early. A ticket from an older generation is never accepted.
#[derive(Debug, Default)]
pub struct SearchState {
    keyword: String,
    page: PageNum,
    fetched: u32,
    total: u32,
    generation: Generation,
    in_flight: bool,
    active: bool,
}

impl SearchState {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn page(&self) -> PageNum {
        self.page
    }

    pub fn fetched(&self) -> u32 {
        self.fetched
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        self.active && self.fetched < self.total
    }

    pub fn reset(&mut self, keyword: String) -> Ticket {
        self.generation += 1;
        self.keyword = keyword;
        self.page = 0;
        self.fetched = 0;
        self.total = 0;
        self.active = false;
        self.in_flight = true;
        Ticket {
            generation: self.generation,
            keyword: self.keyword.clone(),
            page: 1,
        }
    }

    pub fn next(&mut self, generation: Generation) -> Result<Ticket, Refused> {
        if generation != self.generation {
            return Err(Refused::Stale);
        }
        if self.in_flight {
            return Err(Refused::Busy);
        }
        if !self.active {
            return Err(Refused::NoSession);
        }
        if !self.has_more() {
            return Err(Refused::Exhausted);
        }
        self.in_flight = true;
        Ok(Ticket {
            generation,
            keyword: self.keyword.clone(),
            page: self.page + 1,
        })
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// How many of `received` items still fit under `total`; the rest are not shown.
    pub fn room(&self, total: u32, received: usize) -> usize {
        received.min(total.saturating_sub(self.fetched) as usize)
    }

    /// Accepts the page requested by `ticket`, counting every item it returned.
    /// Returns whether the continuation stays on offer: `fetched` has not passed `total`.
    pub fn advance(&mut self, ticket: &Ticket, total: u32, received: usize) -> bool {
        if ticket.page != self.page + 1 {
            bug!("page {} accepted after page {}", ticket.page, self.page);
        }
        self.page = ticket.page;
        self.total = total;
        self.fetched = self.fetched.saturating_add(received as u32);
        self.in_flight = false;
        self.active = true;
        self.fetched <= self.total
    }

    /// Ends the request of `ticket` without accepting a page.
    pub fn release(&mut self, ticket: &Ticket) {
        if self.is_current(ticket) {
            self.in_flight = false;
        }
    }

    /// Marks the session as drained, so that no further page is requested.
    pub fn exhaust(&mut self) {
        self.total = self.fetched;
    }
}
