//! Input debouncing and ordering of live search requests.
//!
//! Time is passed in explicitly so the behaviour is deterministic; the view
//! layer calls `poll` from its timer tick.

use std::time::{Duration, Instant};

use crate::client::draft::{Field, RegistrationDraft};
use crate::client::validation::{StepReport, validate_field};
use crate::domain::trainer::ALL_SPECIALTIES;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Quiet period before a field is re-validated while typing.
pub const FIELD_VALIDATION_DELAY: Duration = Duration::from_millis(300);
/// Quiet period before the search box fires a request.
pub const SEARCH_DELAY: Duration = Duration::from_millis(500);
/// Shortest non-empty term that triggers a live search.
pub const MIN_LIVE_SEARCH_LEN: usize = 3;

/// Holds at most one pending value and releases it after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedules `value`, returning the value it replaced, if any.
    pub fn schedule(&mut self, now: Instant, value: T) -> Option<T> {
        self.pending
            .replace((now + self.quiet, value))
            .map(|(_, value)| value)
    }

    /// Releases the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if due { self.cancel() } else { None }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Identifies one issued search request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues increasing tickets; only the latest one is honoured.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: u64,
}

impl SearchSequencer {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Returns `response` only if it answers the latest request.
    pub fn accept<R>(&self, ticket: Ticket, response: R) -> Option<R> {
        self.is_current(ticket).then_some(response)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub search_term: String,
    pub specialty_filter: String,
    pub page: usize,
    pub per_page: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// Nothing to search for; show the placeholder.
    Placeholder,
    Request(SearchRequest),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SearchInput {
    term: String,
    specialty: String,
}

/// Search box behaviour: debounced typing plus immediate triggers.
#[derive(Debug)]
pub struct LiveSearch {
    debouncer: Debouncer<SearchInput>,
    sequencer: SearchSequencer,
    per_page: usize,
}

impl Default for LiveSearch {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl LiveSearch {
    pub fn new(per_page: usize) -> Self {
        Self {
            debouncer: Debouncer::new(SEARCH_DELAY),
            sequencer: SearchSequencer::default(),
            per_page,
        }
    }

    /// Records a keystroke in the search box.
    pub fn input(&mut self, now: Instant, term: &str, specialty: &str) {
        self.debouncer.schedule(
            now,
            SearchInput {
                term: term.to_string(),
                specialty: specialty.to_string(),
            },
        );
    }

    /// Fires the pending search once typing has settled.
    ///
    /// Terms shorter than [`MIN_LIVE_SEARCH_LEN`] are dropped unless empty;
    /// they still invalidate any request in flight.
    pub fn poll(&mut self, now: Instant) -> Option<SearchAction> {
        let input = self.debouncer.poll(now)?;
        let len = input.term.trim().chars().count();
        if len != 0 && len < MIN_LIVE_SEARCH_LEN {
            self.sequencer.issue();
            return None;
        }
        Some(self.action(&input.term, &input.specialty, 1))
    }

    /// Searches right away (Enter, button, filter change, suggestion tag).
    pub fn trigger(&mut self, term: &str, specialty: &str) -> SearchAction {
        self.debouncer.cancel();
        self.action(term, specialty, 1)
    }

    /// Loads another page of the current results.
    pub fn page(&mut self, term: &str, specialty: &str, page: usize) -> SearchAction {
        self.debouncer.cancel();
        self.action(term, specialty, page.max(1))
    }

    /// Hands back a response only if no newer request was issued since.
    pub fn accept<R>(&self, ticket: Ticket, response: R) -> Option<R> {
        self.sequencer.accept(ticket, response)
    }

    fn action(&mut self, term: &str, specialty: &str, page: usize) -> SearchAction {
        let term = term.trim();
        let specialty = specialty.trim();
        let specialty = if specialty.eq_ignore_ascii_case(ALL_SPECIALTIES) {
            ""
        } else {
            specialty
        };

        if term.is_empty() && specialty.is_empty() {
            // Invalidate any request still in flight.
            self.sequencer.issue();
            return SearchAction::Placeholder;
        }

        SearchAction::Request(SearchRequest {
            ticket: self.sequencer.issue(),
            search_term: term.to_string(),
            specialty_filter: specialty.to_string(),
            page,
            per_page: self.per_page,
        })
    }
}

/// Advisory validation of the field the user is typing in.
#[derive(Debug)]
pub struct LiveValidator {
    debouncer: Debouncer<Field>,
}

impl Default for LiveValidator {
    fn default() -> Self {
        Self {
            debouncer: Debouncer::new(FIELD_VALIDATION_DELAY),
        }
    }
}

impl LiveValidator {
    pub fn input(&mut self, now: Instant, field: Field) {
        self.debouncer.schedule(now, field);
    }

    pub fn poll(&mut self, now: Instant, draft: &RegistrationDraft) -> Option<(Field, StepReport)> {
        let field = self.debouncer.poll(now)?;
        Some((field, validate_field(field, draft)))
    }
}
