use crate::render::Renderer;
use crate::session::{Generation, Refused, SearchState, Ticket};
use crate::view::View;
use log::Level;
use lru::LruCache;
use parking_lot::Mutex;
use pixabay::{PageNum, SearchPage, SearchQuery};
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use uuid::Uuid;

pub const NO_VALUE: &str = "Input field has no value";
pub const NO_MATCHES: &str =
    "Sorry, there are no images matching your search query. Please try again.";
pub const END_OF_RESULTS: &str = "We're sorry, but you've reached the end of search results.";
pub const TRY_AGAIN: &str = "Something went wrong while loading images. Please try again.";

/// Cards to scroll past after a continuation page is appended.
const SCROLL_CARDS: u32 = 2;

/// Picked by the page script, one per browser tab.
pub type SessionId = Uuid;

pub trait ImageSource {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = pixabay::Result<SearchPage>> + Send;
}

impl ImageSource for pixabay::Client {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = pixabay::Result<SearchPage>> + Send {
        pixabay::Client::search(self, query)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("empty keyword")]
    Validation,
    #[error("no images matched")]
    EmptyResult,
    #[error("end of results")]
    EndOfResults,
    #[error("no search to continue")]
    NoSession,
    #[error("a page is already loading")]
    Busy,
    #[error("response of an outdated search dropped")]
    Stale,
    #[error("request failed: {0}")]
    Transport(#[from] pixabay::Error),
    #[error("render failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl SearchError {
    pub fn level(&self) -> Level {
        match self {
            Self::Validation | Self::EmptyResult | Self::EndOfResults | Self::Stale => Level::Info,
            Self::NoSession | Self::Busy => Level::Warn,
            Self::Transport(_) | Self::Render(_) => Level::Error,
        }
    }
}

/// A page that was appended while the continuation stays on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loaded {
    pub page: PageNum,
    pub fetched: u32,
    pub total: u32,
}

/// The answer to one user action, tagged with the generation it belongs to.
#[derive(Debug)]
pub struct Outcome {
    pub generation: Generation,
    pub result: Result<Loaded, SearchError>,
}

impl Outcome {
    fn new(generation: Generation, result: Result<Loaded, SearchError>) -> Self {
        Self { generation, result }
    }
}

/// Search sessions of the gallery page, one per client: one keyword each, paged through one
/// request at a time.
#[derive(Debug)]
pub struct Gallery<S> {
    source: S,
    renderer: Renderer,
    sessions: Mutex<LruCache<SessionId, Arc<Mutex<SearchState>>>>,
}

impl<S: ImageSource> Gallery<S> {
    pub fn new(source: S, max_sessions: NonZeroUsize) -> Result<Self, minijinja::Error> {
        Ok(Self {
            source,
            renderer: Renderer::new()?,
            sessions: Mutex::new(LruCache::new(max_sessions)),
        })
    }

    fn session(&self, id: SessionId) -> Arc<Mutex<SearchState>> {
        self.sessions
            .lock()
            .get_or_insert(id, Default::default)
            .clone()
    }

    pub async fn submit_search(
        &self,
        id: SessionId,
        raw_keyword: &str,
        view: &mut impl View,
    ) -> Outcome {
        let session = self.session(id);
        let keyword = raw_keyword.trim();
        if keyword.is_empty() {
            view.set_load_more(false);
            view.failure(NO_VALUE);
            let generation = session.lock().generation();
            return Outcome::new(generation, Err(SearchError::Validation));
        }
        let ticket = session.lock().reset(keyword.to_owned());
        info!(
            "{}: search {:?} (generation {})",
            id, keyword, ticket.generation
        );
        let generation = ticket.generation;
        Outcome::new(generation, self.fetch(&session, ticket, view).await)
    }

    /// Fetches the page after the last accepted one, for the keyword the session was started with.
    pub async fn load_more(
        &self,
        id: SessionId,
        generation: Generation,
        view: &mut impl View,
    ) -> Outcome {
        let session = self.session(id);
        let next = session.lock().next(generation);
        let ticket = match next {
            Ok(ticket) => ticket,
            Err(Refused::Stale) => return Outcome::new(generation, Err(SearchError::Stale)),
            Err(Refused::Busy) => return Outcome::new(generation, Err(SearchError::Busy)),
            Err(Refused::NoSession) => {
                view.set_load_more(false);
                return Outcome::new(generation, Err(SearchError::NoSession));
            }
            Err(Refused::Exhausted) => {
                view.set_load_more(false);
                view.failure(END_OF_RESULTS);
                return Outcome::new(generation, Err(SearchError::EndOfResults));
            }
        };
        Outcome::new(generation, self.fetch(&session, ticket, view).await)
    }

    async fn fetch(
        &self,
        session: &Mutex<SearchState>,
        ticket: Ticket,
        view: &mut impl View,
    ) -> Result<Loaded, SearchError> {
        let r = self.source.search(&ticket.query()).await;
        self.settle(session, &ticket, r, view)
    }

    fn settle(
        &self,
        session: &Mutex<SearchState>,
        ticket: &Ticket,
        r: pixabay::Result<SearchPage>,
        view: &mut impl View,
    ) -> Result<Loaded, SearchError> {
        let mut state = session.lock();
        if !state.is_current(ticket) {
            info!(
                "dropping page {} of {:?}: generation {} is gone (now {} for {:?})",
                ticket.page,
                ticket.keyword,
                ticket.generation,
                state.generation(),
                state.keyword()
            );
            return Err(SearchError::Stale);
        }
        let first = ticket.is_first();
        if first {
            view.clear();
        }

        let page = match r {
            Ok(page) => page,
            Err(e) => {
                state.release(ticket);
                error!("page {} of {:?}: {}", ticket.page, ticket.keyword, e);
                // The button stays up after a failed continuation so that it doubles as retry.
                view.set_load_more(!first && state.has_more());
                view.failure(TRY_AGAIN);
                return Err(e.into());
            }
        };

        let taken = state.room(page.total_hits, page.hits.len());
        if taken == 0 {
            state.release(ticket);
            view.set_load_more(false);
            if first {
                view.failure(NO_MATCHES);
                return Err(SearchError::EmptyResult);
            }
            state.exhaust();
            view.failure(END_OF_RESULTS);
            return Err(SearchError::EndOfResults);
        }

        // Nothing is accepted unless the cards made it into the view.
        if let Err(e) = self.renderer.append_page(view, &page.hits[..taken]) {
            state.release(ticket);
            error!("page {} of {:?}: {}", ticket.page, ticket.keyword, e);
            view.set_load_more(!first && state.has_more());
            view.failure(TRY_AGAIN);
            return Err(e.into());
        }
        let visible = state.advance(ticket, page.total_hits, page.hits.len());
        let loaded = Loaded {
            page: state.page(),
            fetched: state.fetched(),
            total: state.total(),
        };
        drop(state);
        info!(
            "{:?} page {}: {} of {} hits shown, {}/{} fetched",
            ticket.keyword,
            loaded.page,
            taken,
            page.hits.len(),
            loaded.fetched,
            loaded.total
        );

        if first {
            view.info(&format!("Hooray! We found {} images.", page.total_hits));
        } else {
            view.scroll(SCROLL_CARDS);
        }
        if visible {
            view.set_load_more(true);
            Ok(loaded)
        } else {
            view.set_load_more(false);
            view.failure(END_OF_RESULTS);
            Err(SearchError::EndOfResults)
        }
    }
}
