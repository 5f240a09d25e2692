//! Browse controller: navigation transitions, list paging and the detail
//! overlay.
//!
//! Requests run on spawned tasks and report back through a [`Completion`]
//! channel; every state change happens in [`BrowseController`] methods, so
//! the caller's event loop is the only writer.

use crate::flight::{Admission, SingleFlight, Ticket};
use crate::page::{PageUpdate, Surface};
use crate::query::{self, Rejection};
use crate::state::{BrowseState, Category, FilterKind, Navigation};
use crate::view;
use jikan_client::{AnimeDetail, ApiBase, Catalog, CatalogError, ListResponse};
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What an operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A request for this URL is now in flight
    Started(Url),
    /// The request will start once a stale one lands
    Deferred(Url),
    /// A request of the same kind is already running
    Dropped,
    /// Nothing to do
    Unchanged,
    /// Refused before any request; a notice is shown
    Rejected(Rejection),
}

/// A finished request, delivered back to the controller
#[derive(Debug)]
pub enum Completion {
    List {
        ticket: Ticket,
        outcome: Result<ListResponse, CatalogError>,
    },
    Detail {
        ticket: Ticket,
        mal_id: u32,
        outcome: Result<AnimeDetail, CatalogError>,
    },
}

pub struct BrowseController<S: Surface> {
    base: ApiBase,
    placeholder_image: String,
    catalog: Arc<dyn Catalog>,
    surface: S,
    state: BrowseState,
    detail: SingleFlight<(u32, Url)>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<S: Surface> BrowseController<S> {
    /// Create a controller and the receiver its completions arrive on
    pub fn new(
        base: ApiBase,
        placeholder_image: String,
        catalog: Arc<dyn Catalog>,
        surface: S,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            base,
            placeholder_image,
            catalog,
            surface,
            state: BrowseState::new(),
            detail: SingleFlight::new(),
            completions,
        };
        (controller, receiver)
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show a one-off message, e.g. for unparseable input
    pub fn notify(&mut self, message: impl Into<String>) {
        self.surface.apply(PageUpdate::ShowNotice(message.into()));
    }

    /// Load the first page of `category`
    pub fn start(&mut self, category: Category) -> Dispatch {
        if category == Category::Search {
            return Dispatch::Unchanged;
        }
        info!(category = %category, "Starting browser");
        self.reset_to(Navigation::new(category))
    }

    /// Open with a search when `query` has text, otherwise with `category`
    pub fn launch(&mut self, category: Category, query: Option<&str>) -> Dispatch {
        match query.map(|q| self.search(q)) {
            Some(Dispatch::Unchanged) | None => self.start(category),
            Some(dispatch) => dispatch,
        }
    }

    /// Switch to another browsing view
    pub fn select_category(&mut self, category: Category) -> Dispatch {
        if category == self.state.nav.category {
            return Dispatch::Unchanged;
        }
        if category == Category::Search && self.state.nav.query.is_empty() {
            return Dispatch::Unchanged;
        }

        let candidate = Navigation {
            category,
            page: 1,
            ..self.state.nav.clone()
        };
        self.reset_to(candidate)
    }

    /// Change one filter and reload from the first page
    pub fn set_filter(&mut self, kind: FilterKind, value: &str) -> Dispatch {
        let value = value.trim();
        if value.is_empty() || self.state.nav.filters.get(kind) == value {
            return Dispatch::Unchanged;
        }

        let mut candidate = Navigation {
            page: 1,
            ..self.state.nav.clone()
        };
        candidate.filters.set(kind, value);
        debug!(filter = kind.as_str(), value = %value, "Filter changed");
        self.reset_to(candidate)
    }

    /// Run a free-text search from the first page
    pub fn search(&mut self, query: &str) -> Dispatch {
        let query = query.trim();
        if query.is_empty() {
            return Dispatch::Unchanged;
        }

        let candidate = Navigation {
            category: Category::Search,
            page: 1,
            query: query.to_string(),
            ..self.state.nav.clone()
        };
        self.reset_to(candidate)
    }

    /// Append the next page of the current view
    pub fn advance_page(&mut self) -> Dispatch {
        if self.state.is_loading() {
            return Dispatch::Dropped;
        }
        // Mirrors the load-more control, which stays hidden after a failed load
        if !self.state.has_more || !self.surface.page().load_more_visible {
            return Dispatch::Unchanged;
        }

        let candidate = Navigation {
            page: self.state.nav.page + 1,
            ..self.state.nav.clone()
        };
        let url = match query::build_list_url(&self.base, &candidate) {
            Ok(url) => url,
            Err(rejection) => return self.reject(rejection),
        };

        self.state.nav.page = candidate.page;
        debug!(page = candidate.page, "Advancing page");
        self.load_page(url)
    }

    /// Open the overlay for the card with the given on-screen number
    pub fn open_card(&mut self, number: usize) -> Dispatch {
        match self.surface.page().card(number).map(|card| card.mal_id) {
            Some(mal_id) => self.open_detail(mal_id),
            None => {
                self.notify(format!("No card #{}", number));
                Dispatch::Unchanged
            }
        }
    }

    /// Show the overlay and fetch the full record for `mal_id`
    pub fn open_detail(&mut self, mal_id: u32) -> Dispatch {
        let url = query::build_detail_url(&self.base, mal_id);
        match self.detail.admit((mal_id, url.clone())) {
            Admission::Granted(ticket) => {
                self.spawn_detail(ticket, mal_id, url.clone());
                Dispatch::Started(url)
            }
            Admission::Deferred => {
                self.show_overlay();
                Dispatch::Deferred(url)
            }
            Admission::Dropped => Dispatch::Dropped,
        }
    }

    /// Hide the overlay; a response still in flight will be ignored
    pub fn close_detail(&mut self) {
        self.detail.invalidate();
        self.surface.apply(PageUpdate::CloseOverlay);
        self.surface.apply(PageUpdate::LockScroll(false));
    }

    /// Apply a finished request
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::List { ticket, outcome } => self.finish_list(ticket, outcome),
            Completion::Detail {
                ticket,
                mal_id,
                outcome,
            } => self.finish_detail(ticket, mal_id, outcome),
        }
    }

    fn reject(&mut self, rejection: Rejection) -> Dispatch {
        warn!(reason = %rejection, "Unsupported filter combination");
        self.surface
            .apply(PageUpdate::ShowNotice(rejection.to_string()));
        Dispatch::Rejected(rejection)
    }

    /// Validate `candidate`, then reset paging and the grid and load page 1
    fn reset_to(&mut self, candidate: Navigation) -> Dispatch {
        let url = match query::build_list_url(&self.base, &candidate) {
            Ok(url) => url,
            Err(rejection) => return self.reject(rejection),
        };

        self.state.nav = candidate;
        self.state.has_more = true;
        self.state.list.invalidate();

        self.surface.apply(PageUpdate::ClearNotice);
        self.surface.apply(PageUpdate::SetTitle(self.state.nav.title()));
        self.surface.apply(PageUpdate::ClearGrid);

        self.load_page(url)
    }

    fn load_page(&mut self, url: Url) -> Dispatch {
        match self.state.list.admit(url.clone()) {
            Admission::Granted(ticket) => {
                self.spawn_list(ticket, url.clone());
                Dispatch::Started(url)
            }
            Admission::Deferred => {
                debug!(url = %url, "List request deferred until stale response lands");
                Dispatch::Deferred(url)
            }
            Admission::Dropped => {
                debug!(url = %url, "List request dropped, another is in flight");
                Dispatch::Dropped
            }
        }
    }

    fn spawn_list(&mut self, ticket: Ticket, url: Url) {
        self.surface.apply(PageUpdate::SetLoading(true));
        self.surface.apply(PageUpdate::SetLoadMore(false));

        info!(
            url = %url,
            category = %self.state.nav.category,
            page = self.state.nav.page,
            "Fetching anime list"
        );

        let catalog = Arc::clone(&self.catalog);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = catalog.list(url).await;
            let _ = completions.send(Completion::List { ticket, outcome });
        });
    }

    fn finish_list(&mut self, ticket: Ticket, outcome: Result<ListResponse, CatalogError>) {
        let Some(landing) = self.state.list.finish(ticket) else {
            warn!("Ignoring completion for an unknown list request");
            return;
        };

        if landing.current {
            match outcome {
                Ok(response) => self.render_list(response),
                Err(e) => {
                    warn!(error = %e, "Error fetching anime");
                    self.surface
                        .apply(PageUpdate::ReplaceGrid(view::LIST_FAILED.to_string()));
                }
            }
        } else {
            debug!("Discarding stale list response");
        }

        self.surface.apply(PageUpdate::SetLoading(false));

        if let Some(next) = landing.deferred {
            self.load_page(next);
        }
    }

    fn render_list(&mut self, response: ListResponse) {
        self.state.has_more = response
            .pagination
            .as_ref()
            .map_or(true, |p| p.has_next_page);

        if response.data.is_empty() {
            if self.surface.page().cards().is_empty() {
                self.surface
                    .apply(PageUpdate::ReplaceGrid(view::NO_RESULTS.to_string()));
            }
        } else {
            let cards = response
                .data
                .iter()
                .map(|anime| view::card(anime, &self.placeholder_image))
                .collect();
            self.surface.apply(PageUpdate::AppendCards(cards));
        }

        info!(
            entries = response.data.len(),
            page = self.state.nav.page,
            has_more = self.state.has_more,
            "Anime list rendered"
        );

        self.surface
            .apply(PageUpdate::SetLoadMore(self.state.has_more));
    }

    fn show_overlay(&mut self) {
        self.surface.apply(PageUpdate::OpenOverlay);
        self.surface.apply(PageUpdate::LockScroll(true));
    }

    fn spawn_detail(&mut self, ticket: Ticket, mal_id: u32, url: Url) {
        self.show_overlay();
        info!(mal_id = mal_id, url = %url, "Fetching anime details");

        let catalog = Arc::clone(&self.catalog);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = catalog.detail(url).await;
            let _ = completions.send(Completion::Detail {
                ticket,
                mal_id,
                outcome,
            });
        });
    }

    fn finish_detail(
        &mut self,
        ticket: Ticket,
        mal_id: u32,
        outcome: Result<AnimeDetail, CatalogError>,
    ) {
        let Some(landing) = self.detail.finish(ticket) else {
            warn!(mal_id = mal_id, "Ignoring completion for an unknown detail request");
            return;
        };

        if landing.current {
            match outcome {
                Ok(anime) => {
                    let view = view::detail(&anime, &self.placeholder_image);
                    self.surface.apply(PageUpdate::ShowDetail(view));
                }
                Err(e) => {
                    warn!(mal_id = mal_id, error = %e, "Error fetching anime details");
                    self.surface
                        .apply(PageUpdate::DetailFailed(view::DETAIL_FAILED.to_string()));
                }
            }
        } else {
            debug!(mal_id = mal_id, "Discarding details for a closed overlay");
        }

        if let Some((next_id, next_url)) = landing.deferred {
            if let Admission::Granted(next) = self.detail.admit((next_id, next_url.clone())) {
                self.spawn_detail(next, next_id, next_url);
            }
        }
    }
}
