//! Article browsing controller.
//!
//! [`Browser`] owns the active mode, pagination cursor, displayed article
//! list, and the favorites membership cache. All state lives on the
//! caller's event loop: transition methods mutate state synchronously and
//! spawn a network task, the task reports back over an `mpsc` channel, and
//! [`Browser::handle_event`] applies the result.
//!
//! Among outstanding article fetches, only the one matching the most
//! recently requested (mode, page, query) tuple is applied: every dispatch
//! bumps a generation counter, the counter travels with the task, and
//! results carrying a stale generation are discarded on arrival
//! (last-request-wins, not first-response-wins).

mod events;
pub mod view;

pub use events::BrowserEvent;

use crate::favorites::FavoritesCache;
use crate::gateway::NewsGateway;
use crate::model::Article;
use crate::session::SessionProvider;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Guidance shown when favorites are requested without a session.
const LOGIN_TO_VIEW: &str = "Please log in to view favorites";
const LOGIN_TO_ADD: &str = "Please log in to add favorites";

/// The active content-selection strategy. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Headlines,
    Search(String),
    Category(String),
    Favorites,
}

impl Mode {
    pub fn is_favorites(&self) -> bool {
        matches!(self, Mode::Favorites)
    }
}

/// Lifecycle of one logical remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// What a dispatched fetch task asks the gateway for.
///
/// Captured at dispatch time so later transitions cannot change what an
/// in-flight task requests.
enum FetchPlan {
    Headlines { page: u32, page_size: u32 },
    Search { query: String, page: u32, page_size: u32 },
    Category { name: String, page: u32, page_size: u32 },
    Favorites { user_id: String },
}

pub struct Browser {
    gateway: Arc<NewsGateway>,
    session: Arc<dyn SessionProvider>,
    event_tx: mpsc::Sender<BrowserEvent>,

    mode: Mode,
    /// 1-based page cursor; reset to 1 by every non-pagination transition.
    page: u32,
    page_size: u32,

    /// Displayed result set, replaced wholesale on every successful fetch.
    articles: Arc<Vec<Article>>,
    favorites: FavoritesCache,

    articles_state: RequestState,
    favorites_state: RequestState,

    /// Bumped on every article fetch dispatch; results carrying an older
    /// generation are discarded when they arrive.
    fetch_generation: u64,

    /// Transient message (authorization guidance, toggle failure); cleared
    /// on the next user-initiated action.
    transient_error: Option<String>,
}

impl Browser {
    pub fn new(
        gateway: Arc<NewsGateway>,
        session: Arc<dyn SessionProvider>,
        page_size: u32,
        event_tx: mpsc::Sender<BrowserEvent>,
    ) -> Self {
        Self {
            gateway,
            session,
            event_tx,
            mode: Mode::Headlines,
            page: 1,
            page_size,
            articles: Arc::new(Vec::new()),
            favorites: FavoritesCache::new(),
            articles_state: RequestState::Idle,
            favorites_state: RequestState::Idle,
            fetch_generation: 0,
            transient_error: None,
        }
    }

    /// Dispatch the initial headlines fetch and, when a user is logged in,
    /// the favorites sync.
    pub fn start(&mut self) {
        self.dispatch_fetch();
        if self.session.snapshot().authenticated_user().is_some() {
            self.sync_favorites();
        }
    }

    // ------------------------------------------------------------------
    // Accessors (the contract exposed to the presentation layer)
    // ------------------------------------------------------------------

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn articles_state(&self) -> &RequestState {
        &self.articles_state
    }

    pub fn favorites_state(&self) -> &RequestState {
        &self.favorites_state
    }

    pub fn is_loading(&self) -> bool {
        self.articles_state.is_loading()
    }

    /// Error to surface, if any. A transient message (authorization
    /// guidance, toggle failure) takes precedence over a fetch failure.
    pub fn error(&self) -> Option<&str> {
        self.transient_error
            .as_deref()
            .or_else(|| self.articles_state.failure())
    }

    pub fn is_favorite(&self, article_id: &str) -> bool {
        self.favorites.is_favorite(article_id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn select_headlines(&mut self) {
        self.transient_error = None;
        self.mode = Mode::Headlines;
        self.page = 1;
        self.dispatch_fetch();
    }

    /// Category browse. Any pending search query is superseded; the search
    /// box merely displays the category name and triggers no search.
    pub fn select_category(&mut self, name: &str) {
        self.transient_error = None;
        self.mode = Mode::Category(name.to_string());
        self.page = 1;
        self.dispatch_fetch();
    }

    /// Commit a search. A blank query is silently ignored — no fetch, no
    /// mode change. The mode, page, and query are applied in one step and
    /// only then is the fetch dispatched, so no fetch can observe a
    /// half-applied transition.
    pub fn submit_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.transient_error = None;
        self.mode = Mode::Search(query.to_string());
        self.page = 1;
        self.dispatch_fetch();
    }

    /// Show the user's favorites. Requires an authenticated session;
    /// rejected locally otherwise, with no state change and no fetch.
    pub fn select_favorites(&mut self) {
        self.transient_error = None;
        if self.session.snapshot().authenticated_user().is_none() {
            self.transient_error = Some(LOGIN_TO_VIEW.to_string());
            return;
        }
        self.mode = Mode::Favorites;
        self.page = 1;
        self.dispatch_fetch();
    }

    /// Advance one page. No-op in Favorites mode (a single unpaginated set)
    /// and when the last fetched page was short, which signals the end of
    /// the result set.
    pub fn next_page(&mut self) {
        if self.mode.is_favorites() {
            return;
        }
        if (self.articles.len() as u32) < self.page_size {
            return;
        }
        self.transient_error = None;
        self.page += 1;
        self.dispatch_fetch();
    }

    /// Go back one page, floor-clamped at page 1. No-op in Favorites mode.
    pub fn previous_page(&mut self) {
        if self.mode.is_favorites() || self.page <= 1 {
            return;
        }
        self.transient_error = None;
        self.page -= 1;
        self.dispatch_fetch();
    }

    /// Re-issue the fetch for the current (mode, page, query) tuple.
    pub fn refresh(&mut self) {
        self.transient_error = None;
        self.dispatch_fetch();
    }

    /// React to the external session expiring. Favorites become
    /// unavailable: the cache is cleared, and a Favorites view falls back
    /// to headlines. Other modes keep their state.
    pub fn handle_session_expired(&mut self) {
        self.favorites.clear();
        self.favorites_state = RequestState::Idle;
        if self.mode.is_favorites() {
            self.mode = Mode::Headlines;
            self.page = 1;
            self.dispatch_fetch();
        }
    }

    // ------------------------------------------------------------------
    // Favorites operations
    // ------------------------------------------------------------------

    /// Load the user's favorites list into the membership cache.
    ///
    /// Failures here are non-fatal to browsing: logged, never surfaced as a
    /// blocking error, cache left at its last-known state.
    pub fn sync_favorites(&mut self) {
        let Some(user_id) = self
            .session
            .snapshot()
            .authenticated_user()
            .map(str::to_string)
        else {
            return;
        };
        self.favorites_state = RequestState::Loading;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = gateway.favorites_list(&user_id).await;
            let _ = tx.send(BrowserEvent::FavoritesLoaded { result }).await;
        });
    }

    /// Toggle favorite membership for an article.
    ///
    /// The cache mutates only after the remote call confirms
    /// (confirmed-then-apply). On failure the cache is unchanged and a
    /// transient error is surfaced; the user retries by toggling again.
    pub fn toggle_favorite(&mut self, article: &Article) {
        self.transient_error = None;
        let Some(user_id) = self
            .session
            .snapshot()
            .authenticated_user()
            .map(str::to_string)
        else {
            self.transient_error = Some(LOGIN_TO_ADD.to_string());
            return;
        };
        let article_id = article.id.clone();
        let adding = !self.favorites.is_favorite(&article_id);
        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = if adding {
                gateway.add_favorite(&user_id, &article_id).await
            } else {
                gateway.remove_favorite(&user_id, &article_id).await
            };
            let event = match result {
                Ok(()) if adding => BrowserEvent::FavoriteAdded { article_id },
                Ok(()) => BrowserEvent::FavoriteRemoved { article_id },
                Err(e) => BrowserEvent::FavoriteToggleFailed {
                    article_id,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    // ------------------------------------------------------------------
    // Fetch dispatch
    // ------------------------------------------------------------------

    fn dispatch_fetch(&mut self) {
        let plan = match &self.mode {
            Mode::Headlines => FetchPlan::Headlines {
                page: self.page,
                page_size: self.page_size,
            },
            Mode::Search(query) => FetchPlan::Search {
                query: query.clone(),
                page: self.page,
                page_size: self.page_size,
            },
            Mode::Category(name) => FetchPlan::Category {
                name: name.clone(),
                page: self.page,
                page_size: self.page_size,
            },
            Mode::Favorites => {
                match self.session.snapshot().authenticated_user() {
                    Some(user_id) => FetchPlan::Favorites {
                        user_id: user_id.to_string(),
                    },
                    None => {
                        // Session vanished under us; favorites are no
                        // longer available.
                        self.handle_session_expired();
                        return;
                    }
                }
            }
        };

        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.articles_state = RequestState::Loading;

        let gateway = Arc::clone(&self.gateway);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match plan {
                FetchPlan::Headlines { page, page_size } => {
                    gateway.headlines(page, page_size).await
                }
                FetchPlan::Search {
                    query,
                    page,
                    page_size,
                } => gateway.search(&query, page, page_size).await,
                FetchPlan::Category {
                    name,
                    page,
                    page_size,
                } => gateway.category(&name, page, page_size).await,
                FetchPlan::Favorites { user_id } => gateway.favorites_list(&user_id).await,
            };
            if tx
                .send(BrowserEvent::FetchCompleted { generation, result })
                .await
                .is_err()
            {
                tracing::debug!(generation, "Event channel closed, dropping fetch result");
            }
        });
    }
}
