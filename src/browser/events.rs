//! Events reported back from spawned network tasks, and their application
//! onto the controller state.

use super::{Browser, RequestState};
use crate::gateway::GatewayError;
use crate::model::Article;
use std::sync::Arc;

#[derive(Debug)]
pub enum BrowserEvent {
    /// An article fetch resolved. `generation` identifies the request; the
    /// handler discards results that no longer match the current one.
    FetchCompleted {
        generation: u64,
        result: Result<Vec<Article>, GatewayError>,
    },
    /// The favorites-list sync resolved.
    FavoritesLoaded {
        result: Result<Vec<Article>, GatewayError>,
    },
    /// The server confirmed an add.
    FavoriteAdded { article_id: String },
    /// The server confirmed a removal.
    FavoriteRemoved { article_id: String },
    /// A toggle failed; the cache was not touched.
    FavoriteToggleFailed { article_id: String, error: String },
}

impl Browser {
    /// Apply one event from the channel.
    ///
    /// Must run on the same logical flow as the transition methods; this is
    /// the only place displayed state is updated from network results.
    pub fn handle_event(&mut self, event: BrowserEvent) {
        match event {
            BrowserEvent::FetchCompleted { generation, result } => {
                self.apply_fetch(generation, result)
            }
            BrowserEvent::FavoritesLoaded { result } => self.apply_favorites_loaded(result),
            BrowserEvent::FavoriteAdded { article_id } => {
                self.favorites.insert(article_id);
            }
            BrowserEvent::FavoriteRemoved { article_id } => {
                self.apply_favorite_removed(&article_id)
            }
            BrowserEvent::FavoriteToggleFailed { article_id, error } => {
                tracing::warn!(article_id = %article_id, error = %error, "Favorite toggle failed");
                self.transient_error = Some(format!("Could not update favorites: {error}"));
            }
        }
    }

    fn apply_fetch(&mut self, generation: u64, result: Result<Vec<Article>, GatewayError>) {
        if generation != self.fetch_generation {
            tracing::debug!(
                generation,
                current = self.fetch_generation,
                "Discarding stale fetch result"
            );
            return;
        }
        match result {
            Ok(articles) => {
                if self.mode.is_favorites() {
                    // In Favorites mode the fetch doubles as a cache sync,
                    // so the displayed list and the membership set cannot
                    // diverge.
                    self.favorites.replace(articles.iter().map(|a| a.id.clone()));
                    self.favorites_state = RequestState::Succeeded;
                }
                self.articles = Arc::new(articles);
                self.articles_state = RequestState::Succeeded;
            }
            Err(e) => {
                self.articles_state = RequestState::Failed(e.to_string());
            }
        }
    }

    fn apply_favorites_loaded(&mut self, result: Result<Vec<Article>, GatewayError>) {
        match result {
            Ok(articles) => {
                self.favorites.replace(articles.into_iter().map(|a| a.id));
                self.favorites_state = RequestState::Succeeded;
            }
            Err(e) => {
                // Non-fatal: browsing continues with the last-known cache.
                tracing::warn!(error = %e, "Favorites sync failed");
                self.favorites_state = RequestState::Failed(e.to_string());
            }
        }
    }

    fn apply_favorite_removed(&mut self, article_id: &str) {
        self.favorites.remove(article_id);
        if self.mode.is_favorites() {
            // Keep the displayed list consistent with the cache without a
            // new fetch.
            let remaining: Vec<Article> = self
                .articles
                .iter()
                .filter(|a| a.id != article_id)
                .cloned()
                .collect();
            self.articles = Arc::new(remaining);
        }
    }
}
