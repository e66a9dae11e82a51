//! Pure projection of controller state into a renderable description.
//!
//! The presentation layer owns the actual rendering; this module only maps
//! (mode, articles, favorites, loading/error flags) to what should be on
//! screen, re-derived after every state transition.

use super::{Browser, Mode};
use crate::model::Article;

/// One renderable article plus its favorites membership.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub article: Article,
    pub favorite: bool,
}

/// Everything the presentation layer needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub title: String,
    pub page: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<ArticleCard>,
    /// Placeholder text when there is nothing to show.
    pub empty_message: Option<String>,
    /// Pagination is hidden while loading, when the list is empty, and in
    /// Favorites mode (a single unpaginated set).
    pub show_pagination: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

pub fn project(browser: &Browser) -> ViewModel {
    let loading = browser.is_loading();

    let cards: Vec<ArticleCard> = browser
        .articles()
        .iter()
        .map(|article| ArticleCard {
            favorite: browser.is_favorite(&article.id),
            article: article.clone(),
        })
        .collect();

    let title = match browser.mode() {
        Mode::Headlines => "Top Headlines".to_string(),
        Mode::Search(query) => format!("Search Results: \"{query}\""),
        Mode::Category(name) => format!("{name} News"),
        Mode::Favorites => "My Favorite Articles".to_string(),
    };

    let empty_message = if !loading && cards.is_empty() {
        Some(
            match browser.mode() {
                Mode::Favorites => "You don't have any favorite articles yet.",
                _ => "No articles found.",
            }
            .to_string(),
        )
    } else {
        None
    };

    let show_pagination = !loading && !cards.is_empty() && !browser.mode().is_favorites();

    ViewModel {
        title,
        page: browser.page(),
        loading,
        error: browser.error().map(str::to_string),
        can_go_previous: browser.page() > 1,
        can_go_next: (cards.len() as u32) >= browser.page_size(),
        show_pagination,
        cards,
        empty_message,
    }
}
