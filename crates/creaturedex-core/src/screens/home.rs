use tracing::{debug, error};

use crate::catalog::{CatalogOrigin, NO_CREATURES_MESSAGE};
use crate::context::AppContext;
use crate::models::{Creature, CreatureId};

use super::Route;

pub const HOME_TITLE: &str = "Mystical Creatures";
const LOADING_MESSAGE: &str = "Loading creatures...";

/// One entry of the creature list.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureRow {
    pub id: CreatureId,
    pub name: String,
    pub is_favorite: bool,
}

pub struct HomeScreen {
    ctx: AppContext,
    creatures: Vec<Creature>,
    favorites: Vec<CreatureId>,
    show_favorites: bool,
    loading: bool,
    origin: Option<CatalogOrigin>,
    cache_age: Option<String>,
}

impl HomeScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            creatures: Vec::new(),
            favorites: Vec::new(),
            show_favorites: false,
            loading: true,
            origin: None,
            cache_age: None,
        }
    }

    /// First load: catalog (with offline fallback), then favorites.
    pub async fn mount(&mut self) {
        let load = self.ctx.catalog.fetch_creatures().await;
        self.creatures = load.creatures;
        self.origin = Some(load.origin);
        self.cache_age = load.cache_age;
        self.reload_favorites().await;
        self.loading = false;
    }

    /// Returning to the screen picks up favorites changed elsewhere.
    pub async fn focus(&mut self) {
        self.reload_favorites().await;
    }

    async fn reload_favorites(&mut self) {
        match self.ctx.favorites.favorites().await {
            Ok(favorites) => self.favorites = favorites,
            Err(e) => error!(error = %e, "Error loading favorites"),
        }
    }

    pub fn toggle_show_favorites(&mut self) {
        self.show_favorites = !self.show_favorites;
        debug!(show_favorites = self.show_favorites, "Toggled favorites filter");
    }

    pub fn is_showing_favorites(&self) -> bool {
        self.show_favorites
    }

    pub fn filter_button_label(&self) -> &'static str {
        if self.show_favorites {
            "Show All"
        } else {
            "Show Favorites"
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn origin(&self) -> Option<CatalogOrigin> {
        self.origin
    }

    pub fn cache_age(&self) -> Option<&str> {
        self.cache_age.as_deref()
    }

    pub fn is_favorite(&self, id: CreatureId) -> bool {
        self.favorites.contains(&id)
    }

    pub fn visible_creatures(&self) -> Vec<&Creature> {
        if !self.show_favorites {
            return self.creatures.iter().collect();
        }
        if self.loading {
            return Vec::new();
        }
        self.creatures
            .iter()
            .filter(|c| self.favorites.contains(&c.id))
            .collect()
    }

    pub fn rows(&self) -> Vec<CreatureRow> {
        self.visible_creatures()
            .into_iter()
            .map(|c| CreatureRow {
                id: c.id,
                name: c.name.clone(),
                is_favorite: self.is_favorite(c.id),
            })
            .collect()
    }

    pub fn status_message(&self) -> Option<&'static str> {
        if self.loading {
            Some(LOADING_MESSAGE)
        } else if self.visible_creatures().is_empty() {
            Some(NO_CREATURES_MESSAGE)
        } else {
            None
        }
    }

    pub fn select(&self, id: CreatureId) -> Option<Route> {
        self.creatures
            .iter()
            .find(|c| c.id == id)
            .map(|c| Route::Detail(c.clone()))
    }
}
