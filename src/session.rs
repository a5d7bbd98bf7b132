use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::{error, info};
use uuid::Uuid;

use crate::client::RecipeBackend;
use crate::config::DEFAULT_SESSION_TTL_SECS;
use crate::error::{AppError, InputError};
use crate::ingredients::{non_blank, IngredientList, Preferences};
use crate::models::{NutritionInfo, NutritionRequest, Recipe, RecipeRequest};

/// Everything one visitor of the recipe page has entered and received.
/// Lives in memory only, for as long as the server keeps the session.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeSession {
    pub id: Uuid,
    pub ingredients: IngredientList,
    pub preferences: Preferences,
    pub recipes: Vec<Recipe>,
    /// Totals for the current `recipes`; `None` until a lookup for them succeeds.
    pub nutrition: Option<NutritionInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for RecipeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            ingredients: IngredientList::new(),
            preferences: Preferences::default(),
            recipes: Vec::new(),
            nutrition: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn add_ingredient_slot(&mut self) {
        self.ingredients.add_slot();
        self.touch();
    }

    pub fn set_ingredient_at(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), InputError> {
        self.ingredients.set_at(index, value)?;
        self.touch();
        Ok(())
    }

    pub fn set_course(&mut self, value: impl Into<String>) {
        self.preferences.set_course(value);
        self.touch();
    }

    pub fn set_diet(&mut self, value: impl Into<String>) {
        self.preferences.set_diet(value);
        self.touch();
    }

    pub fn recipe_request(&self) -> RecipeRequest {
        RecipeRequest {
            ingredients: self.ingredients.submitted(),
            preferred_course: self.preferences.course.clone(),
            preferred_diet: self.preferences.diet.clone(),
        }
    }

    /// Replaces the recipe list and returns the nutrition lookup it calls for,
    /// if any. Totals computed for the previous list are dropped.
    pub fn apply_recipes(&mut self, recipes: Vec<Recipe>) -> Option<NutritionRequest> {
        self.recipes = recipes;
        self.nutrition = None;
        self.touch();
        if self.recipes.is_empty() {
            return None;
        }
        Some(NutritionRequest {
            ingredients: combined_ingredients(&self.recipes),
        })
    }

    pub fn apply_nutrition(&mut self, nutrition: NutritionInfo) {
        self.nutrition = Some(nutrition);
        self.touch();
    }
}

/// All ingredients of all recipes, in order, duplicates kept, blanks removed.
pub fn combined_ingredients(recipes: &[Recipe]) -> Vec<String> {
    let entries: Vec<&str> = recipes.iter().flat_map(Recipe::ingredient_entries).collect();
    non_blank(&entries)
}

/// In-memory sessions keyed by id. Sessions idle for longer than the TTL are
/// dropped whenever a new one is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, RecipeSession>>>,
    ttl: TimeDelta,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(i64::from(DEFAULT_SESSION_TTL_SECS)))
    }
}

impl SessionStore {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    pub fn create(&self) -> RecipeSession {
        self.evict_expired();
        let session = RecipeSession::new();
        self.sessions.write().insert(session.id, session.clone());
        info!("🆕 Created session {}", session.id);
        session
    }

    pub fn get(&self, id: Uuid) -> Result<RecipeSession, AppError> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .remove(&id)
            .map(|_| info!("🗑️ Removed session {}", id))
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Drops sessions not updated within the TTL and returns how many went.
    pub fn evict_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut guard = self.sessions.write();
        let before = guard.len();
        guard.retain(|_, session| session.updated_at >= cutoff);
        let evicted = before - guard.len();
        if evicted > 0 {
            info!("🧹 Evicted {} idle sessions", evicted);
        }
        evicted
    }

    /// Applies `f` to the session under the write lock and returns the updated copy.
    pub fn update<T, E>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut RecipeSession) -> Result<T, E>,
    ) -> Result<RecipeSession, AppError>
    where
        AppError: From<E>,
    {
        let mut guard = self.sessions.write();
        let session = guard.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
        f(session)?;
        Ok(session.clone())
    }

    /// Fetches recipes for the session's current inputs, then nutrition for
    /// whatever came back. A failed recipe fetch leaves the session untouched;
    /// a failed nutrition fetch is logged and leaves the totals unset.
    ///
    /// The lock is only held between network calls. Overlapping runs on one
    /// session are not coordinated: whichever response lands last is shown.
    pub async fn generate(
        &self,
        id: Uuid,
        backend: &dyn RecipeBackend,
    ) -> Result<RecipeSession, AppError> {
        let request = self.get(id)?.recipe_request();

        let recipes = match backend.fetch_recipes(&request).await {
            Ok(recipes) => recipes,
            Err(e) => {
                error!("❌ Error fetching recipes for session {}: {}", id, e);
                return Err(e.into());
            }
        };

        let nutrition_request = {
            let mut guard = self.sessions.write();
            let session = guard.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
            session.apply_recipes(recipes)
        };

        if let Some(nutrition_request) = nutrition_request {
            match backend.fetch_nutrition(&nutrition_request).await {
                Ok(nutrition) => {
                    let mut guard = self.sessions.write();
                    if let Some(session) = guard.get_mut(&id) {
                        session.apply_nutrition(nutrition);
                    }
                }
                Err(e) => error!("❌ Error fetching nutrition info for session {}: {}", id, e),
            }
        }

        self.get(id)
    }
}
