use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

use crate::error::{FetchError, NutritionFetchError, RecipeFetchError};
use crate::models::{
    NutritionInfo, NutritionRequest, NutritionResponse, Recipe, RecipeRequest, RecipeResponse,
};

/// The two calls the recipe page makes against its backend.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    async fn fetch_recipes(&self, request: &RecipeRequest)
        -> Result<Vec<Recipe>, RecipeFetchError>;

    async fn fetch_nutrition(
        &self,
        request: &NutritionRequest,
    ) -> Result<NutritionInfo, NutritionFetchError>;
}

pub struct RecipeClient {
    client: Client,
    base_url: String,
}

impl RecipeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, FetchError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        info!("🔗 POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        info!("📥 {} answered {}", endpoint, status);

        let response_text = response.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            error!("❌ {} error response: {}", endpoint, response_text);
            return Err(FetchError::Status { status, body: response_text });
        }

        serde_json::from_str(&response_text).map_err(FetchError::Parse)
    }
}

#[async_trait]
impl RecipeBackend for RecipeClient {
    async fn fetch_recipes(
        &self,
        request: &RecipeRequest,
    ) -> Result<Vec<Recipe>, RecipeFetchError> {
        info!(
            "🍳 Requesting recipes for {} ingredients (course={:?}, diet={:?})",
            request.ingredients.len(),
            request.preferred_course,
            request.preferred_diet
        );
        let parsed: RecipeResponse = self.post_json("get_recipe", request).await?;
        let recipes = parsed.recipes.unwrap_or_default();
        info!("✅ Received {} recipes", recipes.len());
        Ok(recipes)
    }

    async fn fetch_nutrition(
        &self,
        request: &NutritionRequest,
    ) -> Result<NutritionInfo, NutritionFetchError> {
        info!("🥗 Requesting nutrition for {} ingredients", request.ingredients.len());
        let parsed: NutritionResponse = self.post_json("get_nutrition", request).await?;
        let nutrition = parsed.nutrition.unwrap_or_default();
        if nutrition.is_empty() {
            warn!("⚠️ Nutrition response carried no nutrient values");
        } else {
            info!("✅ Received {} nutrient values", nutrition.0.len());
        }
        Ok(nutrition)
    }
}
