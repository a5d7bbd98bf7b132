use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};
use std::collections::BTreeMap;

/// `source` tag the generator backend stamps on the recipes it writes itself.
pub const GENERATED_SOURCE: &str = "GPT2";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    #[serde(rename = "preferredCourse", default)]
    pub preferred_course: String,
    #[serde(rename = "preferredDiet", default)]
    pub preferred_diet: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RecipeResponse {
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct NutritionRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NutritionResponse {
    #[serde(default)]
    pub nutrition: Option<NutritionInfo>,
}

/// A recipe as returned by `/get_recipe`. The backend either generates one
/// itself (tagged `GPT2`) or looks it up in its recipe dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipe {
    Generated(GeneratedRecipe),
    Dataset(DatasetRecipe),
}

impl Recipe {
    /// Ingredient entries this recipe contributes to a nutrition lookup.
    /// A text-valued ingredient field counts as one entry.
    pub fn ingredient_entries(&self) -> Vec<&str> {
        match self {
            Recipe::Generated(r) => r.ingredients.iter().map(String::as_str).collect(),
            Recipe::Dataset(r) => match &r.ingredients {
                IngredientField::List(items) => items.iter().map(String::as_str).collect(),
                IngredientField::Text(text) => vec![text.as_str()],
            },
        }
    }
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        // Dataset records are reshaped by the backend and may carry no tag at all.
        let generated = value.get("source").and_then(|s| s.as_str()) == Some(GENERATED_SOURCE);
        if generated {
            GeneratedRecipe::deserialize(value)
                .map(Recipe::Generated)
                .map_err(de::Error::custom)
        } else {
            DatasetRecipe::deserialize(value)
                .map(Recipe::Dataset)
                .map_err(de::Error::custom)
        }
    }
}

impl Serialize for Recipe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recipe::Generated(recipe) => {
                let mut value = serde_json::to_value(recipe).map_err(ser::Error::custom)?;
                if let Some(map) = value.as_object_mut() {
                    map.insert("source".into(), GENERATED_SOURCE.into());
                }
                value.serialize(serializer)
            }
            Recipe::Dataset(recipe) => recipe.serialize(serializer),
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratedRecipe {
    pub recipe_name: String,
    // emitted as digit strings by the generator
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub servings: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_time: u64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Numbered steps in a single string, e.g. `"1. Boil water. 2. Add pasta."`.
    #[serde(default)]
    pub instructions: String,
}

/// A record from the backend's recipe dataset. The backend fills absent
/// columns with defaults but passes stored nulls through, so both count as empty.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DatasetRecipe {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub recipe_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub cuisine: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub course: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub diet: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub prep_time: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub cook_time: f64,
    /// Number or empty string, passed through as sent.
    #[serde(default)]
    pub servings: serde_json::Value,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub ingredients: IngredientField,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Dataset recipes store ingredients either as a list or as one prepared string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum IngredientField {
    List(Vec<String>),
    Text(String),
}

impl Default for IngredientField {
    fn default() -> Self {
        IngredientField::List(Vec::new())
    }
}

impl IngredientField {
    pub fn display(&self) -> String {
        match self {
            IngredientField::List(items) => items.join(", "),
            IngredientField::Text(text) => text.clone(),
        }
    }
}

/// Aggregate nutrient totals keyed by nutrient name (`"Calories"`, `"Vitamin A"`, ...).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct NutritionInfo(pub BTreeMap<String, f64>);

impl NutritionInfo {
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.0.get(nutrient.key()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Nutrient, f64)> for NutritionInfo {
    fn from_iter<I: IntoIterator<Item = (Nutrient, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, v)| (n.key().to_string(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugars,
    Sodium,
    Calcium,
    Iron,
    VitaminA,
    VitaminC,
    Potassium,
    Magnesium,
    Cholesterol,
    SaturatedFat,
}

impl Nutrient {
    /// Display order of the nutrition panel.
    pub const ALL: [Nutrient; 15] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::Sugars,
        Nutrient::Sodium,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Potassium,
        Nutrient::Magnesium,
        Nutrient::Cholesterol,
        Nutrient::SaturatedFat,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbs",
            Nutrient::Fat => "Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sugars => "Sugars",
            Nutrient::Sodium => "Sodium",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Potassium => "Potassium",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::SaturatedFat => "Saturated Fat",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein
            | Nutrient::Carbs
            | Nutrient::Fat
            | Nutrient::Fiber
            | Nutrient::Sugars
            | Nutrient::SaturatedFat => "g",
            Nutrient::VitaminA => "IU",
            _ => "mg",
        }
    }
}
