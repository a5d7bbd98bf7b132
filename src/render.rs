//! HTML rendering of the recipe page. Every function here is a pure function
//! of session state.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::ingredients::{Course, Diet, Preferences};
use crate::models::{DatasetRecipe, GeneratedRecipe, Nutrient, NutritionInfo, Recipe};
use crate::session::RecipeSession;

pub const EMPTY_RECIPES_PLACEHOLDER: &str = "Your recipe will appear here.";
pub const NUTRITION_PLACEHOLDER: &str = "Analyzing Nutritional Info....";

/// Ordinal prefix of a generated instruction step, e.g. `"2. "`.
static STEP_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+\.\s*").ok());

/// Splits generated instructions into their numbered steps.
///
/// `"1. Boil water. 2. Add pasta."` becomes `["Boil water.", "Add pasta."]`.
pub fn instruction_steps(instructions: &str) -> Vec<String> {
    let pieces: Vec<&str> = match STEP_PREFIX.as_ref() {
        Some(re) => re.split(instructions).collect(),
        None => vec![instructions],
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_recipes(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return format!("<p>{EMPTY_RECIPES_PLACEHOLDER}</p>");
    }
    recipes
        .iter()
        .map(|recipe| match recipe {
            Recipe::Generated(r) => render_generated(r),
            Recipe::Dataset(r) => render_dataset(r),
        })
        .collect()
}

fn render_generated(recipe: &GeneratedRecipe) -> String {
    let steps: String = instruction_steps(&recipe.instructions)
        .iter()
        .map(|step| format!("<li>{}</li>", text(step)))
        .collect();
    format!(
        r#"<div class="recipe-output">
<h3>Recipe Name: {}</h3>
<p><strong>Servings:</strong> {}</p>
<p><strong>Total Time in Minutes:</strong> {}</p>
<p><strong>Recipe Ingredients:</strong> {}</p>
<p><strong>Recipe Instructions:</strong></p>
<ol>{}</ol>
</div>
"#,
        text(&recipe.recipe_name),
        recipe.servings,
        recipe.total_time,
        text(&recipe.ingredients.join(", ")),
        steps
    )
}

fn render_dataset(recipe: &DatasetRecipe) -> String {
    format!(
        r#"<div class="recipe-output">
<h3>{}</h3>
<p><strong>Cuisine:</strong> {}</p>
<p><strong>Course:</strong> {}</p>
<p><strong>Prep Time:</strong> {} minutes</p>
<p><strong>Cook Time:</strong> {} minutes</p>
<p><strong>Ingredients:</strong> {}</p>
<p><strong>Instructions:</strong> {}</p>
</div>
"#,
        text(&recipe.recipe_name),
        text(&recipe.cuisine),
        text(&recipe.course),
        recipe.prep_time,
        recipe.cook_time,
        text(&recipe.ingredients.display()),
        text(&recipe.instructions)
    )
}

/// Nutrition panel. Not yet requested, in flight and failed all look the same.
pub fn render_nutrition(nutrition: Option<&NutritionInfo>) -> String {
    let Some(info) = nutrition else {
        return format!(
            r#"<div class="nutrition-info"><p><strong>{NUTRITION_PLACEHOLDER}</strong></p></div>"#
        );
    };

    let mut out = String::from("<div class=\"nutrition-info\">\n<h3>Nutrition Information</h3>\n");
    for nutrient in Nutrient::ALL {
        let value = info.get(nutrient).map(|v| v.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "<p><strong>{}:</strong> {} {}</p>",
            nutrient.key(),
            value,
            nutrient.unit()
        );
    }
    out.push_str("</div>");
    out
}

fn render_select(name: &str, prompt: &str, options: &[&str], selected: &str) -> String {
    let mut out = format!(r#"<select name="{name}"><option value="">{prompt}</option>"#);
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            attr(option),
            marker,
            text(option)
        );
    }
    out.push_str("</select>");
    out
}

fn render_inputs(session: &RecipeSession) -> String {
    let Preferences { course, diet } = &session.preferences;
    let courses: Vec<&str> = Course::ALL.iter().map(|c| c.label()).collect();
    let diets: Vec<&str> = Diet::ALL.iter().map(|d| d.label()).collect();

    let mut out = String::from("<div class=\"left-section\">\n<h2>Customize Your Recipe</h2>\n");
    let _ = writeln!(
        out,
        "<div class=\"dropdown-group\"><label>Preferred Course: </label>{}</div>",
        render_select("course", "Select a course", &courses, course)
    );
    let _ = writeln!(
        out,
        "<div class=\"dropdown-group\"><label>Diet Preference: </label>{}</div>",
        render_select("diet", "Select a diet", &diets, diet)
    );
    out.push_str("<label>Ingredients:</label>\n");
    for (index, ingredient) in session.ingredients.slots().iter().enumerate() {
        let _ = writeln!(
            out,
            "<div class=\"ingredient-input\"><input type=\"text\" name=\"ingredient-{}\" \
             value=\"{}\" placeholder=\"Enter an ingredient\"></div>",
            index,
            attr(ingredient)
        );
    }
    out.push_str("</div>\n");
    out
}

pub fn render_page(session: &RecipeSession) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Recipe Generator</title></head>
<body>
<div class="recipe-generator-container" data-session="{}">
<header class="header-image"><h1>Find Your Next Favorite Recipe</h1></header>
<div class="main-content">
{}<div class="right-section">
<h2>Generated Recipes</h2>
{}{}
</div>
</div>
</div>
</body>
</html>
"#,
        session.id,
        render_inputs(session),
        render_recipes(&session.recipes),
        render_nutrition(session.nutrition.as_ref())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientField;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbered_instructions_split_into_steps() {
        assert_eq!(
            instruction_steps("1. Boil water. 2. Add pasta."),
            vec!["Boil water.".to_string(), "Add pasta.".to_string()]
        );
    }

    #[test]
    fn unnumbered_instructions_are_one_step() {
        assert_eq!(instruction_steps("  Stir well  "), vec!["Stir well".to_string()]);
        assert!(instruction_steps("1. 2. ").is_empty());
    }

    #[test]
    fn text_ingredients_render_verbatim() {
        let recipe = Recipe::Dataset(DatasetRecipe {
            recipe_name: "Seasoning".into(),
            ingredients: IngredientField::Text("salt, pepper".into()),
            ..Default::default()
        });
        let html = render_recipes(&[recipe]);
        assert!(html.contains("<p><strong>Ingredients:</strong> salt, pepper</p>"));
    }

    #[test]
    fn list_ingredients_are_comma_joined() {
        let field = IngredientField::List(vec!["salt".into(), "pepper".into()]);
        assert_eq!(field.display(), "salt, pepper");
    }

    #[test]
    fn generated_recipe_renders_ordered_steps() {
        let recipe = Recipe::Generated(GeneratedRecipe {
            recipe_name: "Pasta".into(),
            servings: 2,
            total_time: 15,
            ingredients: vec!["pasta".into(), "water".into()],
            instructions: "1. Boil water. 2. Add pasta.".into(),
        });
        let html = render_recipes(&[recipe]);
        assert!(html.contains("<h3>Recipe Name: Pasta</h3>"));
        assert!(html.contains("<ol><li>Boil water.</li><li>Add pasta.</li></ol>"));
        assert!(html.contains("pasta, water"));
    }

    #[test]
    fn empty_recipe_list_shows_placeholder() {
        assert_eq!(render_recipes(&[]), "<p>Your recipe will appear here.</p>");
    }

    #[test]
    fn unset_nutrition_shows_analyzing() {
        assert!(render_nutrition(None).contains(NUTRITION_PLACEHOLDER));
    }

    #[test]
    fn missing_nutrients_render_empty_not_zero() {
        let info: NutritionInfo = [(Nutrient::Calories, 512.5)].into_iter().collect();
        let html = render_nutrition(Some(&info));
        assert!(html.contains("<p><strong>Calories:</strong> 512.5 kcal</p>"));
        assert!(html.contains("<p><strong>Vitamin A:</strong>  IU</p>"));
        assert_eq!(html.matches("<p><strong>").count(), Nutrient::ALL.len());
    }

    #[test]
    fn backend_text_is_escaped() {
        let recipe = Recipe::Dataset(DatasetRecipe {
            recipe_name: "<script>x</script>".into(),
            ..Default::default()
        });
        assert!(render_recipes(&[recipe]).contains("&lt;script&gt;"));
    }

    #[test]
    fn page_marks_selected_preferences() {
        let mut session = RecipeSession::new();
        session.set_course("Snack");
        session.add_ingredient_slot();
        session.set_ingredient_at(1, "corn").unwrap();
        let html = render_page(&session);
        assert!(html.contains(r#"<option value="Snack" selected>Snack</option>"#));
        assert!(html.contains(r#"name="ingredient-1" value="corn""#));
        assert!(html.contains(EMPTY_RECIPES_PLACEHOLDER));
        assert!(html.contains(NUTRITION_PLACEHOLDER));
    }
}
