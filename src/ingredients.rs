use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Ingredient inputs in the order the user added them. Blank slots are kept
/// while editing and only dropped by [`IngredientList::submitted`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct IngredientList(Vec<String>);

impl Default for IngredientList {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientList {
    /// The form opens with one empty input.
    pub fn new() -> Self {
        Self(vec![String::new()])
    }

    pub fn add_slot(&mut self) {
        self.0.push(String::new());
    }

    pub fn set_at(&mut self, index: usize, value: impl Into<String>) -> Result<(), InputError> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(InputError::SlotOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    pub fn slots(&self) -> &[String] {
        &self.0
    }

    /// Entries sent with a recipe request: whitespace-only slots are dropped,
    /// the rest go out exactly as typed.
    pub fn submitted(&self) -> Vec<String> {
        non_blank(&self.0)
    }
}

pub(crate) fn non_blank<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect()
}

/// Course and diet as picked in the dropdowns. Either may be empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Preferences {
    pub course: String,
    pub diet: String,
}

impl Preferences {
    pub fn set_course(&mut self, value: impl Into<String>) {
        self.course = value.into();
    }

    pub fn set_diet(&mut self, value: impl Into<String>) {
        self.diet = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Course {
    Beverages,
    Breakfast,
    Cocktail,
    Condiment,
    Dessert,
    Juice,
    MainCourse,
    SideDish,
    Snack,
}

impl Course {
    pub const ALL: [Course; 9] = [
        Course::Beverages,
        Course::Breakfast,
        Course::Cocktail,
        Course::Condiment,
        Course::Dessert,
        Course::Juice,
        Course::MainCourse,
        Course::SideDish,
        Course::Snack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Course::Beverages => "Beverages",
            Course::Breakfast => "Breakfast",
            Course::Cocktail => "Cocktail",
            Course::Condiment => "Condiment",
            Course::Dessert => "Dessert",
            Course::Juice => "Juice",
            Course::MainCourse => "Main Course",
            Course::SideDish => "Side Dish",
            Course::Snack => "Snack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Eggetarian,
    Keto,
    NonVegetarian,
    Sattvik,
    Vegan,
    Vegetarian,
}

impl Diet {
    pub const ALL: [Diet; 6] = [
        Diet::Eggetarian,
        Diet::Keto,
        Diet::NonVegetarian,
        Diet::Sattvik,
        Diet::Vegan,
        Diet::Vegetarian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Diet::Eggetarian => "Eggetarian",
            Diet::Keto => "Keto",
            Diet::NonVegetarian => "Non-Vegetarian",
            Diet::Sattvik => "Sattvik",
            Diet::Vegan => "Vegan",
            Diet::Vegetarian => "Vegetarian",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_with_single_empty_slot() {
        assert_eq!(IngredientList::new().slots(), &[String::new()]);
    }

    #[test]
    fn editing_one_slot_leaves_others_in_place() {
        let mut list = IngredientList::new();
        for _ in 0..4 {
            list.add_slot();
        }
        for (i, name) in ["rice", "dal", "ghee", "salt", "cumin"].iter().enumerate() {
            list.set_at(i, *name).unwrap();
        }

        list.set_at(2, "butter").unwrap();

        assert_eq!(list.slots(), &["rice", "dal", "butter", "salt", "cumin"]);
    }

    #[test]
    fn out_of_range_edit_is_rejected() {
        let mut list = IngredientList::new();
        assert_eq!(
            list.set_at(3, "egg"),
            Err(InputError::SlotOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(list.slots(), &[String::new()]);
    }

    #[test]
    fn submission_drops_blank_entries_only() {
        let mut list = IngredientList::new();
        list.add_slot();
        list.add_slot();
        list.set_at(0, "  ").unwrap();
        list.set_at(1, " onion ").unwrap();

        assert_eq!(list.submitted(), vec![" onion ".to_string()]);
    }

    #[test]
    fn all_blank_submission_is_empty() {
        let mut list = IngredientList::new();
        list.add_slot();
        list.set_at(1, "\t").unwrap();
        assert!(list.submitted().is_empty());
    }

    #[test]
    fn preferences_accept_values_outside_dropdown() {
        let mut prefs = Preferences::default();
        prefs.set_course("Brunch");
        prefs.set_diet("Vegan");
        assert_eq!(prefs.course, "Brunch");
        assert_eq!(prefs.diet, "Vegan");
        assert!(!Course::ALL.iter().any(|c| c.label() == prefs.course));
    }

    #[test]
    fn dropdown_labels_match_backend_vocabulary() {
        assert_eq!(Course::MainCourse.label(), "Main Course");
        assert_eq!(Diet::NonVegetarian.label(), "Non-Vegetarian");
        assert_eq!(Course::ALL.len(), 9);
        assert_eq!(Diet::ALL.len(), 6);
    }
}
