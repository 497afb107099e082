// src/recipes/validators.rs

use std::collections::HashSet;

use super::models::{CreateRecipeFields, SearchRecipesParams};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Recipe Validators
// ============================================================================

pub struct RecipeValidator;

impl Validator<CreateRecipeFields> for RecipeValidator {
    fn validate(&self, data: &CreateRecipeFields) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.title.as_deref() {
            Some(title) if !title.trim().is_empty() => {
                if title.len() > 255 {
                    result.add_error("title", "Title must be less than 255 characters");
                }
            }
            _ => result.add_error("title", "Title is required"),
        }

        match data.description.as_deref() {
            Some(description) if !description.trim().is_empty() => {}
            _ => result.add_error("description", "Description is required"),
        }

        match &data.steps {
            Some(steps) if !steps.is_empty() => {}
            _ => result.add_error("steps", "Steps is required"),
        }

        match &data.ingredients {
            Some(ingredients) if !ingredients.is_empty() => {}
            _ => result.add_error("ingredients", "Ingredients is required"),
        }

        if data.cook_time.as_deref().map_or(true, |v| v.is_empty()) {
            result.add_error("cookTime", "Cook time is required");
        }

        let valid_categories = HashSet::from(["Breakfast", "Lunch", "Dinner", "Dessert"]);
        match data.category.as_deref() {
            Some(category) if valid_categories.contains(category) => {}
            Some(_) => result.add_error(
                "category",
                "Category must be one of: Breakfast, Lunch, Dinner, Dessert",
            ),
            None => result.add_error("category", "Category is required"),
        }

        let valid_difficulties = HashSet::from(["Easy", "Normal", "Hard"]);
        match data.difficulty.as_deref() {
            Some(difficulty) if valid_difficulties.contains(difficulty) => {}
            Some(_) => result.add_error(
                "difficulty",
                "Difficulty must be one of: Easy, Normal, Hard",
            ),
            None => result.add_error("difficulty", "Difficulty is required"),
        }

        result
    }
}

// ============================================================================
// Search Validators
// ============================================================================

pub struct SearchQueryValidator;

impl Validator<SearchRecipesParams> for SearchQueryValidator {
    fn validate(&self, data: &SearchRecipesParams) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(category) = &data.category {
            let valid_categories = HashSet::from(["Breakfast", "Lunch", "Dinner", "Dessert"]);
            if !valid_categories.contains(category.as_str()) {
                result.add_error(
                    "category",
                    "Category must be one of: Breakfast, Lunch, Dinner, Dessert",
                );
            }
        }

        if let Some(difficulty) = &data.difficulty {
            let valid_difficulties = HashSet::from(["Easy", "Normal", "Hard"]);
            if !valid_difficulties.contains(difficulty.as_str()) {
                result.add_error(
                    "difficulty",
                    "Difficulty must be one of: Easy, Normal, Hard",
                );
            }
        }

        // out-of-range pagination is rejected here, never clamped downstream
        if let Some(limit) = data.limit {
            if !(1..=100).contains(&limit) {
                result.add_error("limit", "Limit must be between 1 and 100");
            }
        }

        if let Some(offset) = data.offset {
            if offset < 0 {
                result.add_error("offset", "Offset cannot be negative");
            }
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Validate an uploaded image's filename, returning the extension for use
/// in the stored object key. The check is case-sensitive and looks at the
/// segment after the first dot.
pub fn image_extension(filename: &str) -> Option<&str> {
    let extension = filename.split('.').nth(1)?;
    matches!(extension, "png" | "jpg" | "jpeg").then_some(extension)
}
