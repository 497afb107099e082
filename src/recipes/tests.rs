//! Tests for recipes module
//!
//! These tests cover:
//! - cook-time parsing
//! - search query construction and pagination arithmetic
//! - create/search validators and the image extension rule

#[cfg(test)]
mod tests {
    use super::super::duration::parse_duration_seconds;
    use super::super::models::{CreateRecipeFields, Recipe, RecipeResponse, SearchRecipesParams};
    use super::super::search::{current_page, total_pages, RecipeFilter, RecipeQuery};
    use super::super::validators::{image_extension, RecipeValidator, SearchQueryValidator};
    use crate::common::Validator;

    fn empty_params() -> SearchRecipesParams {
        SearchRecipesParams {
            category: None,
            difficulty: None,
            ingredients: None,
            min_cook_time: None,
            max_cook_time: None,
            limit: None,
            offset: None,
        }
    }

    fn valid_fields() -> CreateRecipeFields {
        CreateRecipeFields {
            title: Some("Pancakes".to_string()),
            description: Some("Fluffy pancakes".to_string()),
            steps: Some(vec!["Mix".to_string(), "Fry".to_string()]),
            ingredients: Some(vec!["flour".to_string(), "milk".to_string()]),
            cook_time: Some("30m".to_string()),
            category: Some("Breakfast".to_string()),
            difficulty: Some("Easy".to_string()),
        }
    }

    // ========================================================================
    // Duration parsing
    // ========================================================================

    #[test]
    fn test_parse_duration_accepted_units() {
        assert_eq!(parse_duration_seconds("90s").unwrap(), 90);
        assert_eq!(parse_duration_seconds("45m").unwrap(), 2700);
        assert_eq!(parse_duration_seconds("2h").unwrap(), 7200);
        assert_eq!(parse_duration_seconds("1d").unwrap(), 86400);
    }

    #[test]
    fn test_parse_duration_rejects_bad_input() {
        let bad_inputs = [
            "", "abc", "1x", "h", "10", "1h30m", " 5m", "5m ", "1.5h", "-5m", "m5",
        ];
        for input in bad_inputs {
            assert!(
                parse_duration_seconds(input).is_err(),
                "accepted {:?}",
                input
            );
        }
    }

    // ========================================================================
    // Search query construction
    // ========================================================================

    #[test]
    fn test_cook_time_range_requires_both_bounds() {
        let mut params = empty_params();
        params.min_cook_time = Some("10m".to_string());
        assert!(RecipeQuery::from_params(&params).is_err());

        let mut params = empty_params();
        params.max_cook_time = Some("1h".to_string());
        assert!(RecipeQuery::from_params(&params).is_err());
    }

    #[test]
    fn test_cook_time_range_parsed_to_seconds() {
        let mut params = empty_params();
        params.min_cook_time = Some("10m".to_string());
        params.max_cook_time = Some("1h".to_string());

        let query = RecipeQuery::from_params(&params).unwrap();
        assert!(query.filters.contains(&RecipeFilter::CookTimeBetween {
            min_seconds: 600,
            max_seconds: 3600,
        }));
    }

    #[test]
    fn test_no_filters_means_no_constraints() {
        let query = RecipeQuery::from_params(&empty_params()).unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.where_clause(), "");
    }

    #[test]
    fn test_bad_duration_in_range_propagates() {
        let mut params = empty_params();
        params.min_cook_time = Some("abc".to_string());
        params.max_cook_time = Some("1h".to_string());
        assert!(RecipeQuery::from_params(&params).is_err());
    }

    #[test]
    fn test_ingredient_input_splits_on_whitespace() {
        let mut params = empty_params();
        params.ingredients = Some("flour  sugar\tegg".to_string());

        let query = RecipeQuery::from_params(&params).unwrap();
        assert!(query
            .filters
            .contains(&RecipeFilter::IngredientsContainAll(vec![
                "flour".to_string(),
                "sugar".to_string(),
                "egg".to_string(),
            ])));
    }

    #[test]
    fn test_all_filters_are_and_composed() {
        let mut params = empty_params();
        params.category = Some("Dinner".to_string());
        params.difficulty = Some("Hard".to_string());
        params.ingredients = Some("beef".to_string());
        params.min_cook_time = Some("30m".to_string());
        params.max_cook_time = Some("2h".to_string());

        let query = RecipeQuery::from_params(&params).unwrap();
        assert_eq!(query.filters.len(), 4);

        let clause = query.where_clause();
        assert!(clause.starts_with(" WHERE "));
        assert!(clause.contains("category = ?"));
        assert!(clause.contains("difficulty = ?"));
        assert!(clause.contains("cook_time_seconds BETWEEN ? AND ?"));
        assert!(clause.contains("json_each"));
    }

    #[test]
    fn test_supplied_filters_each_add_one_predicate() {
        let mut params = empty_params();
        params.category = Some("Dinner".to_string());
        params.difficulty = Some("Hard".to_string());
        params.ingredients = Some("beef".to_string());

        let query = RecipeQuery::from_params(&params).unwrap();
        let clause = query.where_clause();
        assert_eq!(clause.matches(" AND ").count(), 2);
    }

    #[test]
    fn test_pagination_defaults() {
        let query = RecipeQuery::from_params(&empty_params()).unwrap();
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_pagination_arithmetic() {
        // 25 matches at 10 per page need 3 pages
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(100, 100), 1);

        // the reported page is the raw offset plus one, not a page index
        assert_eq!(current_page(0), 1);
        assert_eq!(current_page(10), 11);
    }

    // ========================================================================
    // Validators
    // ========================================================================

    #[test]
    fn test_recipe_validator_valid_data() {
        let result = RecipeValidator.validate(&valid_fields());
        assert!(result.is_valid);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_recipe_validator_missing_title() {
        let mut fields = valid_fields();
        fields.title = None;

        let result = RecipeValidator.validate(&fields);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_recipe_validator_unknown_category() {
        let mut fields = valid_fields();
        fields.category = Some("Brunch".to_string());

        let result = RecipeValidator.validate(&fields);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "category"));
    }

    #[test]
    fn test_recipe_validator_unknown_difficulty() {
        let mut fields = valid_fields();
        fields.difficulty = Some("Impossible".to_string());

        let result = RecipeValidator.validate(&fields);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "difficulty"));
    }

    #[test]
    fn test_search_validator_limit_bounds() {
        let mut params = empty_params();
        params.limit = Some(0);
        assert!(!SearchQueryValidator.validate(&params).is_valid);

        params.limit = Some(101);
        assert!(!SearchQueryValidator.validate(&params).is_valid);

        params.limit = Some(100);
        assert!(SearchQueryValidator.validate(&params).is_valid);

        params.limit = Some(1);
        assert!(SearchQueryValidator.validate(&params).is_valid);
    }

    #[test]
    fn test_search_validator_rejects_negative_offset() {
        let mut params = empty_params();
        params.offset = Some(-1);
        assert!(!SearchQueryValidator.validate(&params).is_valid);
    }

    #[test]
    fn test_search_validator_membership() {
        let mut params = empty_params();
        params.category = Some("Brunch".to_string());
        assert!(!SearchQueryValidator.validate(&params).is_valid);

        let mut params = empty_params();
        params.difficulty = Some("Medium".to_string());
        assert!(!SearchQueryValidator.validate(&params).is_valid);
    }

    // ========================================================================
    // Image extension rule
    // ========================================================================

    #[test]
    fn test_image_extension_accepts_known_formats() {
        assert_eq!(image_extension("photo.png"), Some("png"));
        assert_eq!(image_extension("photo.jpg"), Some("jpg"));
        assert_eq!(image_extension("photo.jpeg"), Some("jpeg"));
    }

    #[test]
    fn test_image_extension_rejections() {
        assert_eq!(image_extension("photo.gif"), None);
        assert_eq!(image_extension("photo"), None);
        // the check is case-sensitive
        assert_eq!(image_extension("photo.PNG"), None);
        // only the segment after the first dot counts
        assert_eq!(image_extension("photo.tar.png"), None);
    }

    // ========================================================================
    // Model conversions
    // ========================================================================

    #[test]
    fn test_recipe_response_parses_json_columns() {
        let recipe = Recipe {
            id: "R_TEST01".to_string(),
            creator_id: "U_TEST01".to_string(),
            title: "Pancakes".to_string(),
            description: "Fluffy pancakes".to_string(),
            steps: r#"["Mix","Fry"]"#.to_string(),
            ingredients: r#"["flour","milk"]"#.to_string(),
            cook_time_seconds: 1800,
            cook_time: "30m".to_string(),
            category: "Breakfast".to_string(),
            difficulty: "Easy".to_string(),
            image_url: "http://localhost:9000/recipes/abc.png".to_string(),
            created_at: None,
        };

        let response = RecipeResponse::from(recipe);
        assert_eq!(response.steps, vec!["Mix", "Fry"]);
        assert_eq!(response.ingredients, vec!["flour", "milk"]);
        assert_eq!(response.cook_time_seconds, 1800);
    }
}
