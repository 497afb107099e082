//! Tests for users module
//!
//! These tests verify profile-update and password-change validation rules
//! and the recipe summary projection.

#[cfg(test)]
mod tests {
    use super::super::models::{ChangePasswordRequest, RecipeSummary, UpdateProfileRequest};
    use super::super::validators::{ChangePasswordValidator, ProfileUpdateValidator};
    use crate::common::Validator;
    use crate::recipes::models::Recipe;

    #[test]
    fn test_profile_update_requires_at_least_one_field() {
        let request = UpdateProfileRequest {
            new_name: None,
            new_avatar_url: None,
        };

        let result = ProfileUpdateValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "general"));
    }

    #[test]
    fn test_profile_update_name_bounds() {
        let request = UpdateProfileRequest {
            new_name: Some("ab".to_string()),
            new_avatar_url: None,
        };
        assert!(!ProfileUpdateValidator.validate(&request).is_valid);

        let request = UpdateProfileRequest {
            new_name: Some("a".repeat(31)),
            new_avatar_url: None,
        };
        assert!(!ProfileUpdateValidator.validate(&request).is_valid);

        let request = UpdateProfileRequest {
            new_name: Some("abc".to_string()),
            new_avatar_url: None,
        };
        assert!(ProfileUpdateValidator.validate(&request).is_valid);
    }

    #[test]
    fn test_profile_update_avatar_url_shape() {
        let request = UpdateProfileRequest {
            new_name: None,
            new_avatar_url: Some("https://example.com/avatar.png".to_string()),
        };
        assert!(ProfileUpdateValidator.validate(&request).is_valid);

        let request = UpdateProfileRequest {
            new_name: None,
            new_avatar_url: Some("not a url".to_string()),
        };
        let result = ProfileUpdateValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "newAvatarUrl"));
    }

    #[test]
    fn test_change_password_rejects_no_op() {
        // identical passwords fail before any hash comparison would run
        let request = ChangePasswordRequest {
            old_password: "hunter2".to_string(),
            new_password: "hunter2".to_string(),
        };

        let result = ChangePasswordValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "newPassword"));
    }

    #[test]
    fn test_change_password_requires_both_fields() {
        let request = ChangePasswordRequest {
            old_password: "".to_string(),
            new_password: "".to_string(),
        };

        let result = ChangePasswordValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "oldPassword"));
        assert!(result.errors.iter().any(|e| e.field == "newPassword"));
    }

    #[test]
    fn test_change_password_accepts_distinct_values() {
        let request = ChangePasswordRequest {
            old_password: "hunter2".to_string(),
            new_password: "correct horse battery staple".to_string(),
        };

        assert!(ChangePasswordValidator.validate(&request).is_valid);
    }

    #[test]
    fn test_recipe_summary_projection() {
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

        let summary = RecipeSummary::from(recipe);
        assert_eq!(summary.id, "R_TEST01");
        assert_eq!(summary.ingredients, vec!["flour", "milk"]);
        assert_eq!(summary.cook_time, "30m");
        assert_eq!(summary.cook_time_seconds, 1800);
    }
}
