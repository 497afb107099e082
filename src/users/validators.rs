// src/users/validators.rs

use url::Url;

use super::models::{ChangePasswordRequest, UpdateProfileRequest};
use crate::common::{ValidationResult, Validator};

pub struct ProfileUpdateValidator;

impl Validator<UpdateProfileRequest> for ProfileUpdateValidator {
    fn validate(&self, data: &UpdateProfileRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.new_name.is_none() && data.new_avatar_url.is_none() {
            result.add_error("general", "At least one field must be updated");
            return result;
        }

        if let Some(name) = &data.new_name {
            if name.len() < 3 {
                result.add_error("newName", "Name must not be less than 3 characters");
            } else if name.len() > 30 {
                result.add_error("newName", "Name length should not exceed 30 characters");
            }
        }

        if let Some(avatar_url) = &data.new_avatar_url {
            if Url::parse(avatar_url).is_err() {
                result.add_error("newAvatarUrl", "Avatar URL must be a valid URL");
            }
        }

        result
    }
}

pub struct ChangePasswordValidator;

impl Validator<ChangePasswordRequest> for ChangePasswordValidator {
    fn validate(&self, data: &ChangePasswordRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.old_password.is_empty() {
            result.add_error("oldPassword", "Old password is required");
        }

        if data.new_password.is_empty() {
            result.add_error("newPassword", "New password is required");
        }

        // no-op changes are rejected before any hash comparison happens
        if !data.old_password.is_empty() && data.old_password == data.new_password {
            result.add_error(
                "newPassword",
                "Old password and new password must be different",
            );
        }

        result
    }
}
