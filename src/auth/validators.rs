// src/auth/validators.rs

use super::models::RegisterRequest;
use crate::common::{ValidationResult, Validator};

pub struct RegisterValidator;

impl Validator<RegisterRequest> for RegisterValidator {
    fn validate(&self, data: &RegisterRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                if name.len() > 30 {
                    result.add_error("name", "Name length should not exceed 30 characters");
                }
            }
            _ => result.add_error("name", "Name is required"),
        }

        if data.email.trim().is_empty() || !data.email.contains('@') {
            result.add_error("email", "A valid email is required");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
