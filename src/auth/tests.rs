//! Tests for auth module
//!
//! These tests verify session token behavior and registration validation:
//! - issue/verify round-trips with a fixed secret
//! - rejection of tampered, wrongly-signed, and expired tokens
//! - registration payload rules

#[cfg(test)]
mod tests {
    use super::super::models::RegisterRequest;
    use super::super::tokens::*;
    use super::super::validators::RegisterValidator;
    use crate::common::Validator;

    const SECRET: &str = "test_secret_key";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = TokenService::new(SECRET);

        let token = tokens
            .issue("U_TEST01", LOGIN_SESSION_TTL_SECS)
            .expect("Failed to issue token");

        let subject = tokens.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "U_TEST01");
    }

    #[test]
    fn test_verify_fails_with_wrong_secret() {
        let tokens = TokenService::new(SECRET);
        let other = TokenService::new("wrong_secret_key");

        let token = tokens
            .issue("U_TEST01", REGISTRATION_SESSION_TTL_SECS)
            .expect("Failed to issue token");

        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_fails_for_garbage_tokens() {
        let tokens = TokenService::new(SECRET);

        assert!(matches!(tokens.verify(""), Err(TokenError::Invalid)));
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_verify_fails_for_tampered_token() {
        let tokens = TokenService::new(SECRET);

        let token = tokens
            .issue("U_TEST01", LOGIN_SESSION_TTL_SECS)
            .expect("Failed to issue token");

        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);

        assert!(matches!(tokens.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new(SECRET);

        // already past its expiry when issued
        let token = tokens
            .issue("U_TEST01", -60)
            .expect("Failed to issue token");

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_session_ttl_constants_stay_distinct() {
        // registration and login hand out different session lifetimes
        assert_eq!(REGISTRATION_SESSION_TTL_SECS, 10 * 60 * 60);
        assert_eq!(LOGIN_SESSION_TTL_SECS, 175 * 60 * 60);
        assert_ne!(REGISTRATION_SESSION_TTL_SECS, LOGIN_SESSION_TTL_SECS);
    }

    #[test]
    fn test_register_validator_valid_data() {
        let request = RegisterRequest {
            name: Some("alice".to_string()),
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let result = RegisterValidator.validate(&request);
        assert!(result.is_valid);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_register_validator_missing_name() {
        let request = RegisterRequest {
            name: None,
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let result = RegisterValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_register_validator_name_too_long() {
        let request = RegisterRequest {
            name: Some("a".repeat(31)),
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let result = RegisterValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn test_register_validator_bad_email_and_password() {
        let request = RegisterRequest {
            name: Some("alice".to_string()),
            email: "not-an-email".to_string(),
            password: "".to_string(),
        };

        let result = RegisterValidator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "email"));
        assert!(result.errors.iter().any(|e| e.field == "password"));
    }
}
