use pwms_backend::config::JwtConfig;
use pwms_backend::model::user::UserRole;
use pwms_backend::util::jwt::*;

// Helper function to create JWT utils for testing
fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

// JWT utils whose tokens are already expired when issued
fn create_expired_jwt_utils() -> JwtTokenUtilsImpl {
    let config = JwtConfig {
        access_token_expiration: -10,
        ..JwtConfig::default()
    };
    JwtTokenUtilsImpl::new(config)
}

#[test]
fn test_jwt_utils_creation() {
    let jwt_utils = create_test_jwt_utils();
    assert!(!jwt_utils.jwt_config.jwt_secret.is_empty());
    assert!(jwt_utils.jwt_config.access_token_expiration > 0);
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.generate_access_token(42, UserRole::Citizen);
    assert!(result.is_ok());

    let token = result.unwrap();
    assert!(!token.is_empty());

    // Verify the token can be validated
    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, 42);
    assert_eq!(claims.role, "citizen");
    assert!(claims.exp > claims.iat);
    assert!(!claims.jti.is_empty());
}

#[test]
fn test_tokens_are_unique_per_issue() {
    let jwt_utils = create_test_jwt_utils();

    let first = jwt_utils.generate_access_token(7, UserRole::Collector).unwrap();
    let second = jwt_utils.generate_access_token(7, UserRole::Collector).unwrap();

    // jti differs even for identical subject and role
    assert_ne!(first, second);
}

#[test]
fn test_validate_expired_token() {
    let jwt_utils = create_expired_jwt_utils();
    let token = jwt_utils.generate_access_token(42, UserRole::Citizen).unwrap();

    let result = jwt_utils.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::TokenExpired)));
}

#[test]
fn test_validate_tampered_token() {
    let jwt_utils = create_test_jwt_utils();
    let token = jwt_utils.generate_access_token(42, UserRole::Citizen).unwrap();

    // Flip a character in the signature segment
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'a' { 'b' } else { 'a' });

    let result = jwt_utils.validate_access_token(&tampered);
    assert!(matches!(result, Err(JwtError::InvalidToken)));
}

#[test]
fn test_validate_garbage_token() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.validate_access_token("definitely.not.ajwt");
    assert!(matches!(result, Err(JwtError::InvalidToken)));
}

#[test]
fn test_validate_token_signed_with_other_secret() {
    let jwt_utils = create_test_jwt_utils();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "a_completely_different_secret_key_that_is_long_enough_for_hs256"
            .to_string(),
        ..JwtConfig::default()
    });

    let token = other.generate_access_token(42, UserRole::Admin).unwrap();
    let result = jwt_utils.validate_access_token(&token);
    assert!(matches!(result, Err(JwtError::InvalidToken)));
}

#[test]
fn test_extract_bearer_token_success() {
    let jwt_utils = create_test_jwt_utils();

    let token = jwt_utils
        .extract_bearer_token(Some("Bearer abc.def.ghi"))
        .unwrap();
    assert_eq!(token, "abc.def.ghi");
}

#[test]
fn test_extract_bearer_token_missing_header() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.extract_bearer_token(None);
    assert!(matches!(result, Err(JwtError::MissingToken)));
}

#[test]
fn test_extract_bearer_token_non_bearer_scheme() {
    let jwt_utils = create_test_jwt_utils();

    // A present but non-Bearer header resolves to the missing-token failure,
    // it must not fall through as if no check had happened
    let result = jwt_utils.extract_bearer_token(Some("Basic dXNlcjpwYXNz"));
    assert!(matches!(result, Err(JwtError::MissingToken)));
}

#[test]
fn test_extract_bearer_token_bare_scheme() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.extract_bearer_token(Some("Bearer"));
    assert!(matches!(result, Err(JwtError::MissingToken)));
}

#[test]
fn test_extract_bearer_token_empty_token() {
    let jwt_utils = create_test_jwt_utils();

    let result = jwt_utils.extract_bearer_token(Some("Bearer   "));
    assert!(matches!(result, Err(JwtError::InvalidToken)));
}
