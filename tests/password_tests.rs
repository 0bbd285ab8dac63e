use pwms_backend::util::password::*;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let result = PasswordUtilsImpl::hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();

    // Hash should not be empty
    assert!(!hash.is_empty());

    // Hash should not equal the original password
    assert_ne!(hash, password);

    // Hash should contain Argon2 format components
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_hash_password_different_results() {
    let password = "same_password_123";
    let hash1 = PasswordUtilsImpl::hash_password(password).unwrap();
    let hash2 = PasswordUtilsImpl::hash_password(password).unwrap();

    // Random salts make every hash unique
    assert_ne!(hash1, hash2);

    // But both verify against the original password
    assert!(PasswordUtilsImpl::verify_password(password, &hash1).unwrap());
    assert!(PasswordUtilsImpl::verify_password(password, &hash2).unwrap());
}

#[test]
fn test_verify_password_correct() {
    let password = "correct_password_456";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password(password, &hash);
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let password = "correct_password_456";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password("wrong_password_789", &hash);
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_empty_input() {
    let password = "nonempty_password";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    let result = PasswordUtilsImpl::verify_password("", &hash);
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("whatever", "not-a-valid-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_hash_password_unicode_characters() {
    let password = "Pássw0rd123!🔒";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}
