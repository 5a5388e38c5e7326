//! Credential validation
//!
//! Input sanitation shared by both modes, and the local allow-list check.

use super::credentials::{Credential, LOCAL_ACCOUNTS};
use crate::error::AuthError;
use crate::session::Identity;

const LOCAL_HINT: &str =
    "Try admin@admin.com or user@user.com with password 'password'.";

/// Performs basic input sanitation to reject blank, oversized, or control-laden input.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Rejects credentials that could never authenticate, before any lookup or network call.
pub fn validate_input(credential: &Credential, max_length: usize) -> Result<(), AuthError> {
    if !is_valid_input(&credential.identifier, max_length)
        || !is_valid_input(&credential.secret, max_length)
    {
        return Err(AuthError::InvalidCredentials(
            "Email and password are required".into(),
        ));
    }
    Ok(())
}

/// Checks a credential against the built-in allow-list.
///
/// A credential that asks for a role other than the account's own is refused.
pub fn validate_local(credential: &Credential) -> Result<Identity, AuthError> {
    let invalid = || AuthError::InvalidCredentials(format!("Invalid credentials. {LOCAL_HINT}"));

    let account = match LOCAL_ACCOUNTS.get(credential.identifier.as_str()) {
        Some(account) if account.secret == credential.secret => account,
        _ => return Err(invalid()),
    };

    match credential.role {
        Some(role) if role != account.identity.role => Err(invalid()),
        _ => Ok(account.identity.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_allow_listed_accounts() {
        let admin = validate_local(&Credential::new("admin@admin.com", "password")).unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.id, 1);

        let user = validate_local(&Credential::new("user@user.com", "password")).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name, "Regular User");
    }

    #[test]
    fn test_wrong_secret_and_unknown_user() {
        assert!(matches!(
            validate_local(&Credential::new("admin@admin.com", "wrong")),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            validate_local(&Credential::new("nobody@x.com", "password")),
            Err(AuthError::InvalidCredentials(_))
        ));
        // Exact match only.
        assert!(validate_local(&Credential::new("ADMIN@admin.com", "password")).is_err());
    }

    #[test]
    fn test_role_must_match_account() {
        let cred = Credential::new("user@user.com", "password").with_role(Role::Admin);
        assert!(validate_local(&cred).is_err());

        let cred = Credential::new("admin@admin.com", "password").with_role(Role::Admin);
        assert!(validate_local(&cred).is_ok());
    }

    #[test]
    fn test_input_sanitation() {
        assert!(validate_input(&Credential::new("a@b.c", "pw"), 256).is_ok());
        assert!(validate_input(&Credential::new("   ", "pw"), 256).is_err());
        assert!(validate_input(&Credential::new("a@b.c", ""), 256).is_err());
        assert!(validate_input(&Credential::new("a@b.c\r\n", "pw"), 256).is_err());
        assert!(validate_input(&Credential::new("a@b.c", "x".repeat(9)), 8).is_err());
    }
}
