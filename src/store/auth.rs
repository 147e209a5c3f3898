use crate::store::action::AuthAction;
use crate::store::reducer::Reducer;
use secrecy::SecretString;

/// Authenticated user as reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub is_anonymous: bool,
}

/// Email/password sign-in payload. The password never appears in `Debug`.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Sign-up payload: credentials plus the profile name to store.
#[derive(Debug)]
pub struct SignUpDetails {
    pub credentials: Credentials,
    pub display_name: String,
}

/// Session state. The provider calls that drive it live outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub current_user: Option<User>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Reducer for AuthState {
    type Action = AuthAction;

    fn apply(&self, action: AuthAction) -> Option<Self> {
        match action {
            AuthAction::EmailSignInStart(_)
            | AuthAction::GoogleSignInStart
            | AuthAction::AnonymousSignInStart
            | AuthAction::SignUpStart(_) => Some(Self {
                loading: true,
                ..self.clone()
            }),
            AuthAction::SignInSuccess(user) => Some(Self {
                current_user: Some(user),
                error: None,
                loading: false,
            }),
            AuthAction::SignOutSuccess => Some(Self::default()),
            AuthAction::SignInFailure(message)
            | AuthAction::SignUpFailure(message)
            | AuthAction::SignOutFailure(message) => Some(Self {
                error: Some(message),
                loading: false,
                ..self.clone()
            }),
            // Only the outcome of these requests changes state.
            AuthAction::CheckSession | AuthAction::SignOutStart | AuthAction::SignUpSuccess { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            uid: "u-1".to_string(),
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            photo_url: None,
            is_anonymous: false,
        }
    }

    #[test]
    fn test_sign_in_flow() {
        let state = AuthState::default()
            .apply(AuthAction::EmailSignInStart(Credentials {
                email: "ada@example.com".to_string(),
                password: SecretString::from("hunter2".to_string()),
            }))
            .unwrap();
        assert!(state.loading);

        let state = state.apply(AuthAction::SignInSuccess(user())).unwrap();
        assert_eq!(state.current_user, Some(user()));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_failure_keeps_user_and_records_error() {
        let signed_in = AuthState {
            current_user: Some(user()),
            ..AuthState::default()
        };
        let state = signed_in
            .apply(AuthAction::SignOutFailure("network down".to_string()))
            .unwrap();
        assert_eq!(state.current_user, Some(user()));
        assert_eq!(state.error.as_deref(), Some("network down"));
    }

    #[test]
    fn test_sign_out_success_clears_session() {
        let signed_in = AuthState {
            current_user: Some(user()),
            error: Some("old".to_string()),
            loading: true,
        };
        assert_eq!(
            signed_in.apply(AuthAction::SignOutSuccess).unwrap(),
            AuthState::default()
        );
    }

    #[test]
    fn test_request_only_actions_are_noops() {
        let state = AuthState::default();
        assert!(state.apply(AuthAction::CheckSession).is_none());
        assert!(state.apply(AuthAction::SignOutStart).is_none());
        assert!(state
            .apply(AuthAction::SignUpSuccess {
                user: user(),
                display_name: Some("Ada".to_string()),
            })
            .is_none());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            email: "ada@example.com".to_string(),
            password: SecretString::from("hunter2".to_string()),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
