//!
//! vitrine account service
//! -----------------------
//! Orchestrates signup, login, profile updates and password changes over
//! the record store, the credential codec and the session state machine.
//! Validation runs entirely before the first write, so a rejected operation
//! never leaves a partial mutation behind. The rendering layer drives this
//! service from form submits and reads `session()` for the auth gate.

use std::sync::Arc;
use tracing::debug;

use crate::codec;
use crate::error::{LoginError, PasswordError, ProfileError, SignupError};
use crate::session::Session;
use crate::store::{StorageBackend, UserRecord, UserStore};
use crate::validate;

/// Registration stops once this many records exist.
pub const MAX_USERS: usize = 5;

/// Registration form payload, pre-normalization.
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile edit payload; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

pub struct AccountService {
    store: UserStore,
    session: Session,
}

impl AccountService {
    /// Build the service over a backend, restoring any persisted session.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: UserStore::new(backend.clone()),
            session: Session::restore(backend),
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access for the logout/set_auth transitions the
    /// rendering layer drives directly.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Register a new user. On success the record is appended to the store
    /// and returned; the session is NOT touched (the storefront redirects
    /// to login after signup).
    pub fn signup(&mut self, input: &SignupInput) -> Result<UserRecord, SignupError> {
        let errors = validate_signup(input);
        if !errors.is_empty() {
            return Err(SignupError::Invalid(errors));
        }

        let users = self.store.list();
        if users.len() >= MAX_USERS {
            return Err(SignupError::CapacityExceeded);
        }
        let email = input.email.trim().to_lowercase();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(SignupError::DuplicateEmail);
        }

        let record = UserRecord {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email,
            mobile: input.mobile.trim().to_string(),
            password: codec::encode(input.password.trim()),
        };
        self.store.append(record.clone())?;
        debug!("account.signup email={}", record.email);
        Ok(record)
    }

    /// Authenticate against the stored collection. The email is normalized
    /// the same way signup normalized it, so lookups are effectively
    /// case-insensitive. Failures leave session state untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserRecord, LoginError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.store.list().into_iter().find(|u| u.email == email) else {
            return Err(LoginError::EmailNotFound);
        };
        if codec::decode(&user.password).as_deref() != Some(password) {
            return Err(LoginError::IncorrectPassword);
        }
        self.session.login(user.clone())?;
        debug!("account.login email={}", user.email);
        Ok(user)
    }

    /// Merge the supplied fields onto the authenticated record, re-key the
    /// store entry by the old email and propagate the result to the session
    /// copy.
    pub fn update_profile(&mut self, changes: &ProfileChanges) -> Result<UserRecord, ProfileError> {
        let Some(current) = self.session.current().cloned() else {
            return Err(ProfileError::NotAuthenticated);
        };

        let mut updated = current.clone();
        if let Some(v) = &changes.first_name {
            updated.first_name = v.trim().to_string();
        }
        if let Some(v) = &changes.last_name {
            updated.last_name = v.trim().to_string();
        }
        if let Some(v) = &changes.email {
            updated.email = v.trim().to_lowercase();
        }
        if let Some(v) = &changes.mobile {
            updated.mobile = v.trim().to_string();
        }

        let mut errors = Vec::new();
        if changes.first_name.is_some() {
            errors.extend(validate::check_name("firstName", "First name", &updated.first_name));
        }
        if changes.last_name.is_some() {
            errors.extend(validate::check_name("lastName", "Last name", &updated.last_name));
        }
        if changes.email.is_some() {
            errors.extend(validate::check_email(&updated.email));
        }
        if changes.mobile.is_some() {
            errors.extend(validate::check_mobile(&updated.mobile));
        }
        if !errors.is_empty() {
            return Err(ProfileError::Invalid(errors));
        }

        // Conflict only when the email actually moves onto another record.
        if !updated.email.eq_ignore_ascii_case(&current.email)
            && self
                .store
                .list()
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&updated.email))
        {
            return Err(ProfileError::EmailInUse);
        }

        if !self.store.replace(&current.email, updated.clone())? {
            return Err(ProfileError::Storage(anyhow::anyhow!(
                "record for {} missing from store",
                current.email
            )));
        }
        self.session.refresh(updated.clone())?;
        debug!("account.update_profile email={}", updated.email);
        Ok(updated)
    }

    /// Rotate the authenticated user's password. The stored record and the
    /// persisted session copy both receive the re-encoded password.
    pub fn change_password(
        &mut self,
        current: &str,
        next: &str,
        confirm: &str,
    ) -> Result<(), PasswordError> {
        let Some(user) = self.session.current().cloned() else {
            return Err(PasswordError::NotAuthenticated);
        };
        if codec::decode(&user.password).as_deref() != Some(current) {
            return Err(PasswordError::IncorrectCurrentPassword);
        }
        if next != confirm {
            return Err(PasswordError::Mismatch);
        }
        if let Some(err) = validate::check_password(next) {
            return Err(PasswordError::Invalid(err));
        }

        let mut updated = user.clone();
        updated.password = codec::encode(next);
        self.store.replace(&user.email, updated.clone())?;
        self.session.refresh(updated)?;
        debug!("account.change_password email={}", user.email);
        Ok(())
    }
}

fn validate_signup(input: &SignupInput) -> Vec<validate::FieldError> {
    let mut errors = Vec::new();
    errors.extend(validate::check_name("firstName", "First name", input.first_name.trim()));
    errors.extend(validate::check_name("lastName", "Last name", input.last_name.trim()));
    errors.extend(validate::check_email(input.email.trim()));
    errors.extend(validate::check_mobile(input.mobile.trim()));
    errors.extend(validate::check_password(&input.password));
    errors.extend(validate::check_confirm(&input.password, &input.confirm_password));
    errors
}
