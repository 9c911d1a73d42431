use tracing::{error, info, warn};

use crate::auth::{
    dto::RegisterRequest,
    error::AuthError,
    password::{hash_password, verify_password},
};
use crate::users::{NewUser, User, UserStore};

/// Field checks that need no store access.
pub(crate) fn validate_registration(form: &RegisterRequest) -> Result<(), AuthError> {
    let required = [
        &form.email,
        &form.username,
        &form.fullname,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|f| f.is_empty()) {
        return Err(AuthError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    Ok(())
}

/// Validates, checks the email is free, hashes and inserts.
///
/// The lookup and the insert are separate queries, so two concurrent
/// registrations of one email can both succeed.
pub async fn register(store: &dyn UserStore, form: RegisterRequest) -> Result<User, AuthError> {
    validate_registration(&form)?;

    if store.find_by_email(&form.email).await?.is_some() {
        warn!(email = %form.email, "email already registered");
        return Err(AuthError::EmailTaken);
    }

    let hash = hash_password(&form.password)?;
    let phone = Some(form.phone).filter(|p| !p.is_empty());

    let user = store
        .create(NewUser {
            role: form.role,
            email: form.email,
            username: form.username,
            password: hash,
            fullname: form.fullname,
            phone,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            e
        })?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
    Ok(user)
}

/// Looks the user up by email and checks the password against the stored hash.
pub async fn authenticate(
    store: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let Some(user) = store.find_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AuthError::UserNotFound);
    };

    if !verify_password(password, &user.password)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AuthError::IncorrectPassword);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(user)
}
