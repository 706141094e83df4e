//! Login, registration and logout

use std::time::Duration;

use super::{Navigation, Route};
use crate::client::{ApiClient, Transport};
use crate::notice::Notice;
use crate::store::{LocalStore, StoreError};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

const LOGIN_FAILED: &str = "Login failed, please check your username and password";
const REGISTER_FAILED: &str = "Registration failed, please try again";

#[derive(Debug, Clone)]
pub struct RegisterForm<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Local checks run before any registration request
pub fn validate_registration(password: &str, confirm_password: &str) -> Result<(), Notice> {
    if password != confirm_password {
        return Err(Notice::error("Passwords do not match"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Notice::error(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub struct AuthPage<'a, T> {
    client: &'a ApiClient<T>,
    store: &'a mut LocalStore,
}

impl<'a, T: Transport> AuthPage<'a, T> {
    pub fn new(client: &'a ApiClient<T>, store: &'a mut LocalStore) -> Self {
        Self { client, store }
    }

    /// Log in and persist the token and user
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Navigation, Notice> {
        let response = self
            .client
            .auth()
            .login(username, password)
            .await
            .map_err(|e| Notice::error(non_empty_or(e.to_string(), LOGIN_FAILED)))?;

        self.store
            .set_login(response.token, response.user)
            .map_err(|e| Notice::error(e.to_string()))?;

        tracing::info!(username = %username, "Logged in");
        Ok(Navigation::now(Route::Dashboard))
    }

    /// Register a new account, then send the user to the login page
    pub async fn register(&mut self, form: &RegisterForm<'_>) -> Result<(Notice, Navigation), Notice> {
        validate_registration(form.password, form.confirm_password)?;

        self.client
            .auth()
            .register(form.username, form.email, form.password)
            .await
            .map_err(|e| Notice::error(non_empty_or(e.to_string(), REGISTER_FAILED)))?;

        Ok((
            Notice::success("Registration successful! Redirecting..."),
            Navigation::after(Route::Login, Duration::from_millis(1500)),
        ))
    }

    /// Log out; the local store is cleared even when the backend call fails
    pub async fn logout(&mut self) -> Result<Navigation, StoreError> {
        if let Err(e) = self.client.auth().logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.store.clear()?;
        Ok(Navigation::now(Route::Index))
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
