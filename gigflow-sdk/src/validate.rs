//! Pre-dispatch form validation.
//!
//! Every rule here runs before the network is contacted; a failure surfaces
//! as [`Error::Validation`] with a user-facing message and the dispatch is
//! abandoned without touching slice state.

use crate::error::{Error, Result};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn register(name: &str, email: &str, password: &str, confirm: &str) -> Result<()> {
    if name.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || confirm.is_empty()
    {
        return Err(Error::Validation("Please fill in all fields".into()));
    }
    if password != confirm {
        return Err(Error::Validation("Passwords do not match".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

pub fn login(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation("Please fill in all fields".into()));
    }
    Ok(())
}

pub fn new_gig(title: &str, description: &str, budget: f64) -> Result<()> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(Error::Validation("Please fill in all fields".into()));
    }
    if budget <= 0.0 {
        return Err(Error::Validation("Budget must be greater than 0".into()));
    }
    Ok(())
}

pub fn new_bid(message: &str, price: f64) -> Result<()> {
    if message.trim().is_empty() {
        return Err(Error::Validation("Please fill in all fields".into()));
    }
    if price <= 0.0 {
        return Err(Error::Validation("Price must be greater than 0".into()));
    }
    Ok(())
}
