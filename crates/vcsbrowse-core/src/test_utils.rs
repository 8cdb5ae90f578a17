//! Shared test utilities.
//!
//! This module is only compiled in test builds (`#[cfg(test)]`).

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that touch process environment variables.
///
/// Take the lock before creating any [`EnvVarGuard`] and hold it until the
/// guards are dropped.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard for environment variables in tests.
///
/// Sets an environment variable on creation and restores the original value
/// (or removes the variable) when dropped.
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    /// Set an environment variable, returning a guard that restores it on drop.
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: callers hold `env_lock()`, so no other test thread reads or
        // writes the environment concurrently.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Remove an environment variable, returning a guard that restores it on drop.
    pub fn unset(key: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: see `EnvVarGuard::set`.
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.original {
            // SAFETY: see `EnvVarGuard::set`.
            Some(val) => unsafe { std::env::set_var(&self.key, val) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}
