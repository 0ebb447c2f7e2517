//! Admin session gate.
//!
//! The shared password is a convenience gate, not a security boundary. The store
//! trusts its caller; the UI layer checks the session before every mutation.

use crate::config::Config;
use crate::error::{Result, StoreError};

/// Capabilities of the current caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    admin: bool,
}

impl Session {
    /// Read-only session
    pub fn viewer() -> Self {
        Self { admin: false }
    }

    pub fn admin() -> Self {
        Self { admin: true }
    }

    /// Enter admin mode if `password` matches the configured shared secret
    pub fn login(password: &str, config: &Config) -> Result<Self> {
        if password == config.admin_password {
            log::info!("Admin mode enabled");
            Ok(Self::admin())
        } else {
            Err(StoreError::WrongPassword)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Fail with [`StoreError::Unauthorized`] unless this is an admin session
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.admin {
            Ok(())
        } else {
            Err(StoreError::Unauthorized {
                action: action.to_string(),
            })
        }
    }
}
