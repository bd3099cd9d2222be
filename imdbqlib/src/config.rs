//! Connection settings.
//!
//! Host, port and scheme are fixed; only the credentials and the database
//! name vary. Settings can be built up explicitly or read from the
//! environment.

use std::fmt;

use crate::error::ImdbqError;
use crate::Result;

/// URL scheme of the connection target.
pub const SCHEME: &str = "postgresql";
/// Database host.
pub const HOST: &str = "localhost";
/// Database port.
pub const PORT: u16 = 5432;

/// Environment variable holding the user name.
pub const ENV_USER: &str = "IMDBQ_USER";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "IMDBQ_PASSWORD";
/// Environment variable holding the database name.
pub const ENV_DATABASE: &str = "IMDBQ_DATABASE";

/// User name when none is given.
pub const DEFAULT_USER: &str = "postgres";
/// Database name when none is given.
pub const DEFAULT_DATABASE: &str = "imdb";

/// Credentials and database name for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Role to log in as
    pub user: String,
    /// Password for `user` (may be empty for trust/peer auth)
    pub password: String,
    /// Database to open
    pub database: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Create settings for `database` with the default user and no password.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Read settings from `IMDBQ_USER`, `IMDBQ_PASSWORD` and `IMDBQ_DATABASE`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(user) = lookup(ENV_USER) {
            config.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            config.password = password;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            config.database = database;
        }
        config
    }

    /// Builder: set the user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Builder: set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Builder: set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Connection target without credentials, e.g.
    /// `postgresql://localhost:5432/imdb`.
    pub fn target(&self) -> String {
        format!("{}://{}:{}/{}", SCHEME, HOST, PORT, self.database)
    }

    /// Reject settings that can never connect.
    pub fn validate(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(ImdbqError::InvalidConfig("user must not be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(ImdbqError::InvalidConfig(
                "database name must not be empty".to_string(),
            ));
        }
        if self.database.contains('/') {
            return Err(ImdbqError::InvalidConfig(format!(
                "database name '{}' must not contain '/'",
                self.database
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("ConnectionConfig")
            .field("user", &self.user)
            .field("password", &password)
            .field("database", &self.database)
            .finish()
    }
}
