use std::fmt;

use crate::fetcher::url::build_url;

pub const DEFAULT_EXTENSION: &str = "tar.gz";

/// Basic-auth pair. Only exists when both halves are known.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns `None` unless both a username and a password are given.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) => Some(Self { username, password }),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Everything needed to locate one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub base_location: String,
    pub artifact_type: String,
    pub version: String,
    pub extension: String,
    pub credentials: Option<Credentials>,
}

impl FetchRequest {
    pub fn new(
        base_location: impl Into<String>,
        artifact_type: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            base_location: base_location.into(),
            artifact_type: artifact_type.into(),
            version: version.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
            credentials: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn url(&self) -> String {
        build_url(
            &self.base_location,
            &self.artifact_type,
            &self.version,
            &self.extension,
        )
    }
}
