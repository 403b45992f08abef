use std::fmt::Debug;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type EmptyResult = Result<(), BoxError>;
pub type ResultWithError<T> = Result<T, BoxError>;
pub type FetchResult<T> = Result<T, FetchError>;

/// Broad category of a failed fetch, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The download command or object store call failed.
    DownloadFailed,
    /// The HTTP transfer finished but did not report a `200` status.
    HttpNonOk,
    /// Reading the source stream or writing the destination failed.
    IoError,
}

/// Error returned by a fetch. Every variant carries the full artifact URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to download archive {url}: {message}")]
    DownloadFailed {
        url: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
    #[error("Failed to download archive {url}: {status}")]
    HttpNonOk { url: String, status: String },
    #[error("Failed to fetch archive {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn download_failed(url: &str, err: impl Into<BoxError>) -> Self {
        let source = err.into();
        FetchError::DownloadFailed {
            url: url.to_owned(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn http_non_ok(url: &str, status: &str) -> Self {
        FetchError::HttpNonOk {
            url: url.to_owned(),
            status: status.to_owned(),
        }
    }

    pub fn io(url: &str, source: std::io::Error) -> Self {
        FetchError::Io {
            url: url.to_owned(),
            source,
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::DownloadFailed { .. } => FetchErrorKind::DownloadFailed,
            FetchError::HttpNonOk { .. } => FetchErrorKind::HttpNonOk,
            FetchError::Io { .. } => FetchErrorKind::IoError,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::DownloadFailed { url, .. }
            | FetchError::HttpNonOk { url, .. }
            | FetchError::Io { url, .. } => url,
        }
    }
}

pub trait ResultTrait<T, E> {
    fn auto_err(self, desc: &str) -> ResultWithError<T>;
}

impl<T, E> ResultTrait<T, E> for Result<T, E>
where
    E: Debug,
{
    fn auto_err(self, desc: &str) -> ResultWithError<T> {
        self.map_err(|e| format!("{desc}: {e:?}").into())
    }
}

pub trait OptionResultTrait<T> {
    fn auto_err(self, desc: &str) -> ResultWithError<T>;
}

impl<T> OptionResultTrait<T> for Option<T> {
    fn auto_err(self, desc: &str) -> ResultWithError<T> {
        self.ok_or_else(|| format!("{desc}: None Option").into())
    }
}
