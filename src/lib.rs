//! Fetch versioned release artifacts into local files.
//!
//! An artifact lives at `{base}/{type}-{version}.{extension}`. The base decides the
//! retrieval strategy: `http:`/`https:` bases are downloaded with curl, `s3:` bases
//! through the S3 API from the bucket's own region, `gs:` bases with gsutil, and
//! anything else is read as a plain byte stream.
//!
//! ```no_run
//! use artifetch::{Credentials, Fetcher};
//!
//! let fetcher = Fetcher::new(
//!     "https://cdn.example.com/releases",
//!     Some(Credentials::new("deploy", "secret")),
//! );
//! let path = fetcher.fetch("agent", "1.2.3", None)?;
//! println!("{}", path.display());
//! # Ok::<(), artifetch::FetchError>(())
//! ```

pub mod fetcher;
pub mod models;
pub mod utils;

#[cfg(test)]
mod test_helpers;

pub use fetcher::{
    fetcher::{Fetcher, fetch},
    scheme::Scheme,
    strategy::Strategy,
    url::build_url,
};
pub use models::{
    config::Config,
    request::{Credentials, DEFAULT_EXTENSION, FetchRequest},
};
pub use utils::errors::{FetchError, FetchErrorKind, FetchResult};
