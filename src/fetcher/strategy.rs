use std::path::Path;

use crate::{
    fetcher::scheme::Scheme,
    models::request::Credentials,
    utils::errors::FetchResult,
};

/// Retrieval procedure for one scheme. On success `destination` holds the artifact bytes;
/// on failure its contents are undefined.
pub trait Strategy: Send + Sync {
    fn scheme(&self) -> Scheme;
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credentials: Option<&Credentials>,
    ) -> FetchResult<()>;
}
