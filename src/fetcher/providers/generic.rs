use std::{
    fs::File,
    io::{self, Read, Write as _},
    path::Path,
    sync::Arc,
};

use reqwest::blocking::Client;
use tracing::debug;

use crate::{
    fetcher::{scheme::Scheme, strategy::Strategy},
    models::request::Credentials,
    utils::errors::{FetchError, FetchResult},
};

/// Opens a location as a readable byte stream.
pub trait StreamOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<Box<dyn Read>>;
}

/// Local paths and `file://` URLs are read from disk, any other `scheme://` URL goes
/// through the HTTP client. Response status is not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlStreamOpener;

impl StreamOpener for UrlStreamOpener {
    fn open(&self, url: &str) -> io::Result<Box<dyn Read>> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(Box::new(File::open(path)?));
        }

        if !url.contains("://") {
            return Ok(Box::new(File::open(url)?));
        }

        let client = Client::builder().build().map_err(io::Error::other)?;
        let resp = client.get(url).send().map_err(io::Error::other)?;
        debug!("{} answered with status {}", url, resp.status());
        Ok(Box::new(resp))
    }
}

/// Fallback for bases with no dedicated scheme: copy the stream into the destination.
pub struct GenericProvider {
    opener: Arc<dyn StreamOpener>,
}

impl GenericProvider {
    pub fn new(opener: Arc<dyn StreamOpener>) -> Self {
        Self { opener }
    }
}

impl Strategy for GenericProvider {
    fn scheme(&self) -> Scheme {
        Scheme::Generic
    }

    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        _credentials: Option<&Credentials>,
    ) -> FetchResult<()> {
        let mut reader = self.opener.open(url).map_err(|e| FetchError::io(url, e))?;

        // File::create truncates, a shorter artifact never keeps a previous tail
        let mut file = File::create(destination).map_err(|e| FetchError::io(url, e))?;
        let copied = io::copy(&mut reader, &mut file).map_err(|e| FetchError::io(url, e))?;
        file.flush().map_err(|e| FetchError::io(url, e))?;

        debug!("Copied {} bytes from {}", copied, url);
        Ok(())
    }
}
