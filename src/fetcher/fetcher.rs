use std::{fs, path::PathBuf, sync::Arc};

use scopeguard::ScopeGuard;
use tracing::{debug, info};

use crate::{
    fetcher::{
        providers::{
            generic::{GenericProvider, StreamOpener, UrlStreamOpener},
            gs::GsProvider,
            http::HttpProvider,
            s3::{AwsObjectStore, ObjectStoreApi, S3Provider},
        },
        scheme::Scheme,
        strategy::Strategy,
    },
    models::{
        config::Config,
        request::{Credentials, DEFAULT_EXTENSION, FetchRequest},
    },
    utils::{
        command::{CommandRunner, SystemCommandRunner},
        errors::{FetchError, FetchResult},
        temp::{ScopedTempFiles, TempFileProvider},
    },
};

/// Retrieves artifacts relative to a base location and hands back local file paths.
///
/// Each fetch is a single blocking pass: build the artifact URL, allocate a fresh
/// destination, classify the base and run the matching strategy. A failed fetch
/// removes whatever was written to its destination.
pub struct Fetcher {
    base_url: String,
    credentials: Option<Credentials>,
    temp: Arc<dyn TempFileProvider>,
    temp_prefix: String,
    runner: Arc<dyn CommandRunner>,
    object_store: Arc<dyn ObjectStoreApi>,
    opener: Arc<dyn StreamOpener>,
    curl_bin: String,
    gsutil_bin: String,
}

impl Fetcher {
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            temp: Arc::new(ScopedTempFiles::new()),
            temp_prefix: "artifetch-download".to_owned(),
            runner: Arc::new(SystemCommandRunner),
            object_store: Arc::new(AwsObjectStore::default()),
            opener: Arc::new(UrlStreamOpener),
            curl_bin: "curl".to_owned(),
            gsutil_bin: "gsutil".to_owned(),
        }
    }

    /// Builds a fetcher from config values. `base_url` may be empty when only
    /// [`Fetcher::fetch_request`] is used.
    pub fn from_config(config: &Config) -> Self {
        let credentials =
            Credentials::from_parts(config.http_user.clone(), config.http_password.clone());
        let temp = match &config.temp_dir {
            Some(dir) => ScopedTempFiles::in_dir(dir),
            None => ScopedTempFiles::new(),
        };

        Self::new(config.base_url.clone().unwrap_or_default(), credentials)
            .with_temp_provider(Arc::new(temp))
            .with_temp_prefix(&config.temp_prefix)
            .with_object_store(Arc::new(AwsObjectStore::new(&config.s3_default_region)))
            .with_curl_bin(&config.curl_bin)
            .with_gsutil_bin(&config.gsutil_bin)
    }

    pub fn with_temp_provider(mut self, temp: Arc<dyn TempFileProvider>) -> Self {
        self.temp = temp;
        self
    }

    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    pub fn with_command_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_object_store(mut self, store: Arc<dyn ObjectStoreApi>) -> Self {
        self.object_store = store;
        self
    }

    pub fn with_stream_opener(mut self, opener: Arc<dyn StreamOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_curl_bin(mut self, curl_bin: impl Into<String>) -> Self {
        self.curl_bin = curl_bin.into();
        self
    }

    pub fn with_gsutil_bin(mut self, gsutil_bin: impl Into<String>) -> Self {
        self.gsutil_bin = gsutil_bin.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `{base}/{artifact_type}-{version}.{extension}` using this fetcher's base
    /// and credentials. `extension` defaults to `tar.gz`.
    pub fn fetch(
        &self,
        artifact_type: &str,
        version: &str,
        extension: Option<&str>,
    ) -> FetchResult<PathBuf> {
        let request = FetchRequest::new(&self.base_url, artifact_type, version)
            .with_extension(extension.unwrap_or(DEFAULT_EXTENSION))
            .with_credentials(self.credentials.clone());
        self.fetch_request(&request)
    }

    pub fn fetch_request(&self, request: &FetchRequest) -> FetchResult<PathBuf> {
        let url = request.url();
        let destination = self
            .temp
            .allocate(&self.temp_prefix)
            .map_err(|e| FetchError::io(&url, e))?;
        info!("Fetching {} into {}", url, destination.display());

        let scheme = Scheme::classify(&request.base_location);
        let credentials = match scheme {
            Scheme::Http => request.credentials.as_ref(),
            _ => None,
        };
        debug!("Using {} strategy for {}", scheme, url);

        let destination = scopeguard::guard(destination, |path| {
            if let Err(err) = fs::remove_file(&path) {
                debug!("Could not remove {}: {}", path.display(), err);
            }
        });

        self.strategy(scheme)
            .fetch(&url, destination.as_path(), credentials)?;

        Ok(ScopeGuard::into_inner(destination))
    }

    fn strategy(&self, scheme: Scheme) -> Box<dyn Strategy> {
        match scheme {
            Scheme::Http => Box::new(
                HttpProvider::new(self.runner.clone()).with_binary(&self.curl_bin),
            ),
            Scheme::S3 => Box::new(S3Provider::new(self.object_store.clone())),
            Scheme::Gs => Box::new(
                GsProvider::new(self.runner.clone()).with_binary(&self.gsutil_bin),
            ),
            Scheme::Generic => Box::new(GenericProvider::new(self.opener.clone())),
        }
    }
}

/// Convenience wrapper: fetch with default collaborators.
pub fn fetch(request: &FetchRequest) -> FetchResult<PathBuf> {
    Fetcher::new(&request.base_location, None).fetch_request(request)
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("temp_prefix", &self.temp_prefix)
            .field("curl_bin", &self.curl_bin)
            .field("gsutil_bin", &self.gsutil_bin)
            .finish_non_exhaustive()
    }
}
