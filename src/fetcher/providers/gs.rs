use std::{path::Path, sync::Arc};

use tracing::debug;

use crate::{
    fetcher::{scheme::Scheme, strategy::Strategy},
    models::request::Credentials,
    utils::{
        command::{CommandLine, CommandRunner},
        errors::{FetchError, FetchResult},
    },
};

/// Copies from Google Cloud Storage with gsutil. Relies on gsutil's own credentials.
pub struct GsProvider {
    runner: Arc<dyn CommandRunner>,
    gsutil_bin: String,
}

impl GsProvider {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            gsutil_bin: "gsutil".to_owned(),
        }
    }

    pub fn with_binary(mut self, gsutil_bin: impl Into<String>) -> Self {
        self.gsutil_bin = gsutil_bin.into();
        self
    }

    pub fn command(&self, url: &str, destination: &Path) -> CommandLine {
        CommandLine::new(&self.gsutil_bin)
            .args(["cp", url])
            .arg(destination.to_string_lossy())
    }
}

impl Strategy for GsProvider {
    fn scheme(&self) -> Scheme {
        Scheme::Gs
    }

    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        _credentials: Option<&Credentials>,
    ) -> FetchResult<()> {
        let cmd = self.command(url, destination);
        debug!("Running gsutil command: {}", cmd.render());

        self.runner
            .run(&cmd)
            .map_err(|e| FetchError::download_failed(url, e))?;
        Ok(())
    }
}
