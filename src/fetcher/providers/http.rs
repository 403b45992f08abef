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

const OK_STATUS: &str = "200";

/// Downloads over HTTP(S) with curl, then checks the reported status line.
pub struct HttpProvider {
    runner: Arc<dyn CommandRunner>,
    curl_bin: String,
}

impl HttpProvider {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            curl_bin: "curl".to_owned(),
        }
    }

    pub fn with_binary(mut self, curl_bin: impl Into<String>) -> Self {
        self.curl_bin = curl_bin.into();
        self
    }

    /// Dumps headers to stdout, follows redirects, writes the body to `destination`, no progress.
    pub fn command(
        &self,
        url: &str,
        destination: &Path,
        credentials: Option<&Credentials>,
    ) -> CommandLine {
        let cmd = CommandLine::new(&self.curl_bin)
            .args(["-D", "-", "-L", url, "-o"])
            .arg(destination.to_string_lossy())
            .arg("-s");

        match credentials {
            Some(creds) => cmd
                .arg("-u")
                .secret_arg(format!("{}:{}", creds.username, creds.password)),
            None => cmd,
        }
    }

    /// Only a literal `200` in the first output line counts as success.
    fn check_status(url: &str, output: &[String]) -> FetchResult<()> {
        let status = output.first().map(|line| line.trim()).unwrap_or_default();
        let code = status.split_whitespace().nth(1);

        if code != Some(OK_STATUS) {
            return Err(FetchError::http_non_ok(url, status));
        }
        Ok(())
    }
}

impl Strategy for HttpProvider {
    fn scheme(&self) -> Scheme {
        Scheme::Http
    }

    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credentials: Option<&Credentials>,
    ) -> FetchResult<()> {
        let cmd = self.command(url, destination, credentials);
        debug!("Running CURL command: {}", cmd.render());

        let output = self
            .runner
            .run(&cmd)
            .map_err(|e| FetchError::download_failed(url, e))?;

        Self::check_status(url, &output)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        test_helpers::{FakeRunner, scratch_file, value_after},
        utils::errors::FetchErrorKind,
    };

    const URL: &str = "https://cdn.example.com/releases/agent-1.2.3.tar.gz";

    fn provider(runner: &Arc<FakeRunner>) -> HttpProvider {
        HttpProvider::new(runner.clone())
    }

    #[test]
    fn status_200_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 200 OK", "Content-Length: 5"]));

        provider(&runner).fetch(URL, &dest, None).unwrap();

        let cmd = runner.only_call();
        assert_eq!(cmd.program(), "curl");
        assert_eq!(value_after(&cmd, "-o"), Some(dest.to_str().unwrap()));
        assert_eq!(value_after(&cmd, "-D"), Some("-"));
        assert!(cmd.get_args().iter().any(|a| a == "-L"));
        assert!(cmd.get_args().iter().any(|a| a == "-s"));
        assert!(cmd.get_args().iter().any(|a| a == URL));
    }

    #[test]
    fn body_lands_in_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/2 200"]).with_body(b"\x1f\x8b\x00archive"));

        provider(&runner).fetch(URL, &dest, None).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"\x1f\x8b\x00archive");
    }

    #[test]
    fn status_404_is_http_non_ok() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 404 Not Found"]));

        let err = provider(&runner).fetch(URL, &dest, None).unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::HttpNonOk);
        let msg = err.to_string();
        assert!(msg.contains(URL));
        assert!(msg.contains("404"));
    }

    #[test]
    fn unresolved_redirect_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 302 Found", "HTTP/1.1 200 OK"]));

        let err = provider(&runner).fetch(URL, &dest, None).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::HttpNonOk);
        assert!(err.to_string().contains("302"));
    }

    #[test]
    fn empty_output_is_http_non_ok() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&[]));

        let err = provider(&runner).fetch(URL, &dest, None).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::HttpNonOk);
    }

    #[test]
    fn runner_failure_is_download_failed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::failing(6, "Could not resolve host"));

        let err = provider(&runner).fetch(URL, &dest, None).unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::DownloadFailed);
        let msg = err.to_string();
        assert!(msg.starts_with(&format!("Failed to download archive {URL}: ")));
        assert!(msg.contains("Could not resolve host"));
    }

    #[test]
    fn credentials_are_passed_when_complete() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 200 OK"]));
        let creds = Credentials::new("deploy", "s3cret");

        provider(&runner).fetch(URL, &dest, Some(&creds)).unwrap();

        let cmd = runner.only_call();
        assert_eq!(value_after(&cmd, "-u"), Some("deploy:s3cret"));
        assert!(!cmd.render().contains("s3cret"));
    }

    #[test]
    fn incomplete_credentials_are_not_passed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 200 OK"]));
        let creds = Credentials::from_parts(Some("deploy".into()), None);

        provider(&runner).fetch(URL, &dest, creds.as_ref()).unwrap();

        let cmd = runner.only_call();
        assert!(!cmd.get_args().iter().any(|a| a == "-u"));
        assert!(!cmd.get_args().iter().any(|a| a.contains("deploy")));
    }

    #[test]
    fn custom_binary() {
        let dir = tempfile::tempdir().unwrap();
        let dest = scratch_file(&dir, "dl");
        let runner = Arc::new(FakeRunner::ok(&["HTTP/1.1 200 OK"]));

        HttpProvider::new(runner.clone())
            .with_binary("/opt/curl/bin/curl")
            .fetch(URL, &dest, None)
            .unwrap();

        assert_eq!(runner.only_call().program(), "/opt/curl/bin/curl");
    }
}
