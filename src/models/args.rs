use std::path::PathBuf;

use clap::Parser;

use crate::{
    models::{
        config::Config,
        request::{Credentials, DEFAULT_EXTENSION, FetchRequest},
    },
    utils::errors::{OptionResultTrait as _, ResultWithError},
};

#[derive(Parser, Debug)]
#[command(
    name = "artifetch",
    version,
    about = "Fetch a versioned release artifact into a local file.",
    long_about = r#"
artifetch downloads a versioned artifact such as a release archive and prints
the path of the local file it was written to.

The artifact location is built as:

  {base}/{type}-{version}.{extension}

and the base decides how it is retrieved:
  • http:// or https://  downloaded with curl (basic auth via --user/--password)
  • s3://                fetched through the S3 API from the bucket's own region
  • gs://                copied with gsutil
  • anything else        read as a local path or generic URL

Defaults for the base URL, credentials and tool paths can be kept in an
artifetch.yaml file in the current directory or the user config directory.
"#
)]
pub struct AppArgs {
    /// Artifact type, e.g. "agent"
    pub artifact_type: String,

    /// Artifact version, e.g. "1.2.3"
    #[arg(id = "artifact_version", value_name = "VERSION")]
    pub version: String,

    /// Base location, overrides `base_url` from the config file
    #[arg(short, long)]
    pub base: Option<String>,

    /// Artifact file extension
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// HTTP basic-auth user
    #[arg(short, long)]
    pub user: Option<String>,

    /// HTTP basic-auth password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Path to a config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Move the downloaded file here instead of leaving it in the temp dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log progress at info level
    #[arg(short, long)]
    pub verbose: bool,
}

impl AppArgs {
    /// Builds the request, letting command line values win over the config file.
    pub fn to_request(&self, config: &Config) -> ResultWithError<FetchRequest> {
        let base = self
            .base
            .clone()
            .or_else(|| config.base_url.clone())
            .auto_err("No base URL given, pass --base or set base_url in the config")?;

        let credentials = Credentials::from_parts(
            self.user.clone().or_else(|| config.http_user.clone()),
            self.password
                .clone()
                .or_else(|| config.http_password.clone()),
        );

        Ok(
            FetchRequest::new(base, &self.artifact_type, &self.version)
                .with_extension(&self.extension)
                .with_credentials(credentials),
        )
    }
}
