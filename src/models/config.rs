use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::utils::{
    dir::DirUtils,
    errors::{ResultTrait, ResultWithError},
    variables::VariablesUtils,
};

pub const CONFIG_FILE_NAME: &str = "artifetch.yaml";

fn default_temp_prefix() -> String {
    "artifetch-download".to_owned()
}

fn default_curl_bin() -> String {
    "curl".to_owned()
}

fn default_gsutil_bin() -> String {
    "gsutil".to_owned()
}

fn default_s3_region() -> String {
    "us-east-1".to_owned()
}

/// Fetcher configuration, read from `artifetch.yaml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base location artifacts are resolved against, e.g. `https://cdn.example.com/releases`
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub http_user: Option<String>,
    /// Can use environment variable syntax like ${ARTIFETCH_PASSWORD}
    #[serde(default)]
    pub http_password: Option<String>,
    /// Directory downloads are written to, defaults to the system temp dir
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
    #[serde(default = "default_curl_bin")]
    pub curl_bin: String,
    #[serde(default = "default_gsutil_bin")]
    pub gsutil_bin: String,
    /// Region used for the bucket location lookup
    #[serde(default = "default_s3_region")]
    pub s3_default_region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            http_user: None,
            http_password: None,
            temp_dir: None,
            temp_prefix: default_temp_prefix(),
            curl_bin: default_curl_bin(),
            gsutil_bin: default_gsutil_bin(),
            s3_default_region: default_s3_region(),
        }
    }
}

impl Config {
    /// Loads the config from `path` when given (it must exist), otherwise from the first
    /// of `./artifetch.yaml` and `<config dir>/artifetch/artifetch.yaml` that exists.
    /// Falls back to defaults when no file is found.
    pub fn load(path: Option<&Path>) -> ResultWithError<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        for candidate in Self::default_paths()? {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> ResultWithError<Self> {
        debug!("Loading config from {:?}", path);
        let content = fs::read_to_string(path)
            .auto_err(&format!("Could not read config file {:?}", path))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ResultWithError<Self> {
        let expanded = VariablesUtils::expand_env_vars(content)?;
        if expanded.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&expanded).auto_err("Invalid config format")?;
        debug!("Config deserialized");
        Ok(config)
    }

    fn default_paths() -> ResultWithError<Vec<PathBuf>> {
        let mut paths = vec![DirUtils::curr_dir()?.join(CONFIG_FILE_NAME)];
        if let Some(dir) = DirUtils::config_dir() {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }
        Ok(paths)
    }
}
