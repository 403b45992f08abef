use std::{fs::File, io::Write, path::Path, sync::Arc};

use aws_config::BehaviorVersion;
use aws_sdk_s3::{config::Region, error::DisplayErrorContext};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::{
    fetcher::{scheme::Scheme, strategy::Strategy},
    models::request::Credentials,
    utils::errors::{BoxError, FetchError, FetchResult, ResultTrait as _, ResultWithError},
};

/// Region a bucket lives in when GetBucketLocation reports no constraint.
pub const UNCONSTRAINED_REGION: &str = "us-east-1";

/// The two object store calls the S3 strategy needs.
pub trait ObjectStoreApi: Send + Sync {
    /// Resolves the region `bucket` lives in.
    fn bucket_region(&self, bucket: &str) -> ResultWithError<String>;

    /// Streams the object body into `writer` using a client scoped to `region`.
    /// Returns the number of bytes written.
    fn get_object(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
        writer: &mut dyn Write,
    ) -> ResultWithError<u64>;
}

/// `ObjectStoreApi` backed by the AWS SDK, using the ambient credential chain.
/// Each call drives its own runtime so callers stay blocking.
#[derive(Debug, Clone)]
pub struct AwsObjectStore {
    default_region: String,
}

impl AwsObjectStore {
    pub fn new(default_region: impl Into<String>) -> Self {
        Self {
            default_region: default_region.into(),
        }
    }

    async fn client(region: &str) -> aws_sdk_s3::Client {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;
        aws_sdk_s3::Client::new(&config)
    }

    /// Maps a location constraint to a region name. No constraint means `us-east-1`,
    /// the legacy `EU` constraint means `eu-west-1`.
    pub fn region_from_constraint(constraint: Option<&str>) -> String {
        match constraint.map(str::trim) {
            None | Some("") => UNCONSTRAINED_REGION.to_owned(),
            Some("EU") => "eu-west-1".to_owned(),
            Some(region) => region.to_owned(),
        }
    }
}

impl Default for AwsObjectStore {
    fn default() -> Self {
        Self::new(UNCONSTRAINED_REGION)
    }
}

impl ObjectStoreApi for AwsObjectStore {
    fn bucket_region(&self, bucket: &str) -> ResultWithError<String> {
        let rt = Runtime::new().auto_err("Failed to create runtime")?;

        rt.block_on(async {
            let s3 = Self::client(&self.default_region).await;
            let output = s3
                .get_bucket_location()
                .bucket(bucket)
                .send()
                .await
                .map_err(|e| {
                    format!(
                        "Failed to locate bucket {}: {}",
                        bucket,
                        DisplayErrorContext(&e)
                    )
                })?;

            let constraint = output.location_constraint().map(|c| c.as_str());
            Ok::<_, BoxError>(Self::region_from_constraint(constraint))
        })
    }

    fn get_object(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
        writer: &mut dyn Write,
    ) -> ResultWithError<u64> {
        let rt = Runtime::new().auto_err("Failed to create runtime")?;

        rt.block_on(async {
            let s3 = Self::client(region).await;
            let mut output = s3
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| {
                    format!(
                        "Failed to get s3://{}/{}: {}",
                        bucket,
                        key,
                        DisplayErrorContext(&e)
                    )
                })?;

            let mut written = 0u64;
            while let Some(chunk) = output
                .body
                .try_next()
                .await
                .map_err(|e| format!("Failed to read s3://{}/{}: {}", bucket, key, e))?
            {
                writer.write_all(&chunk)?;
                written += chunk.len() as u64;
            }
            writer.flush()?;

            Ok::<_, BoxError>(written)
        })
    }
}

/// Fetches from S3 in two steps: discover the bucket's region, then get the object there.
pub struct S3Provider {
    store: Arc<dyn ObjectStoreApi>,
}

impl S3Provider {
    pub fn new(store: Arc<dyn ObjectStoreApi>) -> Self {
        Self { store }
    }

    /// Splits `s3://bucket/key` into its bucket and key. Both must be non-empty.
    pub fn parse_url(url: &str) -> Option<(&str, &str)> {
        let rest = url
            .strip_prefix("s3://")
            .or_else(|| url.strip_prefix("s3:"))?;
        let (bucket, key) = rest.split_once('/')?;
        let key = key.trim_start_matches('/');

        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some((bucket, key))
    }
}

impl Strategy for S3Provider {
    fn scheme(&self) -> Scheme {
        Scheme::S3
    }

    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        _credentials: Option<&Credentials>,
    ) -> FetchResult<()> {
        let (bucket, key) = Self::parse_url(url)
            .ok_or_else(|| FetchError::download_failed(url, "not an s3://bucket/key location"))?;

        let region = self
            .store
            .bucket_region(bucket)
            .map_err(|e| FetchError::download_failed(url, e))?;
        debug!("Bucket {} is in region {}", bucket, region);

        let mut file = File::create(destination).map_err(|e| FetchError::io(url, e))?;
        let written = self
            .store
            .get_object(&region, bucket, key, &mut file)
            .map_err(|e| FetchError::download_failed(url, e))?;

        info!("Fetched {} bytes from s3://{}/{}", written, bucket, key);
        Ok(())
    }
}
