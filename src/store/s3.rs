//! S3 object store
//!
//! Containers are buckets and keys are object keys. The SDK is async, so the
//! store owns a current-thread runtime and blocks on it for every call.

use super::VersionStore;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::types::{ContainerId, ObjectLocation};
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use std::error::Error;
use std::fmt::Debug;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Region in which `CreateBucket` must not carry a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// Object store backed by S3 or an S3-compatible server
#[derive(Debug)]
pub struct S3ObjectStore {
    client: Client,
    region: Option<String>,
    runtime: Runtime,
}

impl S3ObjectStore {
    /// Build a client from the AWS provider chain plus `config` overrides
    ///
    /// No request is sent; an unreachable endpoint only shows up on the
    /// first store call.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let runtime = new_runtime()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = runtime.block_on(loader.load());

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self::with_runtime(builder.build(), runtime))
    }

    /// Build a store from a fully specified SDK configuration
    pub fn from_conf(conf: aws_sdk_s3::Config) -> Result<Self, StoreError> {
        Ok(Self::with_runtime(conf, new_runtime()?))
    }

    fn with_runtime(conf: aws_sdk_s3::Config, runtime: Runtime) -> Self {
        let region = conf.region().map(|region| region.as_ref().to_string());
        S3ObjectStore {
            client: Client::from_conf(conf),
            region,
            runtime,
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if let Some(region) = self.region().filter(|region| *region != DEFAULT_REGION) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        debug!(bucket, region = ?self.region, "creating bucket");
        match self.runtime.block_on(request.send()) {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|e| e.is_bucket_already_owned_by_you()) =>
            {
                Ok(())
            }
            Err(e) => Err(remote_error("create bucket", bucket, e)),
        }
    }
}

fn new_runtime() -> Result<Runtime, StoreError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| StoreError::Unavailable(format!("failed to start async runtime: {}", e)))
}

fn remote_error<E, R>(
    operation: &'static str,
    target: impl Into<String>,
    error: SdkError<E, R>,
) -> StoreError
where
    E: Error + 'static,
    R: Debug,
{
    StoreError::Remote {
        operation,
        target: target.into(),
        message: DisplayErrorContext(error).to_string(),
    }
}

impl VersionStore for S3ObjectStore {
    fn ensure_container(&self, container: &ContainerId) -> Result<(), StoreError> {
        let bucket = container.as_str();
        let head = self.client.head_bucket().bucket(bucket).send();
        match self.runtime.block_on(head) {
            Ok(_) => Ok(()),
            Err(e) if e.as_service_error().is_some_and(|e| e.is_not_found()) => {
                self.create_bucket(bucket)
            }
            Err(e) => Err(remote_error("head bucket", bucket, e)),
        }
    }

    fn exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        let head = self
            .client
            .head_object()
            .bucket(location.container.as_str())
            .key(location.key.as_str())
            .send();
        match self.runtime.block_on(head) {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(e) => Err(remote_error("head object", location.to_string(), e)),
        }
    }

    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        debug!(object = %location, "reading object");
        self.runtime.block_on(async {
            let output = match self
                .client
                .get_object()
                .bucket(location.container.as_str())
                .key(location.key.as_str())
                .send()
                .await
            {
                Ok(output) => output,
                Err(e) if e.as_service_error().is_some_and(|e| e.is_no_such_key()) => {
                    return Err(StoreError::NotFound(location.clone()));
                }
                Err(e) => return Err(remote_error("get object", location.to_string(), e)),
            };

            let body = output
                .body
                .collect()
                .await
                .map_err(|e| StoreError::Remote {
                    operation: "read object body",
                    target: location.to_string(),
                    message: e.to_string(),
                })?;
            Ok(body.into_bytes().to_vec())
        })
    }

    fn put(&self, location: &ObjectLocation, bytes: &[u8]) -> Result<(), StoreError> {
        debug!(object = %location, bytes = bytes.len(), "writing object");
        let put = self
            .client
            .put_object()
            .bucket(location.container.as_str())
            .key(location.key.as_str())
            .content_type("application/json")
            .body(ByteStream::from(bytes.to_vec()))
            .send();
        self.runtime
            .block_on(put)
            .map(|_| ())
            .map_err(|e| remote_error("put object", location.to_string(), e))
    }
}
