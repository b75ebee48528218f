//! Bucket-based object storage (Supabase Storage API) for the logo asset.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, StoreError, ValidationError};
use crate::gateway::{GatewayError, RestGateway, check};
use crate::validate::validate_image;

pub const LOGO_PATH: &str = "logos/cms-logo.png";
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
const CACHE_CONTROL_SECS: u32 = 3600;

#[derive(Deserialize)]
struct BucketInfo {
    name: String,
}

#[derive(Serialize)]
struct NewBucket<'a> {
    id: &'a str,
    name: &'a str,
    public: bool,
    file_size_limit: usize,
}

#[derive(Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
}

#[derive(Deserialize)]
struct ObjectInfo {
    name: String,
}

#[derive(Debug, Clone)]
pub struct ObjectStorage {
    gateway: RestGateway,
}

impl ObjectStorage {
    pub fn new(gateway: RestGateway) -> Self {
        Self { gateway }
    }

    fn storage_url(&self, rest: &str) -> String {
        format!("{}/storage/v1/{}", self.gateway.base_url(), rest)
    }

    /// Public-read URL of an object; no request is made.
    pub fn file_url(&self, bucket: &str, path: &str) -> String {
        self.storage_url(&format!("object/public/{bucket}/{path}"))
    }

    async fn ensure_bucket(&self, bucket: &str) -> Result<(), GatewayError> {
        let resp = self.gateway.client().get(self.storage_url("bucket")).send().await?;
        let buckets: Vec<BucketInfo> = check(resp)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        if buckets.iter().any(|b| b.name == bucket) {
            return Ok(());
        }

        log::info!("Creating public storage bucket {bucket}");
        let body = NewBucket {
            id: bucket,
            name: bucket,
            public: true,
            file_size_limit: MAX_UPLOAD_BYTES,
        };
        let resp = self
            .gateway
            .client()
            .post(self.storage_url("bucket"))
            .json(&body)
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }

    /// Upload (or replace) an object and return its public URL.
    pub async fn upload_file(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, GatewayError> {
        self.ensure_bucket(bucket).await?;
        let resp = self
            .gateway
            .client()
            .post(self.storage_url(&format!("object/{bucket}/{path}")))
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .header("cache-control", format!("max-age={CACHE_CONTROL_SECS}"))
            .body(bytes)
            .send()
            .await?;
        check(resp).await?;
        Ok(self.file_url(bucket, path))
    }

    /// Whether `path` exists, by listing its parent folder.
    pub async fn file_exists(&self, bucket: &str, path: &str) -> Result<bool, GatewayError> {
        let (folder, name) = path.rsplit_once('/').unwrap_or(("", path));
        let resp = self
            .gateway
            .client()
            .post(self.storage_url(&format!("object/list/{bucket}")))
            .json(&ListRequest { prefix: folder, limit: 100, offset: 0 })
            .send()
            .await?;
        let objects: Vec<ObjectInfo> = check(resp)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(objects.iter().any(|o| o.name == name))
    }
}

/// The single logo asset, when object storage is available.
#[derive(Debug, Clone)]
pub struct LogoStore {
    storage: Option<ObjectStorage>,
    bucket: String,
}

impl LogoStore {
    pub fn new(storage: Option<ObjectStorage>, bucket: &str) -> Self {
        Self {
            storage,
            bucket: bucket.to_string(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, "")
    }

    /// Public URL of the logo if it has been uploaded.
    pub async fn current_url(&self) -> Result<Option<String>, AppError> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        match storage.file_exists(&self.bucket, LOGO_PATH).await {
            Ok(true) => Ok(Some(storage.file_url(&self.bucket, LOGO_PATH))),
            Ok(false) => Ok(None),
            Err(e) => {
                log::error!("Error checking for existing logo: {e}");
                Err(StoreError::from(e).into())
            }
        }
    }

    pub async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, AppError> {
        if let Some(msg) = validate_image(content_type, bytes.len(), MAX_UPLOAD_BYTES) {
            return Err(ValidationError(vec![msg]).into());
        }
        let Some(storage) = &self.storage else {
            return Err(StoreError::Remote("object storage is not configured".to_string()).into());
        };
        storage
            .upload_file(&self.bucket, LOGO_PATH, bytes, content_type)
            .await
            .map_err(|e| {
                log::error!("Error uploading logo: {e}");
                StoreError::from(e).into()
            })
    }
}
