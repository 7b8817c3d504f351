//! Object storage upload signing.
//!
//! Issues time-limited S3 upload URLs using AWS Signature Version 4 query
//! string authentication. Signing is local, no request reaches S3 here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::config::{StorageConfig, UPLOAD_ACL, UPLOAD_URL_EXPIRES_SECONDS};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Signed upload returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    /// URL the client PUTs the file to
    pub signed_request: String,
    /// Public URL of the object once uploaded
    pub url: String,
}

/// Upload signer trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UploadSigner: Send + Sync {
    /// Sign a PUT of `file_name` with the given content type.
    fn sign_upload(&self, file_name: &str, file_type: &str) -> AppResult<SignedUpload>;
}

/// One request to presign.
#[derive(Debug, Clone)]
pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub key: &'a str,
    pub expires_in: u64,
    /// Headers the client must send, `host` is always signed
    pub headers: Vec<(&'a str, &'a str)>,
    /// Extra query parameters covered by the signature
    pub query: Vec<(&'a str, &'a str)>,
}

/// S3 presigner backed by static credentials
#[derive(Debug, Clone)]
pub struct S3Presigner {
    storage: StorageConfig,
}

impl S3Presigner {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }

    fn bucket(&self) -> AppResult<&str> {
        self.storage
            .bucket
            .as_deref()
            .ok_or_else(|| AppError::upload("S3_BUCKET is not configured"))
    }

    fn credentials(&self) -> AppResult<(&str, &str)> {
        let access_key_id = self
            .storage
            .access_key_id
            .as_deref()
            .ok_or_else(|| AppError::upload("AWS_ACCESS_KEY_ID is not configured"))?;
        let secret = self
            .storage
            .secret_access_key()
            .ok_or_else(|| AppError::upload("AWS_SECRET_ACCESS_KEY is not configured"))?;
        Ok((access_key_id, secret))
    }

    /// Virtual-hosted style endpoint for the bucket.
    pub fn host(&self) -> AppResult<String> {
        let bucket = self.bucket()?;
        Ok(if self.storage.region == "us-east-1" {
            format!("{}.s3.amazonaws.com", bucket)
        } else {
            format!("{}.s3.{}.amazonaws.com", bucket, self.storage.region)
        })
    }

    /// Public URL of an object, without any signature.
    pub fn object_url(&self, key: &str) -> AppResult<String> {
        Ok(format!(
            "https://{}.s3.amazonaws.com{}",
            self.bucket()?,
            canonical_uri(key)
        ))
    }

    /// Build a presigned URL valid from `now` for `request.expires_in` seconds.
    pub fn presign(&self, request: &PresignRequest<'_>, now: DateTime<Utc>) -> AppResult<String> {
        let (access_key_id, secret) = self.credentials()?;
        let host = self.host()?;
        let region = self.storage.region.as_str();

        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();
        let scope = format!("{}/{}/{}/aws4_request", date_stamp, region, SERVICE);

        let mut headers: Vec<(String, String)> = request
            .headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        headers.push(("host".to_string(), host.clone()));
        headers.sort();

        let signed_headers = headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value))
            .collect();

        let credential = format!("{}/{}", access_key_id, scope);
        let expires = request.expires_in.to_string();
        let mut params: Vec<(String, String)> = vec![
            ("X-Amz-Algorithm", ALGORITHM),
            ("X-Amz-Credential", credential.as_str()),
            ("X-Amz-Date", amz_date.as_str()),
            ("X-Amz-Expires", expires.as_str()),
            ("X-Amz-SignedHeaders", signed_headers.as_str()),
        ]
        .into_iter()
        .chain(request.query.iter().copied())
        .map(|(k, v)| (urlencoding::encode(k).into_owned(), urlencoding::encode(v).into_owned()))
        .collect();
        params.sort();

        let canonical_query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let uri = canonical_uri(request.key);
        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            request.method.to_uppercase(),
            uri,
            canonical_query,
            canonical_headers,
            signed_headers,
            UNSIGNED_PAYLOAD
        );

        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = signing_key(secret, &date_stamp, region)?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        Ok(format!(
            "https://{}{}?{}&X-Amz-Signature={}",
            host, uri, canonical_query, signature
        ))
    }
}

impl UploadSigner for S3Presigner {
    fn sign_upload(&self, file_name: &str, file_type: &str) -> AppResult<SignedUpload> {
        let request = PresignRequest {
            method: "PUT",
            key: file_name,
            expires_in: UPLOAD_URL_EXPIRES_SECONDS,
            headers: vec![("content-type", file_type)],
            query: vec![("x-amz-acl", UPLOAD_ACL)],
        };

        let signed_request = self.presign(&request, Utc::now())?;
        tracing::debug!(key = %file_name, "Signed upload URL issued");

        Ok(SignedUpload {
            signed_request,
            url: self.object_url(file_name)?,
        })
    }
}

/// URI-encode each path segment, keeping the separators.
fn canonical_uri(key: &str) -> String {
    let encoded = key
        .trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", encoded)
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> AppResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::upload(format!("invalid signing key: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn signing_key(secret: &str, date_stamp: &str, region: &str) -> AppResult<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}
