//! File storage module
//!
//! Priority: a MinIO deployment, then any S3-compatible endpoint, then the
//! local filesystem. Exactly one provider is ever bound.

use super::utils::{insert_present, into_options, required, string_or};
use super::{
    Activation, Capability, CapabilitySlot, Cardinality, ModuleLayout, OptionsMap, ProviderRule,
};
use crate::base::network_url;
use crate::env_keys::{
    MINIO_ACCESS_KEY, MINIO_BUCKET, MINIO_ENDPOINT, MINIO_SECRET_KEY, S3_ACCESS_KEY_ID, S3_BUCKET,
    S3_ENDPOINT, S3_FILE_URL, S3_REGION, S3_SECRET_ACCESS_KEY,
};
use crate::snapshot::EnvironmentSnapshot;
use serde_json::{json, Value};

/// Directory the local provider writes uploads to
pub const LOCAL_UPLOAD_DIR: &str = "static";

/// Bucket used by the MinIO provider when none is configured
pub const DEFAULT_MINIO_BUCKET: &str = "medusa-media";

pub const MINIO: ProviderRule = ProviderRule {
    capability: Capability::Storage,
    provider_id: "minio",
    resolve: "./src/modules/minio-file",
    activation: Activation::RequiresAll(&[MINIO_ENDPOINT, MINIO_ACCESS_KEY, MINIO_SECRET_KEY]),
    build_options: minio_options,
    is_default: false,
};

pub const S3: ProviderRule = ProviderRule {
    capability: Capability::Storage,
    provider_id: "s3",
    resolve: "@medusajs/medusa/file-s3",
    activation: Activation::RequiresAll(&[S3_ENDPOINT, S3_ACCESS_KEY_ID, S3_SECRET_ACCESS_KEY]),
    build_options: s3_options,
    is_default: false,
};

pub const LOCAL: ProviderRule = ProviderRule {
    capability: Capability::Storage,
    provider_id: "local",
    resolve: "@medusajs/medusa/file-local",
    activation: Activation::Fallback,
    build_options: local_options,
    is_default: false,
};

pub const SLOT: CapabilitySlot = CapabilitySlot {
    capability: Capability::Storage,
    cardinality: Cardinality::AtMostOne,
    module: "@medusajs/medusa/file",
    layout: ModuleLayout::ProviderList,
    rules: &[MINIO, S3, LOCAL],
};

fn minio_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    into_options(json!({
        "endPoint": required(snapshot, MINIO_ENDPOINT),
        "accessKey": required(snapshot, MINIO_ACCESS_KEY),
        "secretKey": required(snapshot, MINIO_SECRET_KEY),
        "bucket": string_or(snapshot.get(MINIO_BUCKET), DEFAULT_MINIO_BUCKET),
    }))
}

fn s3_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    let mut options = OptionsMap::new();
    insert_present(&mut options, "file_url", snapshot, S3_FILE_URL);
    options.insert("access_key_id".to_string(), required(snapshot, S3_ACCESS_KEY_ID));
    options.insert(
        "secret_access_key".to_string(),
        required(snapshot, S3_SECRET_ACCESS_KEY),
    );
    insert_present(&mut options, "region", snapshot, S3_REGION);
    insert_present(&mut options, "bucket", snapshot, S3_BUCKET);
    options.insert("endpoint".to_string(), required(snapshot, S3_ENDPOINT));
    options.insert(
        "additional_client_config".to_string(),
        json!({ "forcePathStyle": true }),
    );
    options
}

fn local_options(snapshot: &EnvironmentSnapshot) -> OptionsMap {
    let mut options = OptionsMap::new();
    options.insert(
        "upload_dir".to_string(),
        Value::String(LOCAL_UPLOAD_DIR.to_string()),
    );
    options.insert(
        "backend_url".to_string(),
        Value::String(format!("{}/{}", network_url(snapshot), LOCAL_UPLOAD_DIR)),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minio_snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot::from_pairs([
            (MINIO_ENDPOINT, "minio.internal"),
            (MINIO_ACCESS_KEY, "minio-access"),
            (MINIO_SECRET_KEY, "minio-secret"),
        ])
    }

    #[test]
    fn test_minio_default_bucket() {
        let options = MINIO.options(&minio_snapshot());
        assert_eq!(options["endPoint"], json!("minio.internal"));
        assert_eq!(options["bucket"], json!(DEFAULT_MINIO_BUCKET));
    }

    #[test]
    fn test_minio_requires_all_three() {
        let partial = EnvironmentSnapshot::from_pairs([
            (MINIO_ENDPOINT, "minio.internal"),
            (MINIO_ACCESS_KEY, "minio-access"),
        ]);
        assert!(!MINIO.is_active(&partial));
        assert!(MINIO.is_active(&minio_snapshot()));
    }

    #[test]
    fn test_s3_optional_fields_omitted() {
        let snapshot = EnvironmentSnapshot::from_pairs([
            (S3_ENDPOINT, "https://s3.example.com"),
            (S3_ACCESS_KEY_ID, "AKIA"),
            (S3_SECRET_ACCESS_KEY, "secret"),
        ]);
        let options = S3.options(&snapshot);
        assert!(!options.contains_key("region"));
        assert!(!options.contains_key("bucket"));
        assert!(!options.contains_key("file_url"));
        assert_eq!(
            options["additional_client_config"],
            json!({ "forcePathStyle": true })
        );
    }

    #[test]
    fn test_s3_optional_fields_included() {
        let snapshot = EnvironmentSnapshot::from_pairs([
            (S3_ENDPOINT, "https://s3.example.com"),
            (S3_ACCESS_KEY_ID, "AKIA"),
            (S3_SECRET_ACCESS_KEY, "secret"),
            (S3_REGION, "eu-west-1"),
            (S3_BUCKET, "media"),
            (S3_FILE_URL, "https://cdn.example.com"),
        ]);
        let options = S3.options(&snapshot);
        assert_eq!(options["region"], json!("eu-west-1"));
        assert_eq!(options["bucket"], json!("media"));
        assert_eq!(options["file_url"], json!("https://cdn.example.com"));
    }

    #[test]
    fn test_local_uses_backend_url() {
        let snapshot =
            EnvironmentSnapshot::from_pairs([(crate::env_keys::BACKEND_URL, "https://api.shop")]);
        let options = LOCAL.options(&snapshot);
        assert_eq!(options["upload_dir"], json!("static"));
        assert_eq!(options["backend_url"], json!("https://api.shop/static"));
    }
}
