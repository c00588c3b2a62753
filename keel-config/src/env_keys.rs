//! Input names read from the deployment environment

// Base settings
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const REDIS_URL: &str = "REDIS_URL";
pub const BACKEND_URL: &str = "BACKEND_URL";
pub const STORE_CORS: &str = "STORE_CORS";
pub const ADMIN_CORS: &str = "ADMIN_CORS";
pub const AUTH_CORS: &str = "AUTH_CORS";
pub const JWT_SECRET: &str = "JWT_SECRET";
pub const COOKIE_SECRET: &str = "COOKIE_SECRET";
pub const DISABLE_ADMIN: &str = "MEDUSA_DISABLE_ADMIN";

// Redis-backed infrastructure modules
pub const CACHE_REDIS_URL: &str = "CACHE_REDIS_URL";
pub const EVENTS_REDIS_URL: &str = "EVENTS_REDIS_URL";
pub const WORKFLOW_REDIS_URL: &str = "WE_REDIS_URL";
pub const LOCKING_REDIS_URL: &str = "LOCKING_REDIS_URL";

// Object storage
pub const MINIO_ENDPOINT: &str = "MINIO_ENDPOINT";
pub const MINIO_ACCESS_KEY: &str = "MINIO_ACCESS_KEY";
pub const MINIO_SECRET_KEY: &str = "MINIO_SECRET_KEY";
pub const MINIO_BUCKET: &str = "MINIO_BUCKET";
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const S3_ACCESS_KEY_ID: &str = "S3_ACCESS_KEY_ID";
pub const S3_SECRET_ACCESS_KEY: &str = "S3_SECRET_ACCESS_KEY";
pub const S3_FILE_URL: &str = "S3_FILE_URL";
pub const S3_REGION: &str = "S3_REGION";
pub const S3_BUCKET: &str = "S3_BUCKET";

// Notification
pub const SENDGRID_API_KEY: &str = "SENDGRID_API_KEY";
pub const SENDGRID_FROM: &str = "SENDGRID_FROM";
pub const RESEND_API_KEY: &str = "RESEND_API_KEY";
pub const RESEND_FROM_EMAIL: &str = "RESEND_FROM_EMAIL";

// Payment
pub const STRIPE_API_KEY: &str = "STRIPE_API_KEY";
pub const STRIPE_WEBHOOK_SECRET: &str = "STRIPE_WEBHOOK_SECRET";

// Search
pub const MEILISEARCH_HOST: &str = "MEILISEARCH_HOST";
pub const MEILISEARCH_API_KEY: &str = "MEILISEARCH_API_KEY";
