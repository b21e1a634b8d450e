//! Object storage gateway for attachment payloads.
//!
//! Implements the core `ObjectStore` port over S3-compatible endpoints
//! (MinIO, Spaces, AWS) via the `object_store` crate. Uploads are
//! create-only: an existing key is an error, never a silent overwrite.

use std::time::Duration;

pub mod keys;
mod s3;

pub use s3::{S3Gateway, S3GatewayConfig};

/// Validity window for signed GET URLs: 7 days. Policy constant, not
/// user-configurable.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(604_800);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_url_ttl_is_seven_days() {
        assert_eq!(SIGNED_URL_TTL.as_secs(), 7 * 24 * 60 * 60);
    }
}
