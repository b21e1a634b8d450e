use async_trait::async_trait;

use crate::{
    domain::{FileRef, Item, LinkOutcome, StoredObject, Submission, UserId},
    Result,
};

/// Hexagonal port for platform file retrieval.
///
/// Resolves a platform file reference to a downloadable location and
/// fetches the raw bytes in one shot. No disk writes, no retries.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, file_ref: &FileRef) -> Result<Vec<u8>>;
}

/// Hexagonal port for the object store.
///
/// Each call uploads under a fresh key and issues a time-bounded signed
/// URL for it. Not idempotent: retrying a successful call leaks an orphan
/// object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn store(&self, data: Vec<u8>, file_name: &str, mime_type: &str)
        -> Result<StoredObject>;
}

/// Hexagonal port for the downstream StashIt API.
#[async_trait]
pub trait IngestApi: Send + Sync {
    /// Submit a normalized item. A returned `Ok` means the request reached
    /// the server without a transport error; the response body is carried
    /// along untouched.
    async fn submit(&self, item: &Item) -> Result<Submission>;

    /// Exchange a linking code for an account association. Semantic
    /// failures (bad code) come back as `Ok` with `success: false`.
    async fn link(&self, code: &str, sender: UserId) -> Result<LinkOutcome>;
}
