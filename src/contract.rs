//! # contract: the publish seam between the chat notifier and the document service
//!
//! [`Publisher`] is implemented by [`crate::publish::MeltClient`] and, under the
//! default `test-export-mocks` feature, by the `mockall`-generated `MockPublisher`
//! so notifier behaviour can be tested without a document service.

use async_trait::async_trait;

use crate::error::MeltError;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Something that stores a document and hands back its public URL.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `body` under `key` (server-assigned when empty) and return the document URL.
    async fn publish(&self, key: &str, body: Vec<u8>) -> Result<String, MeltError>;
}
