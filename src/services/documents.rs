//! Document library management.

use crate::access::{DataAccess, ErrorCallback, Subscription, ValueCallback};
use crate::error::Result;
use crate::format::format_file_size;
use crate::types::{CreateDocumentRequest, Document};
use std::sync::Arc;

/// Service for an agent's document library.
#[derive(Clone)]
pub struct DocumentService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl DocumentService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    pub async fn list(&self, agent_id: &str) -> Result<Vec<Document>> {
        self.access.list_documents(agent_id).await
    }

    pub async fn get(&self, agent_id: &str, document_id: &str) -> Result<Option<Document>> {
        self.access.get_document(agent_id, document_id).await
    }

    /// Add a document to the library. Indexing happens asynchronously
    /// server-side; watch the list for status transitions.
    pub async fn upload(&self, agent_id: &str, req: &CreateDocumentRequest) -> Result<Document> {
        self.access.create_document(agent_id, req).await
    }

    pub async fn delete(&self, agent_id: &str, document_id: &str) -> Result<()> {
        self.access.delete_document(agent_id, document_id).await
    }

    /// Watch the library for uploads, deletions, and status changes.
    pub fn watch(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<Document>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.access
            .subscribe_documents(agent_id, on_value, on_error)
    }

    /// Human-readable size of a document, when the backend reported one.
    #[must_use]
    pub fn display_size(document: &Document) -> Option<String> {
        document.size_bytes.map(format_file_size)
    }
}
