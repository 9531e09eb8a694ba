//! File catalog: uploaded job postings and applicant resumes.
//!
//! The catalog is a local copy of the backend's file listing. Deletes are
//! not optimistic: an entry leaves the catalog only after the backend has
//! confirmed the delete. Confirmed deletes are remembered, so a listing
//! fetched before the delete landed cannot bring the entry back.

pub mod handlers;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::backend_client::models::{FileEntry, FileType};
use crate::backend_client::{BackendError, MatchBackend};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub status: Option<String>,
    pub uploaded_at: Option<String>,
}

impl From<FileEntry> for CatalogEntry {
    fn from(file: FileEntry) -> Self {
        Self {
            name: file.display_name().to_string(),
            id: file.id,
            file_path: file.file_path,
            status: file.status,
            uploaded_at: file.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileCatalog {
    pub jobs: Vec<CatalogEntry>,
    pub applicants: Vec<CatalogEntry>,
    /// Ids the backend has confirmed deleted.
    #[serde(skip)]
    deleted: HashSet<String>,
}

impl FileCatalog {
    /// Splits a listing into job postings and resumes, keeping backend order.
    /// Files of any other type are left out.
    pub fn from_files(files: Vec<FileEntry>) -> Self {
        let mut catalog = Self::default();
        for file in files {
            match file.file_type {
                FileType::JobPosting => catalog.jobs.push(file.into()),
                FileType::Resume => catalog.applicants.push(file.into()),
                FileType::Other => {}
            }
        }
        catalog
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.jobs
            .iter()
            .chain(self.applicants.iter())
            .find(|entry| entry.id == id)
    }

    /// Replaces the listing, skipping ids already confirmed deleted.
    pub fn replace_listing(&mut self, fresh: FileCatalog) {
        let deleted = &self.deleted;
        self.jobs = fresh
            .jobs
            .into_iter()
            .filter(|entry| !deleted.contains(&entry.id))
            .collect();
        self.applicants = fresh
            .applicants
            .into_iter()
            .filter(|entry| !deleted.contains(&entry.id))
            .collect();
    }

    /// Removes the entry from both lists and remembers the id as deleted.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.deleted.insert(id.to_string());
        let before = self.jobs.len() + self.applicants.len();
        self.jobs.retain(|entry| entry.id != id);
        self.applicants.retain(|entry| entry.id != id);
        before != self.jobs.len() + self.applicants.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// User-facing outcome of a catalog action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    fn new(kind: NoticeKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            at: Utc::now(),
        }
    }
}

pub const DELETE_SUCCEEDED: &str = "File deleted!";
pub const DELETE_FAILED: &str = "Failed to delete file";

/// Re-reads the backend listing into `catalog` and returns the merged result.
pub async fn refresh(
    backend: &dyn MatchBackend,
    catalog: &RwLock<FileCatalog>,
) -> Result<FileCatalog, BackendError> {
    let files = backend.list_files().await?;
    let mut catalog = catalog.write().await;
    catalog.replace_listing(FileCatalog::from_files(files));
    Ok(catalog.clone())
}

/// Deletes a file on the backend, then drops it from the local catalog.
/// On failure the catalog is left untouched.
pub async fn delete_entry(
    backend: &dyn MatchBackend,
    catalog: &RwLock<FileCatalog>,
    id: &str,
    path: &str,
) -> Notice {
    match backend.delete_file(id, path).await {
        Ok(()) => {
            catalog.write().await.remove(id);
            info!("Deleted file {id}");
            Notice::new(NoticeKind::Success, DELETE_SUCCEEDED)
        }
        Err(e) => {
            warn!("Failed to delete file {id}: {e}");
            Notice::new(NoticeKind::Failure, DELETE_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::backend_client::models::{EntityDetail, MatchDetail};

    fn file(id: &str, file_type: FileType, original_name: Option<&str>) -> FileEntry {
        FileEntry {
            id: id.to_string(),
            file_type,
            original_name: original_name.map(str::to_string),
            file_name: format!("{id}.pdf"),
            file_path: format!("uploads/{id}.pdf"),
            status: None,
            uploaded_at: None,
        }
    }

    fn sample() -> FileCatalog {
        FileCatalog::from_files(vec![
            file("j_1", FileType::JobPosting, Some("Backend Engineer.pdf")),
            file("a_1", FileType::Resume, None),
            file("x_1", FileType::Other, None),
        ])
    }

    #[derive(Default)]
    struct DeleteBackend {
        fail: bool,
        listing_delay_ms: u64,
    }

    #[async_trait]
    impl MatchBackend for DeleteBackend {
        async fn list_files(&self) -> Result<Vec<FileEntry>, BackendError> {
            tokio::time::sleep(Duration::from_millis(self.listing_delay_ms)).await;
            Ok(vec![
                file("j_9", FileType::JobPosting, None),
                file("a_1", FileType::Resume, None),
            ])
        }

        async fn matched_applicants(&self, _job_id: &str) -> Result<Vec<String>, BackendError> {
            Ok(Vec::new())
        }

        async fn entity_detail(&self, id: &str) -> Result<EntityDetail, BackendError> {
            Err(BackendError::NotFound(id.to_string()))
        }

        async fn match_detail(
            &self,
            _applicant_id: &str,
            _job_id: &str,
        ) -> Result<MatchDetail, BackendError> {
            Err(BackendError::NotFound("No match found".to_string()))
        }

        async fn delete_file(&self, _id: &str, _path: &str) -> Result<(), BackendError> {
            if self.fail {
                Err(BackendError::Api {
                    status: 500,
                    message: "disk busy".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_from_files_splits_by_type() {
        let catalog = sample();
        assert_eq!(catalog.jobs.len(), 1);
        assert_eq!(catalog.jobs[0].name, "Backend Engineer.pdf");
        assert_eq!(catalog.applicants.len(), 1);
        assert_eq!(catalog.applicants[0].name, "a_1.pdf");
        assert!(catalog.find("x_1").is_none());
    }

    #[test]
    fn test_remove_reports_whether_entry_existed() {
        let mut catalog = sample();
        assert!(catalog.remove("a_1"));
        assert!(catalog.applicants.is_empty());
        assert!(!catalog.remove("a_1"));
    }

    #[tokio::test]
    async fn test_successful_delete_removes_entry() {
        let catalog = RwLock::new(sample());
        let notice = delete_entry(&DeleteBackend::default(), &catalog, "j_1", "p").await;
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(catalog.read().await.find("j_1").is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let catalog = RwLock::new(sample());
        let backend = DeleteBackend {
            fail: true,
            ..Default::default()
        };
        let notice = delete_entry(&backend, &catalog, "j_1", "p").await;
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.message, DELETE_FAILED);
        assert_eq!(*catalog.read().await, sample());
    }

    #[tokio::test]
    async fn test_refresh_replaces_catalog() {
        let catalog = RwLock::new(sample());
        let fresh = refresh(&DeleteBackend::default(), &catalog).await.unwrap();
        assert_eq!(fresh.jobs[0].id, "j_9");
        assert_eq!(*catalog.read().await, fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_fetched_before_delete_does_not_restore_entry() {
        let catalog = Arc::new(RwLock::new(sample()));
        let backend = Arc::new(DeleteBackend {
            listing_delay_ms: 50,
            ..Default::default()
        });

        let pending = tokio::spawn({
            let backend = Arc::clone(&backend);
            let catalog = Arc::clone(&catalog);
            async move { refresh(backend.as_ref(), &catalog).await }
        });
        // Let the listing request start before the delete is confirmed.
        tokio::task::yield_now().await;

        let notice = delete_entry(backend.as_ref(), &catalog, "a_1", "p").await;
        assert_eq!(notice.kind, NoticeKind::Success);

        let fresh = pending.await.unwrap().unwrap();
        assert!(fresh.find("a_1").is_none());
        assert!(catalog.read().await.find("a_1").is_none());
        assert_eq!(fresh.jobs[0].id, "j_9");
    }
}
