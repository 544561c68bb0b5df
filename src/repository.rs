use async_trait::async_trait;
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::contact::{ContactInquiry, InquiryStatus};

/// InquiryRepository
///
/// Persistence contract for contact inquiries. Handlers and the
/// `InquiryService` only see this trait, so the in-memory store can be
/// replaced by a database-backed one without touching them.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert_inquiry(&self, inquiry: ContactInquiry) -> ContactInquiry;
    // Newest first.
    async fn list_inquiries(&self) -> Vec<ContactInquiry>;
    // None when no inquiry has that id.
    async fn set_inquiry_status(&self, id: Uuid, status: InquiryStatus) -> Option<ContactInquiry>;
}

/// RepositoryState
///
/// The shared handle type stored in `AppState`.
pub type RepositoryState = Arc<dyn InquiryRepository>;

/// Inquiries kept by `InMemoryRepository::new`.
pub const DEFAULT_INQUIRY_CAPACITY: usize = 1000;

/// InMemoryRepository
///
/// Holds at most `capacity` inquiries for the lifetime of the process. Once
/// full, each insert evicts the oldest inquiry.
pub struct InMemoryRepository {
    capacity: usize,
    inquiries: RwLock<VecDeque<ContactInquiry>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INQUIRY_CAPACITY)
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inquiries: RwLock::new(VecDeque::with_capacity(capacity.min(64))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl InquiryRepository for InMemoryRepository {
    async fn insert_inquiry(&self, inquiry: ContactInquiry) -> ContactInquiry {
        let mut inquiries = self.inquiries.write().await;
        while inquiries.len() >= self.capacity {
            if let Some(evicted) = inquiries.pop_front() {
                tracing::warn!(
                    inquiry_id = %evicted.id,
                    capacity = self.capacity,
                    "inquiry store full; evicting oldest"
                );
            }
        }
        inquiries.push_back(inquiry.clone());
        inquiry
    }

    async fn list_inquiries(&self) -> Vec<ContactInquiry> {
        // Insertion order is arrival order; newest first means reversed.
        self.inquiries.read().await.iter().rev().cloned().collect()
    }

    async fn set_inquiry_status(&self, id: Uuid, status: InquiryStatus) -> Option<ContactInquiry> {
        let mut inquiries = self.inquiries.write().await;
        let inquiry = inquiries.iter_mut().find(|inquiry| inquiry.id == id)?;
        inquiry.status = status;
        Some(inquiry.clone())
    }
}
