//! Concepts module
//!
//! One module per concept. Each concept owns exactly one collection (friending
//! owns two) and never refers to another concept; composing them is the job of
//! the synchronization layer in `crate::sync`.

pub mod authing;
pub mod commenting;
pub mod friending;
pub mod grouping;
pub mod mapping;
pub mod milestoning;
pub mod posting;
pub mod sessioning;

pub use authing::AuthingConcept;
pub use commenting::CommentingConcept;
pub use friending::FriendingConcept;
pub use grouping::GroupingConcept;
pub use mapping::MappingConcept;
pub use milestoning::MilestoningConcept;
pub use posting::PostingConcept;
pub use sessioning::{Session, SessioningConcept};

use serde::Serialize;

use crate::config::Settings;
use crate::database::{open_store, DocCollection, SharedStore};
use crate::utils::errors::Result;

/// A mutating operation's user-facing message together with its result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub msg: String,
    pub value: T,
}

impl<T> Outcome<T> {
    pub fn new(msg: impl Into<String>, value: T) -> Self {
        Self {
            msg: msg.into(),
            value,
        }
    }
}

/// Every concept, wired to one shared store
#[derive(Clone)]
pub struct Concepts {
    pub authing: AuthingConcept,
    pub sessioning: SessioningConcept,
    pub posting: PostingConcept,
    pub commenting: CommentingConcept,
    pub friending: FriendingConcept,
    pub grouping: GroupingConcept,
    pub milestoning: MilestoningConcept,
    pub mapping: MappingConcept,
    store: SharedStore,
}

impl std::fmt::Debug for Concepts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Concepts")
            .field("backend", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}

impl Concepts {
    /// Build every concept over `store`, naming collections from `settings`
    pub fn new(store: SharedStore, settings: &Settings) -> Self {
        let names = &settings.collections;
        let retries = settings.store.max_update_retries;
        let limits = &settings.concepts;

        Self {
            authing: AuthingConcept::new(
                DocCollection::new(store.clone(), &names.users, retries),
                limits.min_password_length,
            ),
            sessioning: SessioningConcept::new(),
            posting: PostingConcept::new(
                DocCollection::new(store.clone(), &names.posts, retries),
                limits.max_post_length,
            ),
            commenting: CommentingConcept::new(DocCollection::new(store.clone(), &names.comments, retries)),
            friending: FriendingConcept::new(
                DocCollection::new(store.clone(), &names.friends, retries),
                DocCollection::new(store.clone(), &names.friend_requests, retries),
            ),
            grouping: GroupingConcept::new(DocCollection::new(store.clone(), &names.groups, retries)),
            milestoning: MilestoningConcept::new(DocCollection::new(store.clone(), &names.milestones, retries)),
            mapping: MappingConcept::new(DocCollection::new(store.clone(), &names.maps, retries)),
            store,
        }
    }

    /// Open the configured backend and build every concept over it
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let store = open_store(&settings.store).await?;
        Ok(Self::new(store, settings))
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub async fn health_check(&self) -> HealthStatus {
        let store_healthy = self.store.health_check().await.is_ok();
        HealthStatus {
            backend: self.store.backend_name(),
            store_healthy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub backend: &'static str,
    pub store_healthy: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }

    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.store_healthy {
            issues.push(format!("{} document store unreachable", self.backend));
        }
        issues
    }
}
