//! Published flows, keyed by app id.
//!
//! The editor publishes a snapshot of its flow; the viewer pages and the
//! native SDK read it back. Handlers hold the repository as
//! `Arc<dyn FlowRepository>` so a persistent backend can replace the
//! in-memory one without touching them.

use std::collections::HashMap;

use async_trait::async_trait;
use flowkit_core::app_id::AppId;
use flowkit_core::slide::OnboardingFlow;
use tokio::sync::RwLock;

use crate::error::StoreError;

#[async_trait]
pub trait FlowRepository: Send + Sync {
    /// Store `flow` as the published version for `app_id`, replacing any
    /// earlier one.
    async fn publish(&self, app_id: &AppId, flow: OnboardingFlow) -> Result<(), StoreError>;

    /// The published flow for `app_id`, if any.
    async fn fetch(&self, app_id: &AppId) -> Result<Option<OnboardingFlow>, StoreError>;

    /// Every app id with a published flow.
    async fn list(&self) -> Result<Vec<AppId>, StoreError>;
}

/// Process-local repository. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryFlowRepo {
    flows: RwLock<HashMap<AppId, OnboardingFlow>>,
}

impl InMemoryFlowRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlowRepository for InMemoryFlowRepo {
    async fn publish(&self, app_id: &AppId, flow: OnboardingFlow) -> Result<(), StoreError> {
        let slides = flow.slides.len();
        let replaced = self
            .flows
            .write()
            .await
            .insert(app_id.clone(), flow)
            .is_some();
        tracing::info!(app_id = %app_id, slides, replaced, "Flow published");
        Ok(())
    }

    async fn fetch(&self, app_id: &AppId) -> Result<Option<OnboardingFlow>, StoreError> {
        Ok(self.flows.read().await.get(app_id).cloned())
    }

    async fn list(&self) -> Result<Vec<AppId>, StoreError> {
        let mut ids: Vec<AppId> = self.flows.read().await.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}
