use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use secondyou_common::SavedSimulation;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Simulation not found: {0}")]
    NotFound(Uuid),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Document store for saved simulations, keyed by simulation id and scoped
/// to the owning user. Another user's record behaves as missing.
#[async_trait]
pub trait SimulationStore: Send + Sync {
    async fn add(&self, simulation: SavedSimulation) -> Result<SavedSimulation, StoreError>;

    async fn get(&self, user_id: &str, id: Uuid) -> Result<SavedSimulation, StoreError>;

    /// Newest first, at most `limit` records.
    async fn list_for_user(&self, user_id: &str, limit: usize)
        -> Result<Vec<SavedSimulation>, StoreError>;

    /// Flip the favorite flag and return its new value.
    async fn toggle_favorite(&self, user_id: &str, id: Uuid) -> Result<bool, StoreError>;

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<(), StoreError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemorySimulationStore {
    records: RwLock<HashMap<Uuid, SavedSimulation>>,
}

impl InMemorySimulationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SimulationStore for InMemorySimulationStore {
    async fn add(&self, simulation: SavedSimulation) -> Result<SavedSimulation, StoreError> {
        let mut records = self.records.write().await;
        records.insert(simulation.id, simulation.clone());
        Ok(simulation)
    }

    async fn get(&self, user_id: &str, id: Uuid) -> Result<SavedSimulation, StoreError> {
        let records = self.records.read().await;
        records
            .get(&id)
            .filter(|s| s.user_id == user_id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<SavedSimulation>, StoreError> {
        let records = self.records.read().await;
        let mut sims: Vec<SavedSimulation> = records
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sims.truncate(limit);
        Ok(sims)
    }

    async fn toggle_favorite(&self, user_id: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let sim = records
            .get_mut(&id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StoreError::NotFound(id))?;
        sim.is_favorite = !sim.is_favorite;
        sim.updated_at = Utc::now();
        Ok(sim.is_favorite)
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(s) if s.user_id == user_id => {
                records.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::saved_simulation;

    #[tokio::test]
    async fn add_then_get() {
        let store = InMemorySimulationStore::new();
        let sim = store.add(saved_simulation("alice", 0)).await.unwrap();
        assert_eq!(store.get("alice", sim.id).await.unwrap(), sim);
    }

    #[tokio::test]
    async fn other_users_records_are_invisible() {
        let store = InMemorySimulationStore::new();
        let sim = store.add(saved_simulation("alice", 0)).await.unwrap();

        assert_eq!(store.get("bob", sim.id).await, Err(StoreError::NotFound(sim.id)));
        assert_eq!(store.toggle_favorite("bob", sim.id).await, Err(StoreError::NotFound(sim.id)));
        assert_eq!(store.delete("bob", sim.id).await, Err(StoreError::NotFound(sim.id)));
        assert!(store.list_for_user("bob", 10).await.unwrap().is_empty());
        assert!(store.get("alice", sim.id).await.is_ok());
    }

    #[tokio::test]
    async fn list_is_newest_first_and_limited() {
        let store = InMemorySimulationStore::new();
        for minutes_ago in [30, 0, 60] {
            store.add(saved_simulation("alice", minutes_ago)).await.unwrap();
        }
        store.add(saved_simulation("bob", 5)).await.unwrap();

        let list = store.list_for_user("alice", 2).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].created_at > list[1].created_at);
        assert!(list.iter().all(|s| s.user_id == "alice"));
    }

    #[tokio::test]
    async fn toggle_favorite_flips_and_touches_updated_at() {
        let store = InMemorySimulationStore::new();
        let sim = store.add(saved_simulation("alice", 10)).await.unwrap();

        assert!(store.toggle_favorite("alice", sim.id).await.unwrap());
        let updated = store.get("alice", sim.id).await.unwrap();
        assert!(updated.is_favorite);
        assert!(updated.updated_at > sim.updated_at);

        assert!(!store.toggle_favorite("alice", sim.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemorySimulationStore::new();
        let sim = store.add(saved_simulation("alice", 0)).await.unwrap();
        store.delete("alice", sim.id).await.unwrap();
        assert_eq!(store.get("alice", sim.id).await, Err(StoreError::NotFound(sim.id)));
        assert_eq!(store.delete("alice", sim.id).await, Err(StoreError::NotFound(sim.id)));
    }
}
