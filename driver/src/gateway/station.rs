use std::collections::HashSet;

use tokio::sync::RwLock;
use uuid::Uuid;

use kernel::interface::gateway::BikeStationGateway;
use kernel::prelude::entity::{BikeId, CyclistId, LockId, Money};
use kernel::KernelError;

/// Stand-in for the station network. Every lock holds a fresh bike unless it
/// was marked empty.
#[derive(Debug, Default)]
pub struct SimulatedStationGateway {
    empty_locks: RwLock<HashSet<LockId>>,
}

impl SimulatedStationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mark_empty(&self, lock_id: LockId) {
        self.empty_locks.write().await.insert(lock_id);
    }

    pub async fn mark_stocked(&self, lock_id: &LockId) {
        self.empty_locks.write().await.remove(lock_id);
    }
}

#[async_trait::async_trait]
impl BikeStationGateway for SimulatedStationGateway {
    async fn allocate_bike(
        &self,
        lock_id: &LockId,
    ) -> error_stack::Result<Option<BikeId>, KernelError> {
        if self.empty_locks.read().await.contains(lock_id) {
            tracing::debug!(%lock_id, "lock is empty");
            return Ok(None);
        }
        let bike_id = BikeId::new(Uuid::new_v4());
        tracing::debug!(%lock_id, %bike_id, "bike allocated");
        Ok(Some(bike_id))
    }

    async fn release_lock(
        &self,
        lock_id: &LockId,
        bike_id: &BikeId,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<(), KernelError> {
        tracing::debug!(%lock_id, %bike_id, %cyclist_id, "lock released");
        Ok(())
    }

    async fn lock_station(
        &self,
        lock_id: &LockId,
        bike_id: &BikeId,
        cyclist_id: &CyclistId,
        extra_fee: &Money,
    ) -> error_stack::Result<(), KernelError> {
        tracing::debug!(%lock_id, %bike_id, %cyclist_id, ?extra_fee, "bike locked");
        Ok(())
    }
}
