use crate::entity::{BikeId, CyclistId, LockId, Money};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BikeStationGateway: 'static + Sync + Send {
    /// Picks a free bike docked at `lock_id`, or `None` when the lock is empty.
    async fn allocate_bike(
        &self,
        lock_id: &LockId,
    ) -> error_stack::Result<Option<BikeId>, KernelError>;

    /// Unlocks the bike for the cyclist and notifies them.
    async fn release_lock(
        &self,
        lock_id: &LockId,
        bike_id: &BikeId,
        cyclist_id: &CyclistId,
    ) -> error_stack::Result<(), KernelError>;

    /// Locks the returned bike and notifies the cyclist of any extra fee.
    async fn lock_station(
        &self,
        lock_id: &LockId,
        bike_id: &BikeId,
        cyclist_id: &CyclistId,
        extra_fee: &Money,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBikeStationGateway: 'static + Sync + Send {
    type BikeStationGateway: BikeStationGateway;
    fn bike_station_gateway(&self) -> &Self::BikeStationGateway;
}
