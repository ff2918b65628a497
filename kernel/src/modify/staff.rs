use crate::entity::{Staff, StaffId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait StaffModifier: 'static + Sync + Send {
    async fn create(&self, staff: &Staff) -> error_stack::Result<(), KernelError>;
    async fn update(&self, staff: &Staff) -> error_stack::Result<(), KernelError>;
    /// Returns whether a staff member was removed.
    async fn delete(&self, id: &StaffId) -> error_stack::Result<bool, KernelError>;
    async fn delete_all(&self) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnStaffModifier: 'static + Sync + Send {
    type StaffModifier: StaffModifier;
    fn staff_modifier(&self) -> &Self::StaffModifier;
}
