use crate::entity::{Staff, StaffId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait StaffQuery: Sync + Send + 'static {
    async fn find_by_id(&self, id: &StaffId) -> error_stack::Result<Option<Staff>, KernelError>;

    async fn find_by_email(&self, email: &str)
        -> error_stack::Result<Option<Staff>, KernelError>;

    async fn find_all(&self) -> error_stack::Result<Vec<Staff>, KernelError>;
}

pub trait DependOnStaffQuery: Sync + Send + 'static {
    type StaffQuery: StaffQuery;
    fn staff_query(&self) -> &Self::StaffQuery;
}
