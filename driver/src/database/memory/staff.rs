use std::collections::HashMap;

use error_stack::Report;
use tokio::sync::RwLock;

use kernel::interface::query::StaffQuery;
use kernel::interface::update::StaffModifier;
use kernel::prelude::entity::{Staff, StaffId};
use kernel::KernelError;

#[derive(Debug, Default)]
pub struct InMemoryStaffRepository {
    staff: RwLock<HashMap<StaffId, Staff>>,
}

impl InMemoryStaffRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(staff: &HashMap<StaffId, Staff>, member: &Staff) -> bool {
    staff
        .values()
        .any(|other| other.id() != member.id() && other.email().matches(member.email().as_str()))
}

#[async_trait::async_trait]
impl StaffQuery for InMemoryStaffRepository {
    async fn find_by_id(&self, id: &StaffId) -> error_stack::Result<Option<Staff>, KernelError> {
        Ok(self.staff.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> error_stack::Result<Option<Staff>, KernelError> {
        let staff = self.staff.read().await;
        Ok(staff.values().find(|member| member.email().matches(email)).cloned())
    }

    async fn find_all(&self) -> error_stack::Result<Vec<Staff>, KernelError> {
        Ok(self.staff.read().await.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl StaffModifier for InMemoryStaffRepository {
    async fn create(&self, member: &Staff) -> error_stack::Result<(), KernelError> {
        let mut staff = self.staff.write().await;
        if staff.contains_key(member.id()) || email_taken(&staff, member) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("staff {:?} already exists", member.id())));
        }
        staff.insert(*member.id(), member.clone());
        Ok(())
    }

    async fn update(&self, member: &Staff) -> error_stack::Result<(), KernelError> {
        let mut staff = self.staff.write().await;
        if !staff.contains_key(member.id()) {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("staff {:?} not found", member.id())));
        }
        if email_taken(&staff, member) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("email {} is already in use", member.email().as_str())));
        }
        staff.insert(*member.id(), member.clone());
        Ok(())
    }

    async fn delete(&self, id: &StaffId) -> error_stack::Result<bool, KernelError> {
        Ok(self.staff.write().await.remove(id).is_some())
    }

    async fn delete_all(&self) -> error_stack::Result<(), KernelError> {
        self.staff.write().await.clear();
        Ok(())
    }
}
