use error_stack::Report;
use kernel::interface::query::{DependOnStaffQuery, StaffQuery};
use kernel::interface::update::{DependOnStaffModifier, StaffModifier};
use kernel::prelude::entity::{
    Cpf, Email, FullName, Password, Staff, StaffAge, StaffId, StaffRole,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{
    CreateStaffDto, DeleteStaffDto, GetStaffDto, StaffDto, StaffProfileDto, UpdateStaffDto,
};

fn build_staff(
    id: StaffId,
    email: Email,
    profile: StaffProfileDto,
) -> error_stack::Result<Staff, KernelError> {
    let cpf = Cpf::parse(profile.cpf)?;
    let name = FullName::parse(profile.name)?;
    let password = Password::parse(profile.password, profile.password_confirmation)?;
    Ok(Staff::new(
        id,
        email,
        name,
        StaffAge::new(profile.age),
        StaffRole::new(profile.role),
        cpf,
        password,
    ))
}

async fn ensure_email_free<Q: StaffQuery>(
    query: &Q,
    email: &Email,
) -> error_stack::Result<(), KernelError> {
    if query.find_by_email(email.as_str()).await?.is_some() {
        return Err(Report::new(KernelError::Conflict)
            .attach_printable(format!("email {} is already in use", email.as_str())));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait HandleStaffService:
    'static + Sync + Send + DependOnStaffQuery + DependOnStaffModifier
{
    async fn register_staff(&self, dto: CreateStaffDto) -> error_stack::Result<StaffDto, KernelError> {
        let email = Email::parse(dto.email.clone())?;
        ensure_email_free(self.staff_query(), &email).await?;
        let staff = build_staff(StaffId::new(Uuid::new_v4()), email, dto)?;

        self.staff_modifier().create(&staff).await?;
        tracing::info!(staff_id = ?staff.id(), "staff registered");

        Ok(StaffDto::from(staff))
    }

    async fn update_staff(&self, dto: UpdateStaffDto) -> error_stack::Result<StaffDto, KernelError> {
        let id = StaffId::new(dto.id);
        let current = self.staff_query().find_by_id(&id).await?.ok_or_else(|| {
            Report::new(KernelError::NotFound).attach_printable(format!("staff {} not found", dto.id))
        })?;

        let email = if current.email().matches(&dto.profile.email) {
            current.email().clone()
        } else {
            let email = Email::parse(dto.profile.email.clone())?;
            ensure_email_free(self.staff_query(), &email).await?;
            email
        };
        let staff = build_staff(id, email, dto.profile)?;
        self.staff_modifier().update(&staff).await?;

        Ok(StaffDto::from(staff))
    }

    async fn remove_staff(&self, dto: DeleteStaffDto) -> error_stack::Result<(), KernelError> {
        let removed = self.staff_modifier().delete(&StaffId::new(dto.id)).await?;
        if !removed {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("staff {} not found", dto.id)));
        }
        tracing::info!(staff_id = %dto.id, "staff removed");
        Ok(())
    }
}

impl<T> HandleStaffService for T where T: DependOnStaffQuery + DependOnStaffModifier {}

#[async_trait::async_trait]
pub trait GetStaffService: 'static + Sync + Send + DependOnStaffQuery {
    async fn get_staff(&self, dto: GetStaffDto) -> error_stack::Result<Option<StaffDto>, KernelError> {
        let staff = self.staff_query().find_by_id(&StaffId::new(dto.id)).await?;
        Ok(staff.map(StaffDto::from))
    }

    async fn list_staff(&self) -> error_stack::Result<Vec<StaffDto>, KernelError> {
        let staff = self.staff_query().find_all().await?;
        Ok(staff.into_iter().map(StaffDto::from).collect())
    }
}

impl<T> GetStaffService for T where T: DependOnStaffQuery {}
