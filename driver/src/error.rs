use error_stack::Report;
use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
}

impl DriverError {
    pub fn is_missing_var(&self) -> bool {
        matches!(
            self,
            DriverError::Env(dotenvy::Error::EnvVar(std::env::VarError::NotPresent))
        )
    }
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}

pub trait ConvertError: 'static + Sized {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T: 'static> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            DriverError::InvalidConfig { .. } => {
                Report::from(error).change_context(KernelError::Validation)
            }
            DriverError::Env(_) => Report::from(error).change_context(KernelError::Internal),
        })
    }
}
