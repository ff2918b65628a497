mod email;
mod money;
mod name;
mod password;
mod tax_id;

pub use self::{email::*, money::*, name::*, password::*, tax_id::*};
