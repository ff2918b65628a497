mod billing;
mod clock;
mod directory;
mod station;

pub use self::{billing::*, clock::*, directory::*, station::*};
