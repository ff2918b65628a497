pub use self::{billing::*, clock::*, station::*};

mod billing;
mod clock;
mod station;
