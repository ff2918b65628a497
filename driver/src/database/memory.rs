pub use self::{card::*, cyclist::*, staff::*};

mod card;
mod cyclist;
mod staff;
