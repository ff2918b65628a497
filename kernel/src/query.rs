mod card;
mod cyclist;
mod staff;

pub use self::{card::*, cyclist::*, staff::*};
