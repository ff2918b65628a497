mod card;
mod cyclist;
mod rental;
mod staff;

pub use self::{card::*, cyclist::*, rental::*, staff::*};
