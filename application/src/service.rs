mod card;
mod cyclist;
mod rental;
mod restore;
mod staff;

pub use self::{card::*, cyclist::*, rental::*, restore::*, staff::*};
