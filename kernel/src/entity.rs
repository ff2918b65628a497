mod card;
mod common;
mod cyclist;
mod rental;
mod staff;

pub use self::{card::*, common::*, cyclist::*, rental::*, staff::*};
