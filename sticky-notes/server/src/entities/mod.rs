//! SeaORM entities for the Sticky Notes database.

pub mod prelude;
pub mod tasks;
