//! Core record types shared by the importer, the repository layer and the
//! admin views

mod resource;
mod taxonomy;
mod unit;

pub use resource::*;
pub use taxonomy::*;
pub use unit::*;
