pub mod invention;

pub use invention::{InventionDateRequest, InventionDateResponse};
