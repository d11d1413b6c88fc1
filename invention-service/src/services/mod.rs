pub mod invention;
pub mod metrics;
pub mod providers;

pub use invention::{InventionError, InventionService};
pub use metrics::{get_metrics, init_metrics};
pub use providers::TextProvider;
