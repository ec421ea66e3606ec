mod exemption;
pub use exemption::ExemptionPolicy;

mod selection;
pub use selection::{SelectionMode, SelectionPolicy};

mod threshold;
pub use threshold::StalenessThreshold;
