mod domain;
pub use domain::{Flag, Labels, Namespace, PodName};

mod error;
pub use error::{ModelError, ModelResult};

mod pod;
pub use pod::{Pod, PodPhase};

mod policy;
pub use policy::{ExemptionPolicy, SelectionMode, SelectionPolicy, StalenessThreshold};

mod removal;
pub use removal::{DeleteRequest, GracePeriod, RemovalOutcome};
