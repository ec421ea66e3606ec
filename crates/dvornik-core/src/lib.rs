pub mod api;
pub mod error;
pub mod params;
pub mod remove;
pub mod run;
pub mod select;

pub use api::{PodApi, PodApiError};
pub use error::CoreError;
pub use params::{ConfigError, DeleteErrorPolicy, RawParameters, RunParameters};
pub use remove::{Remover, Report};
pub use run::{RunSummary, run};
pub use select::{Decision, Selector};

pub mod prelude {
    pub use crate::api::{PodApi, PodApiError};
    pub use crate::error::CoreError;
    pub use crate::params::{ConfigError, RunParameters};
    pub use crate::run::{RunSummary, run};
}
