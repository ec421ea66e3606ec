mod flag;
pub use flag::Flag;

mod labels;
pub use labels::Labels;

/// Namespace a run operates in.
pub type Namespace = String;

/// Pod name, unique within a namespace.
pub type PodName = String;
