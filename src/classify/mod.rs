//! Classification of canonical record fields into visual and risk attributes.
//!
//! Every function here is pure and reads canonical values only. Unknown codes
//! degrade to a defined neutral (or, for hazards, fail-safe) output instead
//! of erroring.

pub mod alert;
pub mod intensity;
pub mod tsunami;

pub use alert::AlertSeverity;
pub use intensity::{Intensity, IntensityStyle, LegendEntry, classify, legend};
pub use tsunami::has_tsunami_risk;
