//! Built-in disease models.
//!
//! - PAH: distal arterial compromise
//! - PVOD: distal venous compromise
//! - Template: blank model exposing the full mutable surface
//!
//! PAH and PVOD share [`crate::policy::scale_distal_resistance`] and differ
//! only in the vessel kind they perturb.

pub mod pah;
pub mod pvod;
pub mod template;

pub use pah::ArterialCompromise;
pub use pvod::VenousCompromise;
pub use template::TemplateModel;

use crate::ParameterSpec;

/// Short name of the compromise parameter
pub const COMPROMISE: &str = "Compromise";

/// Declared range of the compromise parameter, in percent lumen area lost
pub const COMPROMISE_RANGE: &str = "0 to 100";

fn compromise_parameters() -> Vec<ParameterSpec> {
    vec![ParameterSpec::new(COMPROMISE).with_range(COMPROMISE_RANGE)]
}
