#![forbid(unsafe_code)]

//! Disease-model plugin contract for a pulmonary-circulation simulator.
//!
//! A host simulator builds and solves the vascular tree; this crate defines
//! how a disease perturbs it. It provides:
//! - The `DiseaseModel` trait (descriptor plus artery/vein/capillary mutators)
//! - Explicit read-only segment context and mutable segment state
//! - The generation-gated resistance policy
//! - Built-in PAH and PVOD models and a blank template
//! - Parameter ranges, model registry, bound diseases and run configuration

pub mod types;
pub mod error;
pub mod range;
pub mod model;
pub mod policy;
pub mod models;
pub mod registry;
pub mod disease;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use range::Range;
pub use model::DiseaseModel;
pub use registry::{build_default_registry, default_registry, ModelRegistry, RegisteredModel};
pub use disease::Disease;
pub use config::Config;
