//! The disease-model interface.
//!
//! A model is stateless metadata plus up to three segment mutators. The host
//! asks for the metadata once at load time, then calls the mutator matching
//! each segment's kind with the resolved parameter values, an explicit
//! read-only context and the segment's mutable state.

use crate::{
    Capabilities, CapillaryContext, CapillaryState, Identity, ParameterSpec, SegmentContext,
    VesselState,
};

/// A disease that perturbs the vascular tree.
///
/// `name` and `parameters` are mandatory. The three mutators are each
/// optional: a model lists the ones it overrides in `capabilities`, and the
/// registry records that set once. Mutators not listed are never called; the
/// default bodies are no-ops returning `false`.
///
/// # Mutator contract
/// * `params` holds one value per declared parameter, in declaration order.
///   Callers guarantee the arity; a mismatch is a host integration fault.
/// * Return `true` exactly when at least one field of `state` was changed.
/// * Output depends only on `params`, `ctx` and the incoming `state`. Models
///   keep no state between calls and have no side channel.
pub trait DiseaseModel: Send + Sync {
    /// Identity shown to the user and used for lookup
    fn name(&self) -> Identity;

    /// Declared parameters; defines mutator arity and order
    fn parameters(&self) -> Vec<ParameterSpec>;

    /// Mutators this model implements
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// True if the registry must refuse to remove this model
    fn is_read_only(&self) -> bool {
        false
    }

    /// Perturb one artery segment
    fn artery(&self, _params: &[f64], _ctx: &SegmentContext<'_>, _state: &mut VesselState) -> bool {
        false
    }

    /// Perturb one vein segment
    fn vein(&self, _params: &[f64], _ctx: &SegmentContext<'_>, _state: &mut VesselState) -> bool {
        false
    }

    /// Perturb one capillary
    fn cap(&self, _params: &[f64], _ctx: &CapillaryContext<'_>, _state: &mut CapillaryState) -> bool {
        false
    }
}
