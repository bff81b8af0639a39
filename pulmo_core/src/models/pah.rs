//! Pulmonary Arterial Hypertension.
//!
//! Narrows the distal arteries by `Compromise` percent of lumen area.

use crate::policy::scale_distal_resistance;
use crate::{Capabilities, DiseaseModel, Identity, ParameterSpec, SegmentContext, VesselState};

/// Distal arterial compromise
#[derive(Clone, Copy, Debug, Default)]
pub struct ArterialCompromise;

impl DiseaseModel for ArterialCompromise {
    fn name(&self) -> Identity {
        Identity::described("PAH", "Pulmonary Arterial Hypertension")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        super::compromise_parameters()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ARTERY
    }

    fn artery(&self, params: &[f64], ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        params
            .first()
            .map_or(false, |&compromise| scale_distal_resistance(compromise, ctx, &mut state.r))
    }
}
