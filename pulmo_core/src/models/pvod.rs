//! Pulmonary veno-occlusive disease.
//!
//! Narrows the distal veins by `Compromise` percent of lumen area.

use crate::policy::scale_distal_resistance;
use crate::{Capabilities, DiseaseModel, Identity, ParameterSpec, SegmentContext, VesselState};

/// Distal venous compromise
#[derive(Clone, Copy, Debug, Default)]
pub struct VenousCompromise;

impl DiseaseModel for VenousCompromise {
    fn name(&self) -> Identity {
        Identity::described("PVOD", "Pulmonary Venous Hypertension")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        super::compromise_parameters()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::VEIN
    }

    fn vein(&self, params: &[f64], ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        params
            .first()
            .map_or(false, |&compromise| scale_distal_resistance(compromise, ctx, &mut state.r))
    }
}
