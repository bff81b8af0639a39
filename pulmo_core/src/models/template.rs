//! Blank model to copy when writing a new disease.
//!
//! Declares two parameters, one with only a range and one with a range,
//! a default value and a description. All three mutators are implemented
//! and leave every field as it was.
//!
//! Read-only context for every mutator:
//! - `ctx.constants`: lung height, flow, LAP, Pal, Ppl, Ptp, PAP, tolerance,
//!   MV, CL, patient height and weight
//! - `ctx.n_gen`: total number of generations
//! - `ctx.gen` (vessels only) and `ctx.vessel_idx`
//!
//! Writable vessel fields: `r`, `gamma`, `phi`, `c`, `tone`, `gp`, `ppl`,
//! `ptp`, `perivascular_a`, `perivascular_b`, `perivascular_c`, `kz`.
//!
//! Writable capillary fields: `krc`, `alpha`, `ho`.

use crate::{
    Capabilities, CapillaryContext, CapillaryState, DiseaseModel, Identity, ParameterSpec,
    SegmentContext, VesselState,
};

/// Placeholder disease that perturbs nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateModel;

impl DiseaseModel for TemplateModel {
    fn name(&self) -> Identity {
        Identity::short("Enter Disease Name Here")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::new("param1").with_range("0 to 100"),
            ParameterSpec::new("param2")
                .with_range("-5 to -1")
                .with_default(5.0)
                .with_description("Description for param2 is here"),
        ]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn artery(&self, _params: &[f64], _ctx: &SegmentContext<'_>, _state: &mut VesselState) -> bool {
        false
    }

    fn vein(&self, _params: &[f64], _ctx: &SegmentContext<'_>, _state: &mut VesselState) -> bool {
        false
    }

    fn cap(&self, _params: &[f64], _ctx: &CapillaryContext<'_>, _state: &mut CapillaryState) -> bool {
        false
    }
}
