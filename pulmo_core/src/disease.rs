//! A registered model bound to concrete parameter values.
//!
//! The host resolves one value per declared parameter for the duration of a
//! run, then drives the tree through `apply_*`. Values are seeded from the
//! declared defaults, so the bound arity always matches the declaration.

use crate::registry::RegisteredModel;
use crate::{
    CapillaryContext, CapillaryState, Error, ParameterSpec, Result, SegmentContext, VesselKind,
    VesselState,
};
use std::sync::Arc;

/// A disease model with its parameter values
#[derive(Clone, Debug)]
pub struct Disease {
    model: Arc<RegisteredModel>,
    values: Vec<f64>,
}

impl Disease {
    /// Bind a model with each parameter at its declared default (0 if none)
    pub fn new(model: Arc<RegisteredModel>) -> Self {
        let values = model
            .parameters()
            .iter()
            .map(ParameterSpec::initial_value)
            .collect();
        Self { model, values }
    }

    /// Bind a model with explicit positional values
    pub fn with_values(model: Arc<RegisteredModel>, values: &[f64]) -> Result<Self> {
        let expected = model.parameters().len();
        if values.len() != expected {
            return Err(Error::ParameterCount {
                model: model.label().to_string(),
                expected,
                actual: values.len(),
            });
        }
        tracing::debug!("Bound '{}' to values {:?}", model.label(), values);
        Ok(Self {
            model,
            values: values.to_vec(),
        })
    }

    pub fn model(&self) -> &RegisteredModel {
        &self.model
    }

    pub fn name(&self) -> &str {
        self.model.label()
    }

    /// Bound values in declaration order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn parameter_value(&self, name: &str) -> Option<f64> {
        self.model.parameter_index(name).map(|i| self.values[i])
    }

    pub fn parameter_value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        let index = self
            .model
            .parameter_index(name)
            .ok_or_else(|| self.unknown_parameter(name.to_string()))?;
        self.set_value(index, value);
        Ok(())
    }

    pub fn set_parameter_at(&mut self, index: usize, value: f64) -> Result<()> {
        if index >= self.values.len() {
            return Err(self.unknown_parameter(format!("#{}", index)));
        }
        self.set_value(index, value);
        Ok(())
    }

    fn set_value(&mut self, index: usize, value: f64) {
        tracing::debug!(
            "Set '{}' parameter {} to {}",
            self.name(),
            self.model.parameters()[index].short_name,
            value
        );
        self.values[index] = value;
    }

    fn unknown_parameter(&self, parameter: String) -> Error {
        Error::UnknownParameter {
            model: self.name().to_string(),
            parameter,
        }
    }

    /// True if this disease perturbs segments of `kind`
    pub fn affects(&self, kind: VesselKind) -> bool {
        self.model.capabilities().has(kind)
    }

    /// Run the artery mutator, or report no change if the model has none
    ///
    /// The mutator works on a copy. `state` is only updated when it returns
    /// `true`.
    pub fn apply_artery(&self, ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        self.affects(VesselKind::Artery)
            && commit(state, |scratch| self.model.model().artery(&self.values, ctx, scratch))
    }

    /// Run the vein mutator, or report no change if the model has none
    pub fn apply_vein(&self, ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        self.affects(VesselKind::Vein)
            && commit(state, |scratch| self.model.model().vein(&self.values, ctx, scratch))
    }

    /// Run the capillary mutator, or report no change if the model has none
    pub fn apply_capillary(&self, ctx: &CapillaryContext<'_>, state: &mut CapillaryState) -> bool {
        self.affects(VesselKind::Capillary)
            && commit(state, |scratch| self.model.model().cap(&self.values, ctx, scratch))
    }

    /// Run the artery or vein mutator selected by `kind`
    ///
    /// Capillaries carry a different context; `VesselKind::Capillary` returns
    /// `false` here and must go through `apply_capillary`.
    pub fn apply(&self, kind: VesselKind, ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        match kind {
            VesselKind::Artery => self.apply_artery(ctx, state),
            VesselKind::Vein => self.apply_vein(ctx, state),
            VesselKind::Capillary => false,
        }
    }
}

/// Run `mutate` on a copy of `state` and keep the copy only if it reports a change
fn commit<S: Clone>(state: &mut S, mutate: impl FnOnce(&mut S) -> bool) -> bool {
    let mut scratch = state.clone();
    if mutate(&mut scratch) {
        *state = scratch;
        true
    } else {
        false
    }
}
