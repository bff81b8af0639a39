//! Core domain types for the disease-model boundary.
//!
//! This module defines what crosses between a host simulator and a disease
//! model:
//! - Model identity and declared parameters
//! - Read-only segment context and ambient physiology
//! - Mutable per-segment state for vessels and capillaries
//! - Vessel kinds and capability sets

use crate::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Descriptor Types
// ============================================================================

/// How a model names itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    /// A single short label
    Short(String),
    /// Short label plus a long description
    Described { short: String, long: String },
}

impl Identity {
    pub fn short(label: impl Into<String>) -> Self {
        Identity::Short(label.into())
    }

    pub fn described(short: impl Into<String>, long: impl Into<String>) -> Self {
        Identity::Described {
            short: short.into(),
            long: long.into(),
        }
    }

    /// The short label used for lookup and display
    pub fn label(&self) -> &str {
        match self {
            Identity::Short(label) => label,
            Identity::Described { short, .. } => short,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Identity::Short(_) => None,
            Identity::Described { long, .. } => Some(long),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One declared model parameter
///
/// Declaration order is binding order: the n-th spec supplies the n-th value
/// passed to every mutator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub short_name: String,
    /// Advisory range text, e.g. "0 to 100". `None` means the host cannot
    /// estimate this parameter from outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            range: None,
            default_value: None,
            description: None,
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_default(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parsed range, if one is declared and well formed
    pub fn parsed_range(&self) -> Option<Range> {
        self.range.as_deref().and_then(|r| Range::parse(r).ok())
    }

    /// True if a host may sweep or estimate this parameter
    pub fn is_estimable(&self) -> bool {
        self.parsed_range().is_some()
    }

    /// Value bound before the host supplies one
    pub fn initial_value(&self) -> f64 {
        self.default_value.unwrap_or(0.0)
    }
}

// ============================================================================
// Read-only Context
// ============================================================================

/// Whole-tree physiologic constants, supplied by the host and never mutated
/// by a model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicConstants {
    /// Lung height (cm)
    pub lung_height: f64,
    /// Cardiac output (l/min)
    pub flow: f64,
    /// Left atrial pressure (mmHg)
    pub lap: f64,
    /// Alveolar pressure (mmHg)
    pub pal: f64,
    /// Pleural pressure (mmHg)
    pub ppl: f64,
    /// Transpulmonary pressure (mmHg)
    pub ptp: f64,
    /// Pulmonary arterial pressure (mmHg), once solved
    #[serde(default)]
    pub pap: Option<f64>,
    /// Solver tolerance
    pub tolerance: f64,
    #[serde(default)]
    pub mv: Option<f64>,
    #[serde(default)]
    pub cl: Option<f64>,
    /// Patient height (cm)
    pub patient_height: f64,
    /// Patient weight (kg)
    pub patient_weight: f64,
}

/// Cardiac index used to derive the default flow (l/min/m²)
pub const DEFAULT_CARDIAC_INDEX: f64 = 3.378_012_94;

/// Body surface area (m²), height in cm and weight in kg
pub fn body_surface_area(height_cm: f64, weight_kg: f64) -> f64 {
    (height_cm * weight_kg).sqrt() / 60.0
}

impl Default for PhysiologicConstants {
    fn default() -> Self {
        let patient_height = 175.0;
        let patient_weight = 67.375;
        let pal = 0.0;
        let ppl = -5.0;

        Self {
            lung_height: 20.0,
            flow: DEFAULT_CARDIAC_INDEX * body_surface_area(patient_height, patient_weight),
            lap: 5.0,
            pal,
            ppl,
            ptp: pal - ppl,
            pap: None,
            tolerance: 0.0001,
            mv: None,
            cl: None,
            patient_height,
            patient_weight,
        }
    }
}

/// Read-only position of an artery or vein segment
///
/// Models receive this by shared reference; `gen` and `vessel_idx` cannot be
/// written through it.
#[derive(Clone, Copy, Debug)]
pub struct SegmentContext<'a> {
    /// Generation index, 0 = root
    pub gen: u32,
    /// Total generations in the tree
    pub n_gen: u32,
    /// Index within the generation
    pub vessel_idx: usize,
    /// Segments in this generation
    pub n_vessels: usize,
    pub constants: &'a PhysiologicConstants,
}

impl<'a> SegmentContext<'a> {
    pub fn new(gen: u32, n_gen: u32, vessel_idx: usize, constants: &'a PhysiologicConstants) -> Self {
        Self {
            gen,
            n_gen,
            vessel_idx,
            n_vessels: 0,
            constants,
        }
    }

    pub fn with_vessel_count(mut self, n_vessels: usize) -> Self {
        self.n_vessels = n_vessels;
        self
    }
}

/// Read-only position of a capillary
///
/// Capillaries carry no generation index.
#[derive(Clone, Copy, Debug)]
pub struct CapillaryContext<'a> {
    pub vessel_idx: usize,
    pub n_vessels: usize,
    pub n_gen: u32,
    pub constants: &'a PhysiologicConstants,
}

impl<'a> CapillaryContext<'a> {
    pub fn new(vessel_idx: usize, n_vessels: usize, n_gen: u32, constants: &'a PhysiologicConstants) -> Self {
        Self {
            vessel_idx,
            n_vessels,
            n_gen,
            constants,
        }
    }
}

// ============================================================================
// Mutable Segment State
// ============================================================================

/// Physical fields of an artery or vein segment a model may rewrite
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    /// Resistance (mmHg·min/l)
    pub r: f64,
    pub gamma: f64,
    pub phi: f64,
    /// Wave-speed parameter
    pub c: f64,
    pub tone: f64,
    /// Gravity pressure term
    pub gp: f64,
    pub ppl: f64,
    pub ptp: f64,
    pub perivascular_a: f64,
    pub perivascular_b: f64,
    pub perivascular_c: f64,
    /// Zone coefficient
    pub kz: f64,
}

/// Physical fields of a capillary a model may rewrite
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CapillaryState {
    /// Recruitment resistance coefficient
    pub krc: f64,
    pub alpha: f64,
    pub ho: f64,
}

// ============================================================================
// Vessel Kinds and Capabilities
// ============================================================================

/// Kind of segment a mutator targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselKind {
    Artery,
    Vein,
    Capillary,
}

impl VesselKind {
    pub const ALL: [VesselKind; 3] = [VesselKind::Artery, VesselKind::Vein, VesselKind::Capillary];

    fn bit(self) -> u8 {
        match self {
            VesselKind::Artery => 0b001,
            VesselKind::Vein => 0b010,
            VesselKind::Capillary => 0b100,
        }
    }
}

/// Which of the artery/vein/capillary mutators a model implements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const ARTERY: Capabilities = Capabilities(0b001);
    pub const VEIN: Capabilities = Capabilities(0b010);
    pub const CAPILLARY: Capabilities = Capabilities(0b100);
    pub const ALL: Capabilities = Capabilities(0b111);

    pub fn of(kind: VesselKind) -> Self {
        Capabilities(kind.bit())
    }

    pub fn with(self, kind: VesselKind) -> Self {
        Capabilities(self.0 | kind.bit())
    }

    pub fn has(self, kind: VesselKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn kinds(self) -> impl Iterator<Item = VesselKind> {
        VesselKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Self) -> Self {
        Capabilities(self.0 | rhs.0)
    }
}

impl Serialize for Capabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.kinds())
    }
}
