//! Integration tests for the segment mutator contract.
//!
//! These tests drive the built-in and custom models the way a host would:
//! - Generation gate and resistance law of the compromise models
//! - Degenerate compromise values
//! - Missing mutators treated as no-ops
//! - A small tree walked in the host's order, serially and in parallel

use pulmo_core::models::{ArterialCompromise, VenousCompromise, COMPROMISE};
use pulmo_core::policy::{gate_threshold, OCCLUDED_RESISTANCE};
use pulmo_core::{
    default_registry, Capabilities, CapillaryContext, CapillaryState, Disease, DiseaseModel,
    Identity, ModelRegistry, ParameterSpec, PhysiologicConstants, SegmentContext, VesselKind,
    VesselState,
};

const COMPROMISES: [f64; 7] = [0.0, 1.0, 12.5, 33.0, 50.0, 90.0, 99.5];

/// Helper to bind a built-in model to a single compromise value
fn bind(name: &str, compromise: f64) -> Disease {
    let model = default_registry().require(name).expect("built-in model");
    Disease::with_values(model, &[compromise]).expect("one parameter")
}

/// Helper to build a vessel with distinguishable fields
fn vessel(r: f64) -> VesselState {
    VesselState {
        r,
        gamma: 0.9,
        phi: 0.1,
        c: 2.0,
        tone: 1.0,
        gp: 3.0,
        ppl: -5.0,
        ptp: 5.0,
        perivascular_a: 0.4,
        perivascular_b: 0.5,
        perivascular_c: 0.6,
        kz: 7.0,
    }
}

fn apply(kind: VesselKind, disease: &Disease, ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
    match kind {
        VesselKind::Artery => disease.apply_artery(ctx, state),
        VesselKind::Vein => disease.apply_vein(ctx, state),
        VesselKind::Capillary => unreachable!("capillaries use apply_capillary"),
    }
}

#[test]
fn test_proximal_segments_untouched() {
    let constants = PhysiologicConstants::default();

    for (name, kind) in [("PAH", VesselKind::Artery), ("PVOD", VesselKind::Vein)] {
        for n_gen in [5u32, 10, 16] {
            for gen in 0..=gate_threshold(n_gen) {
                for compromise in COMPROMISES {
                    let disease = bind(name, compromise);
                    let ctx = SegmentContext::new(gen, n_gen, 0, &constants);
                    let mut state = vessel(2.5);

                    assert!(
                        !apply(kind, &disease, &ctx, &mut state),
                        "{} gen {} of {} should be gated",
                        name,
                        gen,
                        n_gen
                    );
                    assert_eq!(state, vessel(2.5));
                }
            }
        }
    }
}

#[test]
fn test_distal_segments_follow_inverse_square() {
    let constants = PhysiologicConstants::default();

    for (name, kind) in [("PAH", VesselKind::Artery), ("PVOD", VesselKind::Vein)] {
        for n_gen in [5u32, 10, 16] {
            for gen in (gate_threshold(n_gen) + 1)..n_gen {
                for compromise in COMPROMISES {
                    let disease = bind(name, compromise);
                    let ctx = SegmentContext::new(gen, n_gen, 4, &constants);
                    let mut state = vessel(2.5);

                    assert!(apply(kind, &disease, &ctx, &mut state));

                    let area = (100.0 - compromise) / 100.0;
                    let expected = 2.5 / (area * area);
                    assert!(
                        (state.r - expected).abs() <= 1e-9 * expected,
                        "{} compromise {}: got {}, expected {}",
                        name,
                        compromise,
                        state.r,
                        expected
                    );

                    // Nothing but resistance changes
                    assert_eq!(VesselState { r: 2.5, ..state }, vessel(2.5));
                }
            }
        }
    }
}

#[test]
fn test_resistance_increases_with_compromise() {
    let constants = PhysiologicConstants::default();
    let ctx = SegmentContext::new(9, 10, 0, &constants);

    let mut previous = 0.0;
    for step in 0..100 {
        let compromise = step as f64 * 0.99;
        let mut state = vessel(1.0);
        assert!(bind("PAH", compromise).apply_artery(&ctx, &mut state));
        assert!(
            state.r > previous,
            "resistance should grow: {} at compromise {}",
            state.r,
            compromise
        );
        previous = state.r;
    }
}

#[test]
fn test_zero_compromise_is_identity() {
    let constants = PhysiologicConstants::default();
    let ctx = SegmentContext::new(9, 10, 0, &constants);

    let mut state = vessel(1.2345);
    assert!(bind("PVOD", 0.0).apply_vein(&ctx, &mut state));
    assert_eq!(state.r, 1.2345);
}

#[test]
fn test_full_compromise_saturates() {
    let constants = PhysiologicConstants::default();
    let ctx = SegmentContext::new(9, 10, 0, &constants);

    let mut artery = vessel(1.0);
    assert!(bind("PAH", 100.0).apply_artery(&ctx, &mut artery));
    assert_eq!(artery.r, OCCLUDED_RESISTANCE);
    assert!(artery.r.is_finite());

    let mut vein = vessel(1.0);
    assert!(bind("PVOD", 100.0).apply_vein(&ctx, &mut vein));
    assert_eq!(vein.r, OCCLUDED_RESISTANCE);

    // Gate still applies at the degenerate value
    let proximal = SegmentContext::new(8, 10, 0, &constants);
    let mut state = vessel(1.0);
    assert!(!bind("PAH", 100.0).apply_artery(&proximal, &mut state));
    assert_eq!(state.r, 1.0);
}

#[test]
fn test_gate_boundary_at_ten_generations() {
    let constants = PhysiologicConstants::default();
    let disease = bind("PAH", 50.0);

    let mut at_threshold = vessel(1.0);
    let ctx = SegmentContext::new(8, 10, 0, &constants);
    assert!(!disease.apply_artery(&ctx, &mut at_threshold));
    assert_eq!(at_threshold.r, 1.0);

    let mut past_threshold = vessel(1.0);
    let ctx = SegmentContext::new(9, 10, 0, &constants);
    assert!(disease.apply_artery(&ctx, &mut past_threshold));
    assert!((past_threshold.r - 4.0).abs() < 1e-12);
}

#[test]
fn test_compromise_models_declare_one_parameter() {
    let models: [&dyn DiseaseModel; 2] = [&ArterialCompromise, &VenousCompromise];
    for model in models {
        let params = model.parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].short_name, COMPROMISE);
        assert_eq!(params[0].range.as_deref(), Some("0 to 100"));
    }
}

#[test]
fn test_no_cap_mutator_leaves_capillaries() {
    let constants = PhysiologicConstants::default();

    for name in ["PAH", "PVOD"] {
        for compromise in [0.0, 50.0, 100.0, -20.0, f64::NAN] {
            let disease = bind(name, compromise);
            for idx in [0usize, 1, 999] {
                let ctx = CapillaryContext::new(idx, 1000, 10, &constants);
                let mut cap = CapillaryState { krc: 342.75, alpha: 0.02, ho: 5.0 };
                assert!(!disease.apply_capillary(&ctx, &mut cap));
                assert_eq!(cap, CapillaryState { krc: 342.75, alpha: 0.02, ho: 5.0 });
            }
        }
    }
}

/// Capillary-only model that stiffens recruitment everywhere
struct CapillaryStiffening;

impl DiseaseModel for CapillaryStiffening {
    fn name(&self) -> Identity {
        Identity::short("Stiff capillaries")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        vec![ParameterSpec::new("Factor").with_range("1 to 5").with_default(2.0)]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CAPILLARY
    }

    fn cap(&self, params: &[f64], _ctx: &CapillaryContext<'_>, state: &mut CapillaryState) -> bool {
        if params[0] == 1.0 {
            return false;
        }
        state.krc *= params[0];
        true
    }
}

/// Declares an artery mutator but omits it from its capabilities
struct UndeclaredArtery;

impl DiseaseModel for UndeclaredArtery {
    fn name(&self) -> Identity {
        Identity::short("Undeclared")
    }

    fn parameters(&self) -> Vec<ParameterSpec> {
        Vec::new()
    }

    fn artery(&self, _params: &[f64], _ctx: &SegmentContext<'_>, state: &mut VesselState) -> bool {
        state.r = 0.0;
        true
    }
}

#[test]
fn test_custom_capillary_model() {
    let mut registry = ModelRegistry::new();
    let model = registry.register(CapillaryStiffening).unwrap();
    assert!(registry.validate().is_empty());

    let disease = Disease::new(model);
    assert_eq!(disease.values(), &[2.0]);

    let constants = PhysiologicConstants::default();
    let ctx = CapillaryContext::new(0, 1, 10, &constants);
    let mut cap = CapillaryState { krc: 3.0, alpha: 1.0, ho: 1.0 };
    assert!(disease.apply_capillary(&ctx, &mut cap));
    assert_eq!(cap.krc, 6.0);

    let seg = SegmentContext::new(9, 10, 0, &constants);
    let mut state = vessel(1.0);
    assert!(!disease.apply_artery(&seg, &mut state));
    assert!(!disease.apply_vein(&seg, &mut state));
    assert_eq!(state, vessel(1.0));
}

#[test]
fn test_capability_set_gates_dispatch() {
    let mut registry = ModelRegistry::new();
    let model = registry.register(UndeclaredArtery).unwrap();
    let disease = Disease::new(model);

    let constants = PhysiologicConstants::default();
    let ctx = SegmentContext::new(9, 10, 0, &constants);
    let mut state = vessel(1.0);
    assert!(!disease.affects(VesselKind::Artery));
    assert!(!disease.apply_artery(&ctx, &mut state));
    assert_eq!(state.r, 1.0);
}

/// Minimal host tree: `1 << gen` segments per generation
fn build_tree(n_gen: u32) -> Vec<Vec<VesselState>> {
    (0..n_gen)
        .map(|gen| vec![vessel(1.0 + gen as f64); 1usize << gen])
        .collect()
}

fn walk(disease: &Disease, tree: &mut [Vec<VesselState>], constants: &PhysiologicConstants) -> usize {
    let n_gen = tree.len() as u32;
    let mut perturbed = 0;
    for (gen, segments) in tree.iter_mut().enumerate() {
        let n_vessels = segments.len();
        for (idx, state) in segments.iter_mut().enumerate() {
            let ctx = SegmentContext::new(gen as u32, n_gen, idx, constants).with_vessel_count(n_vessels);
            if disease.apply_artery(&ctx, state) {
                perturbed += 1;
            }
        }
    }
    perturbed
}

#[test]
fn test_tree_walk_perturbs_distal_fifth() {
    let constants = PhysiologicConstants::default();
    let disease = bind("PAH", 30.0);
    let mut tree = build_tree(10);

    let perturbed = walk(&disease, &mut tree, &constants);

    // Only generation 9 lies past 4 * 10 / 5 = 8
    assert_eq!(perturbed, 1 << 9);
    for (gen, segments) in tree.iter().enumerate() {
        let base = 1.0 + gen as f64;
        for state in segments {
            if gen > 8 {
                assert!((state.r - base / 0.49).abs() < 1e-9);
            } else {
                assert_eq!(state.r, base);
            }
        }
    }
}

#[test]
fn test_parallel_walk_matches_serial() {
    let constants = PhysiologicConstants::default();
    let disease = bind("PVOD", 65.0);

    let mut serial = build_tree(12);
    let n_gen = serial.len() as u32;
    for (gen, segments) in serial.iter_mut().enumerate() {
        for (idx, state) in segments.iter_mut().enumerate() {
            let ctx = SegmentContext::new(gen as u32, n_gen, idx, &constants);
            disease.apply_vein(&ctx, state);
        }
    }

    let mut parallel = build_tree(12);
    std::thread::scope(|scope| {
        for (gen, segments) in parallel.iter_mut().enumerate() {
            let disease = &disease;
            let constants = &constants;
            scope.spawn(move || {
                for (idx, state) in segments.iter_mut().enumerate() {
                    let ctx = SegmentContext::new(gen as u32, n_gen, idx, constants);
                    disease.apply_vein(&ctx, state);
                }
            });
        }
    });

    assert_eq!(serial, parallel);
}
