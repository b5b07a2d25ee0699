use percolation_game::{
    PercolationError, Topology, build_default_recurrence, build_recurrence, win_probability,
    win_probability_at, win_probability_for,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SAMPLE_SIZE: usize = 200;

fn sampled_qs(seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..SAMPLE_SIZE)
        .map(|_| rng.gen_range(0.002..0.998))
        .collect()
}

#[test]
fn recurrence_is_monotone_and_bounded_for_sampled_q() {
    for q in sampled_qs(0x5EED) {
        let seq = build_default_recurrence(q).expect("valid q");
        let values = seq.values();
        assert!(values[0].abs() < f64::EPSILON);
        assert!(
            values.windows(2).all(|w| w[1] >= w[0]),
            "P decreased for q={q}"
        );
        assert!(
            values.iter().all(|p| (0.0..=1.0).contains(p)),
            "P escaped [0,1] for q={q}"
        );
    }
}

#[test]
fn win_probability_is_a_probability() {
    for q in sampled_qs(0xBEEF) {
        for topology in [Topology::Wedge, Topology::FullGrid] {
            let value = win_probability_at(q, topology).expect("valid q");
            assert!(
                (0.0..=1.0).contains(&value),
                "{topology} win probability {value} out of range at q={q}"
            );
        }
    }
}

#[test]
fn full_grid_never_trails_wedge() {
    for q in sampled_qs(0xC0FFEE) {
        let wedge = win_probability_at(q, Topology::Wedge).expect("valid q");
        let grid = win_probability_at(q, Topology::FullGrid).expect("valid q");
        assert!(grid >= wedge, "q={q}: grid {grid} < wedge {wedge}");
    }
}

#[test]
fn wedge_partial_sums_converge_as_horizon_doubles() {
    // Increments only shrink once K reaches the order of 1/q.
    for q in [0.02, 0.1, 0.2, 0.35, 0.6, 0.9] {
        let full = percolation_game::truncation_bound(q).expect("valid q");
        let values: Vec<f64> = [full / 16, full / 8, full / 4, full / 2]
            .iter()
            .map(|&horizon| {
                let seq = build_recurrence(q, horizon).expect("valid inputs");
                win_probability(&seq, q, Topology::Wedge).expect("valid inputs")
            })
            .collect();
        let increments: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
        assert!(
            increments.windows(2).all(|w| w[1] < w[0]),
            "increments did not shrink for q={q}: {increments:?}"
        );
    }
}

#[test]
fn default_horizon_leaves_negligible_tail() {
    let q = 0.2;
    let default = win_probability_at(q, Topology::Wedge).expect("valid q");
    let seq = build_recurrence(q, 4 * percolation_game::truncation_bound(q).expect("valid q"))
        .expect("valid inputs");
    let longer = win_probability(&seq, q, Topology::Wedge).expect("valid inputs");
    assert!((default - longer).abs() < 1e-12);
}

#[test]
fn wedge_reference_at_q_005() {
    let value = win_probability_at(0.05, Topology::Wedge).expect("valid q");
    assert!(
        (value - 0.382_193_570_450_912_2).abs() < 1e-9,
        "reference drifted: {value:.15}"
    );
    // Reproducible across calls, bit for bit.
    let again = win_probability_at(0.05, Topology::Wedge).expect("valid q");
    assert_eq!(value.to_bits(), again.to_bits());
}

#[test]
fn invalid_inputs_are_rejected() {
    for q in [0.0, 1.0, 1.5, -0.1] {
        assert!(matches!(
            win_probability_at(q, Topology::Wedge),
            Err(PercolationError::InvalidParameter { .. })
        ));
        assert!(matches!(
            build_recurrence(q, 10),
            Err(PercolationError::InvalidParameter { .. })
        ));
    }
    // Representable q whose horizon is too long to build.
    assert!(matches!(
        win_probability_at(1e-300, Topology::Wedge),
        Err(PercolationError::InvalidParameter { field: "K", .. })
    ));
    assert!(matches!(
        win_probability_for(0.3, "triangular"),
        Err(PercolationError::InvalidTopology(_))
    ));
}
