//! DTW distance regression test
//!
//! Symmetry, self-distance and warping behavior of the distance on
//! extracted feature sequences of random writings.

use inkmatch_recog::dtw::distance;
use inkmatch_recog::features::{FeatureKind, MAX_FRAME_WIDTH, extract};
use inkmatch_test::{RegParams, SampleGen};

#[test]
fn dtw_reg() {
    let mut rp = RegParams::new("dtw");
    let mut sg = SampleGen::new(7);

    // --- Test 1: Symmetry and self-distance ---
    eprintln!("=== Symmetry ===");
    for kind in FeatureKind::ALL {
        for _ in 0..10 {
            let a = extract(kind, &sg.writing(2, 25));
            let b = extract(kind, &sg.writing(2, 25));

            let ab = distance(&a, &b, MAX_FRAME_WIDTH).expect("distance a-b");
            let ba = distance(&b, &a, MAX_FRAME_WIDTH).expect("distance b-a");
            rp.compare_values(ab as f64, ba as f64, 0.0);
            rp.compare_bool(true, ab >= 0.0);

            let aa = distance(&a, &a, MAX_FRAME_WIDTH).expect("distance a-a");
            rp.compare_values(0.0, aa as f64, 0.0);
        }
    }

    // A repeated frame warps onto its single counterpart at no cost.
    let a = [0.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 6.0, 8.0, 0.0, 0.0];
    let b = [0.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 6.0, 8.0, 0.0, 0.0];
    let d = distance(&a, &b, MAX_FRAME_WIDTH).expect("known distance");
    rp.compare_values(0.0, d as f64, 0.0);
    // Best path (0,0) (1,1) (2,1) (3,2) costs 0 + 5 + 5 + 0.
    let c = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 6.0, 8.0, 0.0, 0.0];
    let d = distance(&a, &c, MAX_FRAME_WIDTH).expect("known distance");
    rp.compare_values(10.0, d as f64, 0.0);

    // --- Test 2: Jitter stays closer than an unrelated writing ---
    eprintln!("=== Jitter ===");
    let base = sg.writing(1, 40);
    let near = sg.jitter(&base, 2);
    let fb = extract(FeatureKind::Xy, &base);
    let fnear = extract(FeatureKind::Xy, &near);
    let d_near = distance(&fb, &fnear, MAX_FRAME_WIDTH).expect("distance near");
    let d_self = distance(&fb, &fb, MAX_FRAME_WIDTH).expect("distance self");
    rp.compare_bool(true, d_self <= d_near);
    // Each frame moves by at most 2*sqrt(2).
    let bound = (fb.len() / MAX_FRAME_WIDTH) as f32 * 2.0 * std::f32::consts::SQRT_2;
    rp.compare_bool(true, d_near <= bound);

    // --- Test 3: Padded and logical distances agree ---
    let w1 = sg.writing(1, 10);
    let w2 = sg.writing(1, 10);
    let p1 = extract(FeatureKind::Xy, &w1);
    let p2 = extract(FeatureKind::Xy, &w2);
    let logical = |f: &[f32]| -> Vec<f32> {
        f.chunks(MAX_FRAME_WIDTH).flat_map(|c| [c[0], c[1]]).collect()
    };
    let padded = distance(&p1, &p2, MAX_FRAME_WIDTH).expect("padded");
    let unpadded = distance(&logical(&p1), &logical(&p2), 2).expect("logical");
    rp.compare_values(padded as f64, unpadded as f64, 1e-3);

    // --- Test 4: Degenerate inputs ---
    let one = [1.0, 2.0, 0.0, 0.0];
    rp.compare_bool(true, distance(&one, &p1, MAX_FRAME_WIDTH).unwrap().is_infinite());
    rp.compare_bool(true, distance(&[], &p1, MAX_FRAME_WIDTH).unwrap().is_infinite());
    rp.compare_bool(true, distance(&one[..3], &p1, MAX_FRAME_WIDTH).is_err());
    rp.compare_bool(true, distance(&one, &one, 0).is_err());

    assert!(rp.cleanup(), "dtw regression test failed");
}
