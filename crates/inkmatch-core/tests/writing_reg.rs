//! Writing regression test
//!
//! Fixture loading, text serialization, normalization and resampling of
//! whole writings.

use inkmatch_core::{NORMALIZE_PROPORTION, Writing};
use inkmatch_test::{RegParams, SampleGen, load_test_writing};

#[test]
fn writing_reg() {
    let mut rp = RegParams::new("writing");

    // --- Test 1: Fixtures ---
    let ichi = load_test_writing("ichi1.wrt").expect("load ichi1.wrt");
    let san = load_test_writing("san1.wrt").expect("load san1.wrt");
    rp.compare_values(1.0, ichi.stroke_count() as f64, 0.0);
    rp.compare_values(7.0, ichi.point_count() as f64, 0.0);
    rp.compare_values(3.0, san.stroke_count() as f64, 0.0);
    rp.compare_values(1000.0, san.width() as f64, 0.0);

    let timed = load_test_writing("ichi2.wrt").expect("load ichi2.wrt");
    let first = timed.strokes()[0].first();
    rp.compare_values(0.4, first.pressure.unwrap_or(0.0) as f64, 1e-6);
    rp.compare_bool(true, first.xtilt.is_none());
    rp.compare_values(83.0, timed.strokes()[0].duration().unwrap_or(0) as f64, 0.0);

    // --- Test 2: Text serialization ---
    for w in [&ichi, &san, &timed] {
        let bytes = w.write_to_bytes().expect("write writing");
        let back = Writing::read_from_bytes(&bytes).expect("read writing");
        rp.compare_writings(w, &back);
        rp.write_data_and_check(&bytes, "wrt")
            .expect("write_data_and_check");
    }

    let path = rp.output_path("san.wrt");
    san.write_to_file(&path).expect("write file");
    let back = Writing::read_from_file(&path).expect("read file");
    rp.compare_writings(&san, &back);

    rp.compare_bool(true, Writing::read_from_bytes(b"\nWriting Version 9\n").is_err());

    // --- Test 3: Normalization ---
    eprintln!("=== Normalize ===");
    let target = 1000.0 * NORMALIZE_PROPORTION as f64;
    let mut n = san.clone();
    n.normalize();
    let (x, y, w, h) = n.size().unwrap();
    rp.compare_values(target, w as f64, 1.0);
    rp.compare_values(target, h as f64, 1.0);
    rp.compare_values(1000.0, (2 * x + w) as f64, 1.0);
    rp.compare_values(1000.0, (2 * y + h) as f64, 1.0);

    // A horizontal bar keeps its thickness.
    let mut bar = ichi.clone();
    let (_, _, _, h0) = bar.size().unwrap();
    bar.normalize();
    let (_, y, w, h) = bar.size().unwrap();
    rp.compare_values(target, w as f64, 1.0);
    rp.compare_values(h0 as f64, h as f64, 0.0);
    rp.compare_values(1000.0, (2 * y + h) as f64, 1.0);

    let mut blank = Writing::new();
    blank.normalize();
    rp.compare_bool(true, blank.is_empty());

    // --- Test 4: Resampling keeps stroke structure ---
    eprintln!("=== Resample ===");
    let mut sg = SampleGen::new(4242);
    for nstrokes in 1..=4 {
        let original = sg.writing(nstrokes, 30);
        let mut w = original.clone();
        w.normalize();
        w.downsample(50);
        rp.compare_values(nstrokes as f64, w.stroke_count() as f64, 0.0);
        rp.compare_bool(true, w.point_count() <= original.point_count());

        w.upsample(20).expect("upsample");
        let within = w.strokes().iter().all(|s| {
            s.points()
                .windows(2)
                .all(|p| p[0].distance(&p[1]) <= 20.0)
        });
        rp.compare_bool(true, within);
    }

    assert!(rp.cleanup(), "writing regression test failed");
}
