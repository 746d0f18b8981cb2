//! Model file regression test
//!
//! Writes templates built from random writings, reads them back and checks
//! grouping, ordering, alignment and rejection of corrupt files.

use inkmatch_recog::features::{FeatureKind, MAX_FRAME_WIDTH, extract};
use inkmatch_recog::meta::TrainingMeta;
use inkmatch_recog::model::{
    MODEL_ALIGNMENT, MODEL_MAGIC, Model, Template, write_model, write_model_to_writer,
};
use inkmatch_recog::{RecogError, RecognizerConfig};
use inkmatch_test::{RegParams, SampleGen};

fn random_templates(sg: &mut SampleGen, count: usize) -> Vec<Template> {
    (0..count)
        .map(|i| {
            let nstrokes = sg.range(1, 4) as usize;
            let w = sg.writing(nstrokes, 12);
            Template {
                label: char::from_u32(0x4E00 + i as u32).unwrap_or('?'),
                stroke_count: nstrokes as u32,
                features: extract(FeatureKind::Xy, &w),
            }
        })
        .collect()
}

#[test]
fn model_reg() {
    let mut rp = RegParams::new("model");
    let mut sg = SampleGen::new(99);
    let config = RecognizerConfig::default();

    // --- Test 1: Write and reopen ---
    let templates = random_templates(&mut sg, 24);
    let path = rp.output_path("random.model");
    let _ = std::fs::remove_file(rp.output_path("random.model.meta"));
    let summary = write_model(&templates, 2, 50, &path).expect("write_model");
    rp.compare_values(24.0, summary.template_count as f64, 0.0);
    rp.compare_values(0.0, summary.skipped as f64, 0.0);

    let model = Model::open(&path, &config).expect("open model");
    rp.compare_values(24.0, model.len() as f64, 0.0);
    rp.compare_values(summary.group_count as f64, model.groups().len() as f64, 0.0);
    rp.compare_values(2.0, model.header().feature_dimension as f64, 0.0);
    rp.compare_values(50.0, model.header().downsample_threshold as f64, 0.0);

    let bytes = std::fs::read(&path).expect("read model bytes");
    rp.compare_strings(&MODEL_MAGIC.to_le_bytes(), &bytes[..4]);

    // --- Test 1b: Exact layout of a small model ---
    let small = vec![
        Template {
            label: 'a',
            stroke_count: 2,
            features: vec![3.0, 4.0, 0.0, 0.0, 5.0, 6.0, 0.0, 0.0],
        },
        Template {
            label: 'b',
            stroke_count: 1,
            features: vec![1.0, 2.0, 0.0, 0.0],
        },
    ];
    let mut expected: Vec<u8> = Vec::new();
    // header, template table, group table
    for v in [MODEL_MAGIC, 2, 2, 2, 50, 'b' as u32, 1, 'a' as u32, 2, 1, 1, 80, 0, 2, 1, 96, 0] {
        expected.extend_from_slice(&v.to_le_bytes());
    }
    expected.resize(80, 0);
    for v in [1.0f32, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0, 6.0, 0.0, 0.0] {
        expected.extend_from_slice(&v.to_le_bytes());
    }
    let mut actual = Vec::new();
    write_model_to_writer(&small, 2, 50, &mut actual).expect("write small model");
    rp.compare_strings(&expected, &actual);

    // --- Test 2: Grouping and ordering ---
    eprintln!("=== Groups ===");
    let groups = model.groups();
    let ascending = groups.windows(2).all(|g| g[0].stroke_count < g[1].stroke_count);
    rp.compare_bool(true, ascending);

    let mut covered = 0;
    for group in groups {
        let frames: Vec<u32> = group
            .template_range()
            .map(|i| model.templates()[i].frame_count)
            .collect();
        rp.compare_bool(true, frames.windows(2).all(|f| f[0] <= f[1]));
        rp.compare_values(
            group.offset as f64,
            model.template_offset(group.first_template).unwrap() as f64,
            0.0,
        );

        let expected = templates
            .iter()
            .filter(|t| t.stroke_count == group.stroke_count)
            .count();
        rp.compare_values(expected as f64, group.template_count as f64, 0.0);
        covered += group.template_count as usize;

        let found = model.group_for_stroke_count(group.stroke_count as usize);
        rp.compare_bool(true, found == Some(group));
    }
    rp.compare_values(24.0, covered as f64, 0.0);
    rp.compare_bool(true, model.group_for_stroke_count(0).is_none());
    rp.compare_bool(true, model.group_for_stroke_count(9).is_none());

    // --- Test 3: Alignment and data round trip ---
    eprintln!("=== Data ===");
    for (i, entry) in model.templates().iter().enumerate() {
        let offset = model.template_offset(i).unwrap();
        rp.compare_values(0.0, (offset % MODEL_ALIGNMENT) as f64, 0.0);

        let original = templates.iter().find(|t| t.label == entry.label).unwrap();
        let data = model.template_data(i).unwrap();
        rp.compare_values(original.frame_count() as f64, entry.frame_count as f64, 0.0);
        rp.compare_bool(true, data == original.features.as_slice());

        let raw: Vec<f32> = bytes[offset..offset + data.len() * 4]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        rp.compare_bool(true, raw == data);
    }

    // --- Test 4: Determinism ---
    let mut again = Vec::new();
    write_model_to_writer(&templates, 2, 50, &mut again).expect("write again");
    rp.compare_strings(&bytes, &again);

    // --- Test 5: Corrupt and incompatible files ---
    eprintln!("=== Rejection ===");
    let mut bad = bytes.clone();
    bad[1] ^= 0x55;
    rp.compare_bool(
        true,
        matches!(Model::from_bytes(&bad, &config), Err(RecogError::Load(_))),
    );

    for len in [0, 12, 40, bytes.len() - 4] {
        let res = Model::from_bytes(&bytes[..len], &config);
        rp.compare_bool(true, matches!(res, Err(RecogError::Load(_))));
    }

    // Misaligned group offset
    let mut bad = bytes.clone();
    let ntemplates = model.len();
    let first_group = 20 + ntemplates * 8;
    let offset = u32::from_le_bytes(bad[first_group + 8..first_group + 12].try_into().unwrap());
    bad[first_group + 8..first_group + 12].copy_from_slice(&(offset + 4).to_le_bytes());
    rp.compare_bool(
        true,
        matches!(Model::from_bytes(&bad, &config), Err(RecogError::Load(_))),
    );

    let delta = RecognizerConfig::new(FeatureKind::XyDelta);
    rp.compare_bool(
        true,
        matches!(Model::open(&path, &delta), Err(RecogError::Load(_))),
    );

    let missing = rp.output_path("missing.model");
    let _ = std::fs::remove_file(&missing);
    rp.compare_bool(
        true,
        matches!(Model::open(&missing, &config), Err(RecogError::Load(_))),
    );

    // --- Test 6: Opening through the side-car ---
    let meta_path = rp.output_path("random.model.meta");
    let mut meta = TrainingMeta::with_names("Random", "rnd");
    meta.set("path", "model.random.model");
    meta.write_to_file(&meta_path).expect("write meta");
    let via_meta = Model::open_from_meta(&meta_path).expect("open_from_meta");
    rp.compare_values(24.0, via_meta.len() as f64, 0.0);

    meta.set("feature", "xy-delta");
    meta.write_to_file(&meta_path).expect("rewrite meta");
    rp.compare_bool(
        true,
        matches!(Model::open_from_meta(&meta_path), Err(RecogError::Load(_))),
    );

    meta.set("feature", "spline");
    meta.write_to_file(&meta_path).expect("rewrite meta");
    rp.compare_bool(
        true,
        matches!(
            Model::open_from_meta(&meta_path),
            Err(RecogError::InvalidOption { .. })
        ),
    );

    // --- Test 7: Side-car transform must match the requested one ---
    eprintln!("=== Transform check ===");
    let delta_path = rp.output_path("delta.model");
    write_model(&templates, 2, 50, &delta_path).expect("write delta model");
    let mut delta_meta = TrainingMeta::with_names("Delta", "dl");
    delta_meta.set("feature", "delta");
    delta_meta
        .write_to_file(rp.output_path("delta.model.meta"))
        .expect("write delta meta");

    // Same dimension as xy, so only the side-car tells them apart.
    let xy_open = Model::open(&delta_path, &RecognizerConfig::new(FeatureKind::Xy));
    rp.compare_bool(true, matches!(xy_open, Err(RecogError::Load(_))));
    let delta_open = Model::open(&delta_path, &RecognizerConfig::new(FeatureKind::Delta));
    rp.compare_bool(true, delta_open.is_ok());
    let via_meta = Model::open_from_meta(rp.output_path("delta.model.meta"));
    rp.compare_bool(
        true,
        via_meta.is_ok_and(|m| m.config().feature == FeatureKind::Delta),
    );

    // --- Test 8: Frame width ---
    rp.compare_values(16.0, MODEL_ALIGNMENT as f64, 0.0);
    rp.compare_values(4.0, MAX_FRAME_WIDTH as f64, 0.0);

    assert!(rp.cleanup(), "model regression test failed");
}
