//! End-to-end segmentation regression test
//!
//! Run with:
//! ```
//! cargo test -p spotseg --test pipeline_reg
//! ```

use spotseg::io::{DatasetSession, JsonDataset, SpotList};
use spotseg::pipeline::{PipelineError, PipelineOptions, run, segment_region};
use spotseg::region::RegionError;
use spotseg::transform::TransformError;
use spotseg_test::{RegParams, SyntheticDataset, load_test_dataset, test_data_path};
use tempfile::TempDir;

/// Copy a checked-in dataset into a scratch directory
fn scratch_copy(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::copy(test_data_path(name), &path).expect("copy dataset");
    path
}

#[test]
fn pipeline_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("pipeline");

    let dir = TempDir::new().expect("tempdir");
    let path = scratch_copy(&dir, "two_slides.json");
    let options = PipelineOptions::default();

    let mut session = DatasetSession::open(&path).expect("open");
    let (id, report) = run(
        session.dataset_mut().expect("dataset"),
        "cell_roi",
        "cells",
        &options,
        None,
    )
    .expect("run");
    session.close().expect("close");

    // Index 1-3: two segments over six spots in a 7x3 frame
    rp.compare_values(1.0, f64::from(id), 0.0);
    rp.compare_values(2.0, report.segment_count() as f64, 0.0);
    rp.compare_values(6.0, report.spot_count() as f64, 0.0);
    assert_eq!((report.width, report.height), (7, 3));
    assert_eq!(report.size_range(), Some((2, 4)));

    // The diagonal chain is one segment, the column pair another
    let a = &report.assignment;
    assert!([2, 3, 4, 5].iter().all(|id| a[id] == 1));
    assert_eq!((a[&6], a[&7]), (2, 2));

    // Index 4: the label is persisted
    let reloaded = JsonDataset::read_from_file(&path).expect("reload");
    let label = reloaded.label("cells").expect("label written");
    rp.compare_values(6.0, label.spot_labels.len() as f64, 0.0);
    assert_eq!(&label.spot_labels, a);

    // Index 5: golden dump of the written label
    let dump = label_dump(&label.spot_labels);
    rp.write_data_and_check(dump.as_bytes(), "txt")
        .expect("write label dump");

    // Index 6: a second region on the other raster
    let mut dataset = reloaded;
    let (id, report) = run(&mut dataset, "tumor", "tumor_segments", &options, None).expect("run");
    rp.compare_values(2.0, f64::from(id), 0.0);
    rp.compare_values(2.0, report.segment_count() as f64, 0.0);
    assert_eq!(report.assignment[&9], report.assignment[&11]);
    assert_ne!(report.assignment[&9], report.assignment[&12]);

    assert!(rp.cleanup(), "pipeline regression test failed");
}

fn label_dump(labels: &spotseg::LabelAssignment) -> String {
    labels.iter().map(|(id, l)| format!("{id} {l}\n")).collect()
}

#[test]
fn pipeline_spot_list_reg() {
    let mut rp = RegParams::new("pipeline_spot_list");

    let dataset = load_test_dataset("two_slides.json").expect("dataset");
    let list = SpotList::read_from_file(test_data_path("two_slides_spots.txt")).expect("list");
    rp.compare_values(12.0, list.len() as f64, 0.0);

    let options = PipelineOptions::default();
    let from_list =
        segment_region(&dataset, "cell_roi", &options, Some(&list)).expect("spot list run");
    let from_transform = segment_region(&dataset, "cell_roi", &options, None).expect("transform");

    // Both coordinate sources give the same segmentation
    rp.compare_values(
        from_transform.segment_count() as f64,
        from_list.segment_count() as f64,
        0.0,
    );
    assert_eq!(from_list.assignment, from_transform.assignment);

    // A list that does not cover the population is rejected
    let short = SpotList::read_from_str("h\nh\n0 0 R0X1Y1 0\n").expect("short list");
    let err = segment_region(&dataset, "cell_roi", &options, Some(&short)).unwrap_err();
    let rejected = matches!(err, PipelineError::Io(_));
    rp.compare_values(1.0, f64::from(u8::from(rejected)), 0.0);

    assert!(rp.cleanup(), "pipeline_spot_list regression test failed");
}

#[test]
fn pipeline_failures_reg() {
    let mut rp = RegParams::new("pipeline_failures");
    let options = PipelineOptions::default();

    // Singular transform: nothing is written
    let dir = TempDir::new().expect("tempdir");
    let path = scratch_copy(&dir, "singular.json");
    let before = std::fs::read(&path).expect("read");
    let mut dataset = JsonDataset::read_from_file(&path).expect("open");
    let err = run(&mut dataset, "cell", "cells", &options, None).unwrap_err();
    let singular = matches!(
        err,
        PipelineError::Transform(TransformError::SingularTransform { .. })
    );
    rp.compare_values(1.0, f64::from(u8::from(singular)), 0.0);
    rp.compare_strings(&before, &std::fs::read(&path).expect("read"));
    assert!(dataset.label("cells").is_none());

    // Ambiguous region name
    let path = scratch_copy(&dir, "two_slides.json");
    let mut dataset = JsonDataset::read_from_file(&path).expect("open");
    let err = run(&mut dataset, "test_region", "x", &options, None).unwrap_err();
    let ambiguous = matches!(
        err,
        PipelineError::Region(RegionError::AmbiguousOrMissingRegion { .. })
    );
    rp.compare_values(1.0, f64::from(u8::from(ambiguous)), 0.0);

    // A path suffix disambiguates it
    let (_, report) =
        run(&mut dataset, "slide1/test_region", "x", &options, None).expect("suffix run");
    rp.compare_values(2.0, report.segment_count() as f64, 0.0);

    // Duplicate label name
    let err = run(&mut dataset, "cell_roi", "x", &options, None).unwrap_err();
    let duplicate = matches!(err, PipelineError::Io(spotseg::io::IoError::DuplicateLabel(_)));
    rp.compare_values(1.0, f64::from(u8::from(duplicate)), 0.0);

    assert!(rp.cleanup(), "pipeline_failures regression test failed");
}

#[test]
fn pipeline_synthetic_reg() {
    let mut rp = RegParams::new("pipeline_synthetic");

    let mut builder = SyntheticDataset::new(100.0);
    builder.add_spots(0, &[(0, 0), (30, 30)]);
    let ring = builder.add_region(
        "Regions/slide/ring",
        0,
        &[(5, 5), (6, 5), (7, 5), (5, 6), (7, 6), (5, 7), (6, 7), (7, 7)],
    );
    let dots = builder.add_region("Regions/slide/dots", 0, &[(10, 10), (12, 10), (10, 12)]);
    let mut dataset = JsonDataset::from_document(builder.build()).expect("dataset");
    let options = PipelineOptions::default();

    let (_, report) = run(&mut dataset, "ring", "ring", &options, None).expect("ring");
    rp.compare_values(1.0, report.segment_count() as f64, 0.0);
    rp.compare_values(ring.len() as f64, report.spot_count() as f64, 0.0);

    let (_, report) = run(&mut dataset, "dots", "dots", &options, None).expect("dots");
    rp.compare_values(dots.len() as f64, report.segment_count() as f64, 0.0);

    assert!(rp.cleanup(), "pipeline_synthetic regression test failed");
}
