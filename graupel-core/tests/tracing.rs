//! Behavioural tests for the labeller's tracing instrumentation.

use graupel_core::{Labeller, Lattice, clusters};
use graupel_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

fn with_recording<F: FnOnce()>(run: F) -> RecordingLayer {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, run);
    layer
}

#[rstest]
fn add_image_records_an_instrumented_span() {
    let layer = with_recording(|| {
        let lattice = Lattice::new(&[4, 4], true).expect("shape is valid");
        let mut labeller = Labeller::new(lattice);
        let mask: Vec<bool> = (0..16).map(|i| i < 3).collect();
        labeller.add_image(&mask).expect("mask matches shape");
    });

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "labeller.add_image")
        .expect("labeller.add_image span must exist");
    assert_eq!(span.fields.get("sites"), Some(&"16".to_owned()));
    assert_eq!(span.fields.get("shape"), Some(&"[4, 4]".to_owned()));
}

#[rstest]
fn merges_emit_debug_events() {
    let layer = with_recording(|| {
        let lattice = Lattice::new(&[1, 3], false).expect("shape is valid");
        let mut labeller = Labeller::new(lattice);
        // Two singletons bridged by the middle site.
        labeller.add_points(&[0, 2, 1]).expect("indices in range");
    });

    let merge_event = layer
        .events()
        .into_iter()
        .find(|event| event.fields.get("message") == Some(&"merged neighbouring clusters".to_owned()))
        .expect("merge event must be emitted");
    assert_eq!(merge_event.fields.get("survivor"), Some(&"1".to_owned()));
    assert_eq!(merge_event.fields.get("site"), Some(&"1".to_owned()));
}

#[rstest]
fn clusters_records_nested_spans() {
    let layer = with_recording(|| {
        let lattice = Lattice::new(&[2, 2], false).expect("shape is valid");
        clusters(&lattice, &[true, false, false, true]).expect("mask matches shape");
    });

    let spans = layer.spans();
    for name in ["labeller.clusters", "labeller.add_image", "labeller.prune"] {
        assert!(
            spans.iter().any(|span| span.name == name),
            "span {name} must be recorded, got: {:?}",
            spans.iter().map(|span| span.name.clone()).collect::<Vec<_>>(),
        );
    }
}
