use std::path::PathBuf;

use proptest::prelude::*;
use psr_label_model::csv::{read_snapshots, serialize_actions};
use psr_label_model::{ProcedureInfo, Snapshot, StateVector};
use psr_translator::{translate, Translator, TranslatorConfig};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-dataset")
}

fn load_procedure() -> ProcedureInfo {
    ProcedureInfo::load(fixture_dir().join("procedure_info.json"))
        .expect("fixture procedure table should load")
}

fn load_recording(name: &str) -> Vec<Snapshot> {
    let path = fixture_dir()
        .join("train")
        .join(name)
        .join("PSR_labels_raw.csv");
    read_snapshots(path, Some(11)).expect("fixture snapshots should parse")
}

fn ids(snapshots: &[Snapshot], include_errors: bool) -> Vec<(String, usize)> {
    translate(snapshots, &load_procedure(), include_errors)
        .unwrap()
        .events
        .into_iter()
        .map(|e| (e.frame.to_string(), e.action_id))
        .collect()
}

fn frame_ids(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
    expected
        .iter()
        .map(|(f, id)| (format!("{f}.jpg"), *id))
        .collect()
}

#[test]
fn assembly_fixture_without_errors() {
    let snapshots = load_recording("01_assy_0_1");
    assert_eq!(
        ids(&snapshots, false),
        frame_ids(&[
            ("000120", 3),
            ("000240", 6),
            ("000410", 9),
            ("000530", 15),
            ("000690", 18),
            ("000690", 21),
            ("000800", 24),
            ("000800", 27),
            ("000800", 30),
        ])
    );
}

#[test]
fn assembly_fixture_with_errors() {
    let snapshots = load_recording("01_assy_0_1");
    let procedure = load_procedure();
    let result = translate(&snapshots, &procedure, true).unwrap();

    assert_eq!(result.error_count, 2);
    assert_eq!(result.unexpected_count, 0);
    assert_eq!(
        ids(&snapshots, true),
        frame_ids(&[
            ("000120", 3),
            ("000185", 7),
            ("000240", 6),
            ("000410", 9),
            ("000530", 15),
            ("000530", 19),
            ("000690", 18),
            ("000690", 21),
            ("000800", 24),
            ("000800", 27),
            ("000800", 30),
        ])
    );
}

#[test]
fn maintenance_fixture_counts_unexpected_regression() {
    let snapshots = load_recording("02_main_0_1");
    let procedure = load_procedure();

    let kept = translate(&snapshots, &procedure, true).unwrap();
    assert_eq!(kept.error_count, 1);
    assert_eq!(kept.unexpected_count, 1);
    assert_eq!(
        serialize_actions(&kept.events),
        "000095.jpg,29,remove front wheel assy\n\
         000150.jpg,25,incorrectly install front bracket screw\n\
         000310.jpg,23,remove front bracket\n\
         000310.jpg,32,remove rear wheel assy\n"
    );

    let dropped = translate(&snapshots, &procedure, false).unwrap();
    assert_eq!(dropped.error_count, 0);
    assert_eq!(
        dropped.events.iter().map(|e| e.action_id).collect::<Vec<_>>(),
        vec![29, 26, 23, 32]
    );
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Snapshot>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(vec![-1i64, 0, 1]), 11),
        1..25,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, codes)| {
                Snapshot::new(
                    format!("{:06}.jpg", i * 10),
                    StateVector::from_codes(&codes).unwrap(),
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn translation_is_reproducible(snapshots in sequence_strategy(), include_errors in any::<bool>()) {
        let procedure = load_procedure();
        let translator = Translator::new(&procedure, TranslatorConfig { include_errors });
        let first = translator.translate(&snapshots).unwrap();
        let second = translator.translate(&snapshots).unwrap();
        prop_assert_eq!(serialize_actions(&first.events), serialize_actions(&second.events));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn dropping_errors_never_reports_error_events(snapshots in sequence_strategy()) {
        let result = translate(&snapshots, &load_procedure(), false).unwrap();
        prop_assert_eq!(result.error_count, 0);
        prop_assert!(result.events.iter().all(|e| e.action_id % 3 != 1));
    }

    #[test]
    fn events_are_stamped_with_later_snapshot_frames(snapshots in sequence_strategy()) {
        let result = translate(&snapshots, &load_procedure(), true).unwrap();
        let first_frame = &snapshots[0].frame;
        prop_assert!(result.events.iter().all(|e| &e.frame != first_frame));
        prop_assert!(result.events.windows(2).all(|w| w[0].frame <= w[1].frame));
    }
}
