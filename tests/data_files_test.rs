use std::path::PathBuf;

use firewheel::resources::track_data::{
    DataFileError, TRACK_CAPACITY, load_track_data, parse_pole_heights, parse_runner_vertices,
};

fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[test]
fn short_file_stops_at_end_of_input() {
    let heights = parse_pole_heights("poles", "heights\n0.5\n0.6\n0.7").unwrap();
    assert_eq!(heights, vec![0.5, 0.6, 0.7]);

    let runner = parse_runner_vertices("runner", "1 0 0.1\n0 1 0.2\n").unwrap();
    assert_eq!(runner, vec![[1.0, 0.0, 0.1], [0.0, 1.0, 0.2]]);
}

#[test]
fn header_only_file_has_no_rows() {
    assert!(parse_pole_heights("poles", "heights\n").unwrap().is_empty());
    assert!(parse_pole_heights("poles", "").unwrap().is_empty());
}

#[test]
fn rows_beyond_capacity_are_an_error() {
    let mut text = String::from("heights\n");
    for _ in 0..=TRACK_CAPACITY {
        text.push_str("0.5\n");
    }
    assert_eq!(
        parse_pole_heights("poles", &text),
        Err(DataFileError::TooManyRows {
            file: "poles".to_string(),
            capacity: TRACK_CAPACITY,
        })
    );
}

#[test]
fn exactly_full_file_is_accepted() {
    let text = "1 2 3\n".repeat(TRACK_CAPACITY);
    assert_eq!(parse_runner_vertices("runner", &text).unwrap().len(), TRACK_CAPACITY);
}

#[tokio::test]
async fn shipped_assets_fill_the_track() {
    let data = load_track_data(&asset_dir()).await.unwrap();
    assert_eq!(data.pole_heights.len(), TRACK_CAPACITY);
    assert_eq!(data.runner.len(), TRACK_CAPACITY);
    assert!(data.pole_heights.iter().all(|h| *h > 0.0));
}

#[tokio::test]
async fn missing_files_give_an_empty_track() {
    let data = load_track_data(&asset_dir().join("does-not-exist")).await.unwrap();
    assert!(data.pole_heights.is_empty());
    assert!(data.runner.is_empty());
}
