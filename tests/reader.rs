//! Integration tests for input parsing and grouping.

use std::io::Cursor;

use tracefix::{PointSource, RecordLayout, TrajectoryReader};

const HEADER: &str = "id;lat;lng;timestamp\n";

fn source_over(body: &str) -> PointSource<Cursor<String>> {
    PointSource::new(Cursor::new(format!("{}{}", HEADER, body)))
}

fn reader_over(body: &str) -> TrajectoryReader<Cursor<String>> {
    TrajectoryReader::new(Cursor::new(format!("{}{}", HEADER, body)))
}

#[test]
fn test_parses_one_record_per_call() {
    let mut source = source_over("7;39.5;116.25;1500\n8;40.0;117.0;2000\n");

    let p = source.next_point().unwrap();
    assert_eq!(p.vehicle_id, 7);
    assert_eq!(p.lat, 39.5);
    assert_eq!(p.lng, 116.25);
    assert_eq!(p.t, 1500);

    assert_eq!(source.next_point().unwrap().vehicle_id, 8);
    assert!(source.next_point().is_none());
}

#[test]
fn test_header_line_is_skipped() {
    let mut source = source_over("1;39.0;116.0;0\n");
    assert_eq!(source.next_point().unwrap().vehicle_id, 1);
    assert!(source.next_point().is_none());
}

#[test]
fn test_malformed_fields_parse_as_zero() {
    // Inherited laxity: a bad numeric field becomes zero, never an error.
    let mut source = source_over("x;garbage;116.0;99\n");
    let p = source.next_point().unwrap();
    assert_eq!(p.vehicle_id, 0);
    assert_eq!(p.lat, 0.0);
    assert_eq!(p.lng, 116.0);
    assert_eq!(p.t, 99);
}

#[test]
fn test_short_record_fills_missing_fields_with_zero() {
    let mut source = source_over("5;39.0\n");
    let p = source.next_point().unwrap();
    assert_eq!(p.vehicle_id, 5);
    assert_eq!(p.lat, 39.0);
    assert_eq!(p.lng, 0.0);
    assert_eq!(p.t, 0);
}

#[test]
fn test_cleaned_layout_groups_by_trajectory_id() {
    let input = "driver_id;id;lat;lng;timestamp\n7;3;39.9;116.4;1000\n";
    let mut source =
        PointSource::with_layout(Cursor::new(input.to_string()), RecordLayout::cleaned());
    let p = source.next_point().unwrap();
    assert_eq!(p.vehicle_id, 3);
    assert_eq!(p.lat, 39.9);
    assert_eq!(p.t, 1000);
}

#[test]
fn test_contiguous_groups_yield_in_order() {
    let mut reader = reader_over(concat!(
        "1;39.0;116.0;0\n",
        "1;39.1;116.1;1000\n",
        "1;39.2;116.2;2000\n",
        "2;40.0;117.0;0\n",
        "2;40.1;117.1;1000\n",
        "3;41.0;118.0;0\n",
    ));

    let first = reader.read_next().unwrap();
    assert_eq!(first.vehicle_id(), Some(1));
    assert_eq!(first.len(), 3);

    let second = reader.read_next().unwrap();
    assert_eq!(second.vehicle_id(), Some(2));
    assert_eq!(second.len(), 2);

    let third = reader.read_next().unwrap();
    assert_eq!(third.vehicle_id(), Some(3));
    assert_eq!(third.len(), 1);

    assert!(reader.read_next().is_none());
    assert!(reader.read_next().is_none());
}

#[test]
fn test_grouping_does_not_sort() {
    // Grouping keeps input order; sorting is the engine's job.
    let mut reader = reader_over("1;39.0;116.0;5000\n1;39.1;116.1;1000\n");
    let group = reader.read_next().unwrap();
    let times: Vec<i64> = group.points().iter().map(|p| p.t).collect();
    assert_eq!(times, vec![5000, 1000]);
}

#[test]
fn test_noncontiguous_runs_stay_separate_groups() {
    // Runs of the same vehicle separated by another vehicle are not merged.
    let mut reader = reader_over("1;39.0;116.0;0\n2;40.0;117.0;0\n1;39.1;116.1;1000\n");
    assert_eq!(reader.read_next().unwrap().vehicle_id(), Some(1));
    assert_eq!(reader.read_next().unwrap().vehicle_id(), Some(2));
    assert_eq!(reader.read_next().unwrap().vehicle_id(), Some(1));
    assert!(reader.read_next().is_none());
}

#[test]
fn test_header_only_input_yields_none() {
    let mut reader = reader_over("");
    assert!(reader.read_next().is_none());
}
