//! Integration tests for the polyline converter.

use std::io::Cursor;

use tracefix::convert::convert;

fn convert_str(input: &str) -> (u64, String) {
    let mut output = Vec::new();
    let rows = convert(Cursor::new(input.to_string()), &mut output).unwrap();
    (rows, String::from_utf8(output).unwrap())
}

#[test]
fn test_groups_cleaned_rows_into_polylines() {
    let input = concat!(
        "driver_id;id;lat;lng;timestamp\n",
        "7;0;39.9;116.4;1000\n",
        "7;0;39.91;116.41;2000\n",
        "8;1;40.0;117.0;1000\n",
    );

    let (rows, output) = convert_str(input);
    assert_eq!(rows, 2);

    let expected = concat!(
        "0;39.90000000;116.40000000;39.91000000;116.41000000\n",
        "1;40.00000000;117.00000000\n",
    );
    assert_eq!(output, expected);
}

#[test]
fn test_groups_by_trajectory_id_not_driver() {
    // Same driver, two trajectory ids: two rows.
    let input = concat!(
        "driver_id;id;lat;lng;timestamp\n",
        "7;0;39.9;116.4;1000\n",
        "7;1;39.9;116.4;2000\n",
    );

    let (rows, output) = convert_str(input);
    assert_eq!(rows, 2);
    assert_eq!(output.lines().count(), 2);
    assert!(output.starts_with("0;"));
    assert!(output.lines().nth(1).unwrap().starts_with("1;"));
}

#[test]
fn test_header_only_input_produces_nothing() {
    let (rows, output) = convert_str("driver_id;id;lat;lng;timestamp\n");
    assert_eq!(rows, 0);
    assert!(output.is_empty());
}

#[test]
fn test_round_trip_from_writer_output() {
    // Feed the converter the exact format the writer produces.
    let input = concat!(
        "driver_id;id;lat;lng;timestamp\n",
        "1;0;39.90200000;116.40000000;10000\n",
        "1;0;39.90400000;116.40000000;20000\n",
        "3;1;45.00200000;118.00000000;10000\n",
    );

    let (rows, output) = convert_str(input);
    assert_eq!(rows, 2);
    assert_eq!(
        output,
        concat!(
            "0;39.90200000;116.40000000;39.90400000;116.40000000\n",
            "1;45.00200000;118.00000000\n",
        )
    );
}
