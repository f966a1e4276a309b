mod common;

use std::time::Duration;

use approx::assert_abs_diff_eq;
use common::{observer_result, MockSource};
use ephem_traj::{
    constants::UNIT_NORM_TOLERANCE,
    jpl_request::horizons_query::AngleFormat, parse_ephemeris_table, AssemblerConfig,
    Concurrency, DecodeMode, TableLayout, TimeWindow, TrajectoryAssembler,
};

fn window() -> TimeWindow {
    TimeWindow::new("2023-01-01", "2023-01-03", Some("1d")).unwrap()
}

#[test]
fn test_decimal_end_to_end_row() {
    let payload = "...\n$$SOE\n2023-01-01 00:00 10 20.5 30 21.3 0.5 10 0\n$$EOE\n...";
    let layout = TableLayout::new(DecodeMode::Decimal {
        ra_field: 3,
        dec_field: 5,
    });
    let table = parse_ephemeris_table(payload, &layout);
    assert_eq!(table.len(), 1);

    let traj = ephem_traj::Trajectory::from_table("1", table);
    let (ra, dec) = (20.5_f64.to_radians(), 21.3_f64.to_radians());
    let point = traj.points()[0];
    assert_eq!(traj.dates(), ["2023-01-01"]);
    assert_abs_diff_eq!(point.x, dec.cos() * ra.cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(point.y, dec.cos() * ra.sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(point.z, dec.sin(), epsilon = 1e-12);
}

#[test]
fn test_parser_alignment_invariant() {
    let result = observer_result(&[
        " 2023-Jan-01 00:00     05 14 33.95 +23 49 37.2",
        " 2023-Jan-02 00:00     05 13 29.12 +23 51 02.8",
        " 2023-Jan-03 00:00     05 12 20.00 +23 52 10.0",
    ]);
    let table = parse_ephemeris_table(&result, &TableLayout::default());
    assert_eq!(table.len(), 3);
    assert_eq!(table.dates().len(), table.positions().len());
    assert!(table.rejected().is_empty());
}

#[test]
fn test_parser_missing_end_marker() {
    let payload = "header\n$$SOE\n 2023-Jan-01 00:00 05 14 33.95 +23 49 37.2\n 2023-Jan-02 00:00 05 13 29.12 +23 51 02.8";
    let table = parse_ephemeris_table(payload, &TableLayout::default());
    assert_eq!(table.len(), 2);
    assert_eq!(table.dates(), ["2023-Jan-01", "2023-Jan-02"]);
}

#[test]
fn test_parser_missing_start_marker() {
    let payload = "No ephemeris for target \"(unknown)\"\n$$EOE\n";
    let table = parse_ephemeris_table(payload, &TableLayout::default());
    assert!(table.is_empty());
    assert!(table.rejected().is_empty());
}

#[tokio::test]
async fn test_failed_designator_is_skipped() {
    let good = observer_result(&[
        " 2023-Jan-01 00:00     06 00 00.00 +45 00 00.0",
        " 2023-Jan-02 00:00     06 00 04.00 +45 00 10.0",
    ]);
    let source = MockSource::default()
        .with_payload("1", good.clone())
        .with_payload("3", good);

    let assembler = TrajectoryAssembler::new(source, AssemblerConfig::default());
    let trajectories = assembler.assemble(&["1", "2", "3"], &window()).await;

    let designators: Vec<&str> = trajectories.iter().map(|t| t.designator()).collect();
    assert_eq!(designators, ["1", "3"]);
    for traj in &trajectories {
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.dates().len(), traj.points().len());
        for point in traj.points() {
            assert_abs_diff_eq!(point.norm(), 1.0, epsilon = UNIT_NORM_TOLERANCE);
        }
    }

    // sexagesimal (6h, +45°) lands on (0, cos 45°, sin 45°)
    let first = trajectories[0].points()[0];
    assert_abs_diff_eq!(first.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first.y, 45_f64.to_radians().cos(), epsilon = 1e-12);
    assert_abs_diff_eq!(first.z, 45_f64.to_radians().sin(), epsilon = 1e-12);
}

#[tokio::test]
async fn test_all_failed_returns_empty() {
    let assembler = TrajectoryAssembler::new(MockSource::default(), AssemblerConfig::default());
    let trajectories = assembler.assemble(&["1", "2"], &window()).await;
    assert!(trajectories.is_empty());
}

#[tokio::test]
async fn test_table_without_rows_is_skipped() {
    let source = MockSource::default()
        .with_payload("1", "Ambiguous target name; provide unique id\n".to_string())
        .with_payload(
            "2",
            observer_result(&[" 2023-Jan-01 00:00     Daylight only"]),
        );
    let assembler = TrajectoryAssembler::new(source, AssemblerConfig::default());
    assert!(assembler.assemble(&["1", "2"], &window()).await.is_empty());
}

#[tokio::test]
async fn test_sequential_requests_follow_input_order() {
    let result = observer_result(&[" 2023-Jan-01 00:00     01 00 00.00 +10 00 00.0"]);
    let source = MockSource::default()
        .with_payload("a", result.clone())
        .with_payload("b", result.clone())
        .with_payload("c", result);

    let assembler = TrajectoryAssembler::new(source, AssemblerConfig::default());
    let trajectories = assembler.assemble(&["c", "a", "b"], &window()).await;
    assert_eq!(trajectories.len(), 3);

    let calls = assembler_calls(&assembler);
    assert_eq!(calls, ["c", "a", "b"]);
}

fn assembler_calls(assembler: &TrajectoryAssembler<MockSource>) -> Vec<String> {
    assembler
        .source()
        .calls()
        .into_iter()
        .map(|(des, _)| des)
        .collect()
}

#[tokio::test]
async fn test_bounded_concurrency_keeps_output_order() {
    let result = observer_result(&[" 2023-Jan-01 00:00     01 00 00.00 +10 00 00.0"]);
    let source = MockSource::default()
        .with_payload("slow", result.clone())
        .with_payload("fast", result)
        .with_delay("slow", Duration::from_millis(50));

    let config = AssemblerConfig::default().with_concurrency(Concurrency::Bounded(2));
    let assembler = TrajectoryAssembler::new(source, config);
    let trajectories = assembler.assemble(&["slow", "fast"], &window()).await;

    let designators: Vec<&str> = trajectories.iter().map(|t| t.designator()).collect();
    assert_eq!(designators, ["slow", "fast"]);
}

#[tokio::test]
async fn test_decimal_mode_requests_degrees() {
    let source = MockSource::default().with_payload(
        "1",
        observer_result(&[" 2023-Jan-01 00:00     90.0 0.0"]),
    );
    let assembler = TrajectoryAssembler::new(source, AssemblerConfig::new(DecodeMode::decimal()));
    let trajectories = assembler.assemble(&["1"], &window()).await;

    assert_eq!(trajectories.len(), 1);
    let point = trajectories[0].points()[0];
    assert_abs_diff_eq!(point.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(point.z, 0.0, epsilon = 1e-12);

    let calls = assembler.source().calls();
    assert_eq!(calls, [("1".to_string(), AngleFormat::Deg)]);
}
