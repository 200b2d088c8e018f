use crate::test_data;
use dorb::io::{write_debris_csv, DebrisRow};
use dorb::tracking::parse_gp_records;

#[test]
fn debris_csv_export() {
    crate::init_logger();
    let body = std::fs::read_to_string(test_data("gp_debris.json")).unwrap();
    let records = parse_gp_records(&body).unwrap();

    let mut buf = Vec::new();
    let written = write_debris_csv(&records, &mut buf).unwrap();
    assert_eq!(written, 3);

    let csv = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("norad_cat_id,object_name,object_id,epoch,sma_km,ecc"));
    assert!(lines[0].ends_with("kepler_period_s,ta_deg"));
    assert!(lines[1].starts_with("118,THOR ABLESTAR DEB,1961-015C,"));
}

#[test]
fn debris_row_quantities() {
    let body = std::fs::read_to_string(test_data("gp_debris.json")).unwrap();
    let records = parse_gp_records(&body).unwrap();

    for record in &records {
        let row = DebrisRow::from_record(record).unwrap();
        assert!(row.apoapsis_km >= row.periapsis_km);
        assert!(row.periapsis_velocity_km_s >= row.apoapsis_velocity_km_s);
        assert!(row.ta_deg.is_some());
        // Published periods and Keplerian periods agree within a second for these element sets
        assert!((row.period_s - row.kepler_period_s).abs() < 1.0, "{row:?}");
    }
}

#[test]
fn non_elliptical_records_are_skipped() {
    let body = std::fs::read_to_string(test_data("gp_debris.json")).unwrap();
    let mut records = parse_gp_records(&body).unwrap();
    records[2].eccentricity = 1.02;

    let mut buf = Vec::new();
    let written = write_debris_csv(&records, &mut buf).unwrap();
    assert_eq!(written, 2);

    let csv = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("118,"));
    assert!(lines[2].starts_with("34427,"));
}
