use crate::test_data;
use approx::assert_abs_diff_eq;
use dorb::io::ConfigRepr;
use dorb::tracking::{SpaceTrackCfg, SPACETRACK_URL};
use dorb::Orbit;

#[test]
fn spacetrack_cfg_from_yaml() {
    crate::init_logger();
    let cfg = SpaceTrackCfg::load(test_data("spacetrack.yaml")).unwrap();
    assert_eq!(cfg.identity, "analyst@example.com");
    assert_eq!(cfg.base_url, SPACETRACK_URL);
    assert_eq!(cfg.timeout_s, 12.5);
    assert!(cfg.validate().is_ok());
}

#[test]
fn spacetrack_cfg_from_str() {
    let cfg = SpaceTrackCfg::loads(
        r#"
identity: someone
password: secret
base_url: http://localhost:8080
"#,
    )
    .unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8080");
    assert_eq!(cfg.timeout_s, 30.0);

    assert!(SpaceTrackCfg::loads("identity: only-me").is_err());
    assert!(SpaceTrackCfg::load(test_data("does_not_exist.yaml")).is_err());
}

#[test]
fn orbits_from_yaml() {
    let orbits = Orbit::load_many(test_data("orbits.yaml")).unwrap();
    assert_eq!(orbits.len(), 2);

    let leo = orbits[0];
    assert_eq!(leo.sma_km, 7000.0);
    assert_eq!(leo.gm_km3_s2, dorb::cosmic::EARTH_GM_KM3_S2);
    assert_abs_diff_eq!(leo.period.to_seconds(), 5_828.0, epsilon = 1e-6);
    assert_eq!(leo.radius_at("apogee"), leo.radius_at("perigee"));

    let molniya = orbits[1];
    assert!(molniya.radius_at("apogee").unwrap() > molniya.radius_at("perigee").unwrap());
}

#[test]
fn orbits_from_str() {
    let orbits = Orbit::loads_many(
        r#"
- ecc: 0.0
  period: 1 h 37 min 8 s
  sma_km: 7000.0
  ma_deg: 0.0
  inc_deg: 0.0
  mean_motion_rev_day: 14.82
  aop_deg: 0.0
- ecc: 0.01
  period: 23 h 56 min 4 s
  sma_km: 42164.0
  ma_deg: 90.0
  inc_deg: 0.05
  mean_motion_rev_day: 1.0027
  aop_deg: 0.0
  gm_km3_s2: 398600.0
"#,
    )
    .unwrap();
    assert_eq!(orbits.len(), 2);
    assert_eq!(orbits[0].inc_deg, 0.0);
    assert_eq!(orbits[0].gm_km3_s2, dorb::cosmic::EARTH_GM_KM3_S2);
    assert_eq!(orbits[1].gm_km3_s2, 398_600.0);
    assert_abs_diff_eq!(orbits[1].apoapsis_km(), 42_164.0 * 1.01, epsilon = 1e-9);

    assert!(Orbit::loads_many("- ecc: 0.1").is_err());
}
