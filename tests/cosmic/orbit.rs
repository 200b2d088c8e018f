use approx::assert_abs_diff_eq;
use dorb::cosmic::{AstroError, EARTH_GM_KM3_S2};
use dorb::time::Unit;
use dorb::{Apsis, Orbit};
use enum_iterator::all;
use rstest::*;

macro_rules! f64_eq {
    ($x:expr, $val:expr, $msg:expr) => {
        assert!(
            ($x - $val).abs() < 1e-10,
            "{}: {:.2e}",
            $msg,
            ($x - $val).abs()
        )
    };
}

#[fixture]
fn circular() -> Orbit {
    crate::init_logger();
    Orbit::new(0.0, 97.0 * Unit::Minute, 7000.0, 30.0, 51.6, 14.82, 0.0)
}

#[fixture]
fn molniya() -> Orbit {
    Orbit::new(
        0.74,
        717.8 * Unit::Minute,
        26_600.0,
        10.0,
        63.4,
        2.006,
        270.0,
    )
}

#[rstest]
fn circular_leo(circular: Orbit) {
    f64_eq!(circular.radius_at("apogee").unwrap(), 7000.0, "apogee");
    f64_eq!(circular.radius_at("perigee").unwrap(), 7000.0, "perigee");
    assert_abs_diff_eq!(
        circular.orbital_period().to_seconds(),
        5_828.516_637_686,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        circular.velocity_at_position("apogee").unwrap(),
        7.546_053_290_107_541,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        circular.velocity_at_position("perigee").unwrap(),
        circular.velocity_at_position("apogee").unwrap(),
        epsilon = 1e-12
    );
    f64_eq!(
        circular.energy_km2_s2(),
        -EARTH_GM_KM3_S2 / 14_000.0,
        "energy"
    );
    assert!(circular.is_circular());
}

#[rstest]
fn mean_motion(circular: Orbit, molniya: Orbit) {
    for orbit in [circular, molniya] {
        assert_abs_diff_eq!(
            orbit.mean_motion_rad_s() * orbit.orbital_period().to_seconds(),
            std::f64::consts::TAU,
            epsilon = 1e-9
        );
    }
    // Circular velocity is n * a
    assert_abs_diff_eq!(
        circular.mean_motion_rad_s() * circular.sma_km,
        circular.velocity_at_apsis(Apsis::Periapsis),
        epsilon = 1e-12
    );
}

#[rstest]
fn unsupported_positions(circular: Orbit) {
    for position in ["oblique", "apex", "", "apogee ish"] {
        assert_eq!(
            circular.radius_at(position),
            Err(AstroError::UnsupportedPosition {
                position: position.to_string()
            }),
            "{position}"
        );
        assert!(circular.velocity_at_position(position).is_err());
    }
    // Tags are case insensitive and the generic apsis names are accepted
    assert_eq!(circular.radius_at("Perigee"), circular.radius_at("periapsis"));
}

#[rstest]
fn apsis_ordering(molniya: Orbit) {
    let apo = molniya.radius_at_apsis(Apsis::Apoapsis);
    let peri = molniya.radius_at_apsis(Apsis::Periapsis);
    assert!(apo > peri);
    f64_eq!(apo, 26_600.0 * 1.74, "apogee");
    f64_eq!(peri, 26_600.0 * 0.26, "perigee");
    assert!(
        molniya.velocity_at_apsis(Apsis::Periapsis) > molniya.velocity_at_apsis(Apsis::Apoapsis)
    );

    // Vis-viva at each apsis conserves the specific energy
    for apsis in all::<Apsis>() {
        let v = molniya.velocity_at_apsis(apsis);
        let r = molniya.radius_at_apsis(apsis);
        assert_abs_diff_eq!(
            v.powi(2) / 2.0 - EARTH_GM_KM3_S2 / r,
            molniya.energy_km2_s2(),
            epsilon = 1e-9
        );
    }

    // Angular momentum is the same at both apsides
    assert_abs_diff_eq!(
        molniya.velocity_at_apsis(Apsis::Apoapsis) * apo,
        molniya.velocity_at_apsis(Apsis::Periapsis) * peri,
        epsilon = 1e-8
    );
}

#[test]
fn apsis_ordering_over_eccentricities() {
    for ecc in [0.0, 1e-6, 0.01, 0.3, 0.6, 0.95] {
        let orbit = Orbit::builder().sma_km(8_000.0).ecc(ecc).build();
        let apo = orbit.radius_at("apogee").unwrap();
        let peri = orbit.radius_at("perigee").unwrap();
        let v_apo = orbit.velocity_at_position("apogee").unwrap();
        let v_peri = orbit.velocity_at_position("perigee").unwrap();
        if ecc == 0.0 {
            assert_eq!(apo, peri);
            assert_eq!(v_apo, v_peri);
        } else {
            assert!(apo > peri, "ecc = {ecc}");
            assert!(v_peri > v_apo, "ecc = {ecc}");
        }
    }
}

#[test]
fn apsides_round_trip() {
    for (r_apo, r_peri) in [
        (7_000.0, 7_000.0),
        (7_200.0, 6_800.0),
        (42_164.0, 6_678.0),
        (46_000.0, 7_200.0),
    ] {
        let sma = Orbit::sma_from_apsides(r_apo, r_peri);
        let ecc = Orbit::ecc_from_apsides(r_apo, r_peri);
        // Eccentricity is rounded to 7 decimals, so the error scales with the SMA
        assert_abs_diff_eq!(sma * (1.0 + ecc), r_apo, epsilon = sma * 1e-7);
        assert_abs_diff_eq!(sma * (1.0 - ecc), r_peri, epsilon = sma * 1e-7);

        let orbit = Orbit::from_apsides(r_apo, r_peri, EARTH_GM_KM3_S2);
        assert_abs_diff_eq!(orbit.apoapsis_km(), r_apo, epsilon = sma * 1e-7);
        assert_abs_diff_eq!(orbit.periapsis_km(), r_peri, epsilon = sma * 1e-7);
    }

    assert_eq!(Orbit::ecc_from_apsides(7_200.0, 6_800.0), 0.028_571_4);
    assert_eq!(Orbit::sma_from_apsides(7_200.0, 6_800.0), 7_000.0);
}

#[test]
fn period_increases_with_sma() {
    let mut prev = Orbit::period_from_sma(6_500.0, EARTH_GM_KM3_S2);
    for sma in (1..=40).map(|i| 6_500.0 + 1_000.0 * i as f64) {
        let period = Orbit::period_from_sma(sma, EARTH_GM_KM3_S2);
        assert!(period > prev, "{sma} km");
        prev = period;
    }

    // Geostationary orbit is one sidereal day
    assert_abs_diff_eq!(
        Orbit::period_from_sma(42_164.17, EARTH_GM_KM3_S2).to_seconds(),
        86_164.09,
        epsilon = 1.0
    );
}

#[rstest]
fn stored_period_is_independent(circular: Orbit) {
    // The stored period is 97 minutes, the Keplerian one is ~97.14 minutes
    assert_eq!(circular.period, 97.0 * Unit::Minute);
    let mismatch = circular.period_mismatch().to_seconds();
    assert_abs_diff_eq!(mismatch, 5_828.516_637_686 - 5_820.0, epsilon = 1e-6);
}

#[rstest]
fn injected_gm(circular: Orbit) {
    // Moon
    let lunar = circular.with_gm(4_902.800_066);
    assert!(lunar.orbital_period() > circular.orbital_period());
    assert!(lunar.velocity_at_apsis(Apsis::Apoapsis) < circular.velocity_at_apsis(Apsis::Apoapsis));
    assert_eq!(lunar.radius_at("apogee"), circular.radius_at("apogee"));
}

#[rstest]
fn true_anomaly(circular: Orbit, molniya: Orbit) {
    // A circular orbit has the same mean and true anomalies
    assert_abs_diff_eq!(circular.ta_deg().unwrap(), 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(circular.ea_deg().unwrap(), 30.0, epsilon = 1e-9);

    // Near periapsis, the true anomaly leads the mean anomaly
    let ta = molniya.ta_deg().unwrap();
    let ea = molniya.ea_deg().unwrap();
    assert!(ta > ea && ea > molniya.ma_deg, "ta = {ta}, ea = {ea}");
    assert!(ta < 180.0);

    let hyperbolic = Orbit::builder().sma_km(7000.0).ecc(1.5).build();
    assert_eq!(
        hyperbolic.ta_deg(),
        Err(AstroError::NotElliptical { ecc: 1.5 })
    );
}

#[rstest]
fn approximate_equality(molniya: Orbit) {
    let mut other = molniya;
    other.sma_km += 0.5;
    other.ma_deg += 360.0;
    assert!(molniya.eq_within(&other, 1.0, 1e-9));
    assert!(!molniya.eq_within(&other, 0.1, 1e-9));
}

#[rstest]
fn display(circular: Orbit) {
    let repr = format!("{circular}");
    assert!(repr.contains("sma = 7000.000000 km"));
    assert!(repr.contains("inc = 51.600000 deg"));
}
