//! Prediction table builder against a scripted host.
//!
//! The mock records every clock write and every query epoch, so the tests
//! can check that the simulated time is always restored and that bodies
//! are evaluated at the twilight instant.

use std::cell::RefCell;
use std::collections::HashMap;

use navstars_core::{
    Body, EphemerisError, EphemerisSource, EquatorialCoords, HorizontalCoords, ObserverLocation,
    SimulatedClock,
};
use navstars_frames::AzimuthReference;
use navstars_search::{
    AltitudeLimit, PredictionConfig, SearchError, TwilightSide, build_prediction_table,
    compute_daily_twilight, star_name,
};

/// (azimuth °, altitude °, magnitude, declination °)
type Sky = (f64, f64, f64, f64);

struct MockHost {
    jd: f64,
    sky: HashMap<Body, Sky>,
    sun_declination_deg: f64,
    eot_min: f64,
    fail_sun: bool,
    writes: Vec<f64>,
    refreshes: usize,
    delta_t_days: f64,
    query_epochs: RefCell<Vec<f64>>,
    eot_epochs: RefCell<Vec<f64>>,
    size_epochs: RefCell<Vec<f64>>,
}

impl MockHost {
    fn new(jd: f64) -> Self {
        let mut sky = HashMap::new();
        sky.insert(Body::Sun, (95.0, -9.0, -26.7, 0.0));
        sky.insert(Body::Moon, (200.0, 35.0, -11.0, -12.3));
        sky.insert(Body::Venus, (100.0, 5.0, -4.1, -4.6));
        sky.insert(Body::Mars, (10.0, 20.0, 1.2, 22.0));
        sky.insert(Body::Jupiter, (270.0, 50.0, -2.0, 15.2));
        sky.insert(Body::Saturn, (180.0, 90.0, 0.9, -10.0));
        sky.insert(Body::Star(32349), (160.0, 25.0, -1.46, -16.716));
        sky.insert(Body::Star(91262), (60.0, 20.000_001, 0.03, 38.78));
        Self {
            jd,
            sky,
            sun_declination_deg: 0.0,
            eot_min: 0.0,
            fail_sun: false,
            writes: Vec::new(),
            refreshes: 0,
            delta_t_days: 0.0,
            query_epochs: RefCell::new(Vec::new()),
            eot_epochs: RefCell::new(Vec::new()),
            size_epochs: RefCell::new(Vec::new()),
        }
    }

    fn lookup(&self, body: Body) -> Result<Sky, EphemerisError> {
        self.sky
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::BodyNotFound(body.to_string()))
    }
}

impl SimulatedClock for MockHost {
    fn simulated_jd(&self) -> f64 {
        self.jd
    }

    fn set_simulated_jd(&mut self, jd: f64) {
        self.jd = jd;
        self.writes.push(jd);
    }

    fn simulated_jde(&self) -> f64 {
        self.jd + self.delta_t_days
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

impl EphemerisSource for MockHost {
    type Handle = Body;

    fn resolve(&self, body: Body) -> Result<Body, EphemerisError> {
        if body == Body::Sun && self.fail_sun {
            return Err(EphemerisError::Host("sun unavailable".to_string()));
        }
        self.lookup(body).map(|_| body)
    }

    fn equatorial(&self, body: Body, epoch_jd: f64) -> Result<EquatorialCoords, EphemerisError> {
        self.query_epochs.borrow_mut().push(epoch_jd);
        let dec = if body == Body::Sun {
            self.sun_declination_deg
        } else {
            self.lookup(body)?.3
        };
        Ok(EquatorialCoords::new(0.0, dec.to_radians()))
    }

    fn horizontal(&self, body: Body, epoch_jd: f64) -> Result<HorizontalCoords, EphemerisError> {
        self.query_epochs.borrow_mut().push(epoch_jd);
        let (az, alt, _, _) = self.lookup(body)?;
        Ok(HorizontalCoords::new(az.to_radians(), alt.to_radians()))
    }

    fn magnitude(&self, body: Body, _: f64) -> Result<f64, EphemerisError> {
        Ok(self.lookup(body)?.2)
    }

    fn angular_size_rad(&self, _: Body, epoch_jd: f64) -> Result<f64, EphemerisError> {
        self.size_epochs.borrow_mut().push(epoch_jd);
        Ok(0.0047)
    }

    fn equation_of_time_minutes(&self, epoch_jde: f64) -> Result<f64, EphemerisError> {
        self.eot_epochs.borrow_mut().push(epoch_jde);
        Ok(self.eot_min)
    }

    fn localized_name(&self, body: Body) -> String {
        match body {
            Body::Star(hip) => star_name(hip).unwrap_or("?").to_string(),
            other => other.to_string(),
        }
    }
}

const START_JD: f64 = 2_460_390.318;
const STARS: [u32; 3] = [32349, 99999, 91262];

fn greenwich() -> ObserverLocation {
    ObserverLocation::new(52.0, 0.0)
}

#[test]
fn epoch_restored_after_success() {
    let mut host = MockHost::new(START_JD);
    build_prediction_table(&mut host, &greenwich(), &STARS, &PredictionConfig::default())
        .unwrap();
    assert_eq!(host.jd, START_JD);
    assert_eq!(host.writes.last(), Some(&START_JD));
    assert_eq!(host.refreshes, 1);
}

#[test]
fn epoch_restored_when_body_lookup_fails() {
    let mut host = MockHost::new(START_JD);
    host.sky.remove(&Body::Mars);
    let table =
        build_prediction_table(&mut host, &greenwich(), &STARS, &PredictionConfig::default())
            .unwrap();

    assert_eq!(host.jd, START_JD);
    let skipped: Vec<Body> = table.skipped.iter().map(|s| s.body).collect();
    assert_eq!(skipped, [Body::Mars, Body::Star(99999)]);
    assert!(matches!(
        table.skipped[0].error,
        EphemerisError::BodyNotFound(_)
    ));
    assert!(table.rows.iter().all(|r| r.body != Body::Mars));
}

#[test]
fn epoch_restored_when_sun_fails() {
    let mut host = MockHost::new(START_JD);
    host.fail_sun = true;
    let r = build_prediction_table(&mut host, &greenwich(), &STARS, &PredictionConfig::default());
    assert!(matches!(r, Err(SearchError::Ephemeris(EphemerisError::Host(_)))));
    assert_eq!(host.jd, START_JD);
    assert_eq!(host.refreshes, 1);
}

#[test]
fn solar_system_rows_precede_stars() {
    let mut host = MockHost::new(START_JD);
    let table =
        build_prediction_table(&mut host, &greenwich(), &STARS, &PredictionConfig::default())
            .unwrap();
    let bodies: Vec<Body> = table.rows.iter().map(|r| r.body).collect();
    // Saturn sits exactly at 90° and is excluded by the strict upper bound
    assert_eq!(
        bodies,
        [
            Body::Sun,
            Body::Moon,
            Body::Venus,
            Body::Mars,
            Body::Jupiter,
            Body::Star(32349),
            Body::Star(91262)
        ]
    );
    let designators: Vec<&str> = table.rows.iter().map(|r| r.designator.as_str()).collect();
    assert_eq!(designators, ["☉", "☾", "♀", "♂", "♃", "(1)", "(3)"]);
    let numbers: Vec<usize> = table.rows.iter().map(|r| r.number).collect();
    assert_eq!(numbers, [0, 1, 2, 3, 4, 6, 8]);
    assert_eq!(table.rows[5].label, "Sirius");
}

#[test]
fn altitude_bounds_are_exclusive() {
    let mut host = MockHost::new(START_JD);
    let config = PredictionConfig {
        altitude_limit: AltitudeLimit::AboveTwentyDegrees,
        ..Default::default()
    };
    let table = build_prediction_table(&mut host, &greenwich(), &STARS, &config).unwrap();
    let bodies: Vec<Body> = table.rows.iter().map(|r| r.body).collect();
    // Mars at exactly 20° is out, Vega just above it is in
    assert_eq!(
        bodies,
        [Body::Moon, Body::Jupiter, Body::Star(32349), Body::Star(91262)]
    );
}

#[test]
fn azimuth_reference_conversion() {
    let mut host = MockHost::new(START_JD);
    let south =
        build_prediction_table(&mut host, &greenwich(), &[], &PredictionConfig::default())
            .unwrap();
    let config = PredictionConfig {
        azimuth_reference: AzimuthReference::North,
        ..Default::default()
    };
    let north = build_prediction_table(&mut host, &greenwich(), &[], &config).unwrap();

    let az = |t: &navstars_search::PredictionTable, b: Body| {
        t.rows.iter().find(|r| r.body == b).map(|r| r.azimuth_deg).unwrap()
    };
    assert!((az(&south, Body::Mars) - 170.0).abs() < 1e-9);
    assert!((az(&south, Body::Jupiter) - 270.0).abs() < 1e-9);
    assert!((az(&south, Body::Moon) - 340.0).abs() < 1e-9);
    assert!((az(&north, Body::Mars) - 10.0).abs() < 1e-9);
    assert!((az(&north, Body::Moon) - 200.0).abs() < 1e-9);
}

#[test]
fn declination_text_and_values() {
    let mut host = MockHost::new(START_JD);
    let table =
        build_prediction_table(&mut host, &greenwich(), &STARS, &PredictionConfig::default())
            .unwrap();
    let sirius = table.rows.iter().find(|r| r.body == Body::Star(32349)).unwrap();
    assert_eq!(sirius.declination_text, "S 16°43.0'");
    assert_eq!(sirius.magnitude, -1.46);
    let moon = table.rows.iter().find(|r| r.body == Body::Moon).unwrap();
    assert_eq!(moon.declination_text, "S 12°18.0'");
}

#[test]
fn bodies_evaluated_at_twilight_epoch() {
    let mut host = MockHost::new(START_JD);
    let table =
        build_prediction_table(&mut host, &greenwich(), &[], &PredictionConfig::default())
            .unwrap();

    // 52° N, δ = 0, EoT = 0: nautical hour angle 6.981318 h before noon
    let reference = 2_460_390.0;
    let expected = reference + (12.0 - 6.981_318_015 - 12.0) / 24.0;
    assert_eq!(table.reference_jd, reference);
    assert!((table.evaluation_jd - expected).abs() < 1e-8);
    assert!((table.twilight_hours.unwrap() - 5.018_681_985).abs() < 1e-8);

    assert_eq!(host.writes[0], reference);
    assert!((host.writes[1] - expected).abs() < 1e-8);

    let epochs = host.query_epochs.borrow();
    // First query is the solar sample at the reference epoch
    assert_eq!(epochs[0], reference);
    assert!(epochs[1..].iter().all(|e| (e - expected).abs() < 1e-8));
}

#[test]
fn evening_side_and_pinned_epoch() {
    let mut host = MockHost::new(START_JD);
    let evening = PredictionConfig {
        twilight: TwilightSide::Evening,
        ..Default::default()
    };
    let table = build_prediction_table(&mut host, &greenwich(), &[], &evening).unwrap();
    assert!((table.twilight_hours.unwrap() - 18.981_318_015).abs() < 1e-8);

    let pinned = PredictionConfig {
        pinned_jd: Some(2_451_545.0),
        ..Default::default()
    };
    let table = build_prediction_table(&mut host, &greenwich(), &[], &pinned).unwrap();
    assert_eq!(table.evaluation_jd, 2_451_545.0);
    assert_eq!(host.jd, START_JD);
}

/// 69.2 s of ΔT
const DELTA_T_DAYS: f64 = 69.2 / 86_400.0;

#[test]
fn solar_sample_separates_ut_and_ephemeris_time() {
    let mut host = MockHost::new(START_JD);
    host.delta_t_days = DELTA_T_DAYS;
    let table =
        build_prediction_table(&mut host, &greenwich(), &[], &PredictionConfig::default())
            .unwrap();

    let reference = 2_460_390.0;
    assert_eq!(table.reference_jd, reference);
    // Sun position at the UT reference, equation of time at its JDE
    assert_eq!(host.query_epochs.borrow()[0], reference);
    assert_eq!(host.eot_epochs.borrow()[0], reference + DELTA_T_DAYS);
    assert_eq!(host.jd, START_JD);
}

#[test]
fn daily_summary_queries_position_at_ut() {
    let mut host = MockHost::new(2_460_390.1);
    host.delta_t_days = DELTA_T_DAYS;
    let day = compute_daily_twilight(&host, &greenwich()).unwrap();

    let epoch_jde = 2_460_390.0;
    let epoch_jd = epoch_jde - DELTA_T_DAYS;
    assert_eq!(day.solar.epoch_jde, epoch_jde);
    assert!((host.query_epochs.borrow()[0] - epoch_jd).abs() < 1e-9);
    assert!((host.size_epochs.borrow()[0] - epoch_jd).abs() < 1e-9);
    assert_eq!(host.eot_epochs.borrow()[0], epoch_jde);
    assert!(host.writes.is_empty());
}
