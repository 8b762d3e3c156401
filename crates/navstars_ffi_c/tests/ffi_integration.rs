//! C ABI against a host implemented with `extern "C"` callbacks.

use std::ffi::{c_char, c_void};
use std::ptr;

use navstars_ffi_c::*;

/// Handle space: NAIF code for solar-system bodies, 100_000 + HIP for stars.
const STAR_HANDLE_BASE: u64 = 100_000;

struct HostState {
    jd: f64,
    writes: Vec<f64>,
    refreshes: usize,
    fail_mars: bool,
    sun_missing: bool,
}

impl HostState {
    fn new(jd: f64) -> Self {
        Self {
            jd,
            writes: Vec::new(),
            refreshes: 0,
            fail_mars: false,
            sun_missing: false,
        }
    }
}

/// (azimuth °, altitude °, magnitude, declination °)
fn sky(handle: u64) -> Option<(f64, f64, f64, f64)> {
    match handle {
        10 => Some((95.0, -9.0, -26.7, 0.0)),
        301 => Some((200.0, 35.0, -11.0, -12.3)),
        299 => Some((100.0, 5.0, -4.1, -4.6)),
        499 => Some((10.0, 20.5, 1.2, 22.0)),
        599 => Some((270.0, 50.0, -2.0, 15.2)),
        699 => Some((180.0, 40.0, 0.9, -10.0)),
        h if h == STAR_HANDLE_BASE + 32349 => Some((160.0, 25.0, -1.46, -16.716)),
        h if h == STAR_HANDLE_BASE + 91262 => Some((60.0, 30.0, 0.03, 38.78)),
        _ => None,
    }
}

unsafe fn state<'a>(user_data: *mut c_void) -> &'a mut HostState {
    // SAFETY: Tests always pass a pointer to a live HostState.
    unsafe { &mut *user_data.cast::<HostState>() }
}

unsafe extern "C" fn resolve(ud: *mut c_void, code: i32, hip: u32, out: *mut u64) -> i32 {
    let s = unsafe { state(ud) };
    if code == 10 && s.sun_missing {
        return 2;
    }
    let handle = if code == 0 {
        STAR_HANDLE_BASE + u64::from(hip)
    } else {
        code as u64
    };
    if sky(handle).is_none() {
        return NAV_HOST_NOT_FOUND;
    }
    unsafe { *out = handle };
    NAV_HOST_OK
}

unsafe extern "C" fn equatorial(
    ud: *mut c_void,
    handle: u64,
    _jd: f64,
    ra: *mut f64,
    dec: *mut f64,
) -> i32 {
    let s = unsafe { state(ud) };
    if handle == 499 && s.fail_mars {
        return 3;
    }
    let Some((_, _, _, d)) = sky(handle) else {
        return NAV_HOST_NOT_FOUND;
    };
    unsafe {
        *ra = 0.0;
        *dec = d.to_radians();
    }
    NAV_HOST_OK
}

unsafe extern "C" fn horizontal(
    _ud: *mut c_void,
    handle: u64,
    _jd: f64,
    az: *mut f64,
    alt: *mut f64,
) -> i32 {
    let Some((a, h, _, _)) = sky(handle) else {
        return NAV_HOST_NOT_FOUND;
    };
    unsafe {
        *az = a.to_radians();
        *alt = h.to_radians();
    }
    NAV_HOST_OK
}

unsafe extern "C" fn magnitude(_ud: *mut c_void, handle: u64, _jd: f64, out: *mut f64) -> i32 {
    let Some((_, _, m, _)) = sky(handle) else {
        return NAV_HOST_NOT_FOUND;
    };
    unsafe { *out = m };
    NAV_HOST_OK
}

unsafe extern "C" fn angular_size(_ud: *mut c_void, _h: u64, _jd: f64, out: *mut f64) -> i32 {
    unsafe { *out = 0.267_638_f64.to_radians() };
    NAV_HOST_OK
}

unsafe extern "C" fn equation_of_time(_ud: *mut c_void, _jde: f64, out: *mut f64) -> i32 {
    unsafe { *out = 0.0 };
    NAV_HOST_OK
}

unsafe extern "C" fn localized_name(
    _ud: *mut c_void,
    handle: u64,
    buf: *mut c_char,
    len: usize,
) -> i32 {
    let name: &[u8] = match handle {
        h if h == STAR_HANDLE_BASE + 32349 => b"Sirius\0",
        h if h == STAR_HANDLE_BASE + 91262 => b"Vega\0",
        _ => return NAV_HOST_NOT_FOUND,
    };
    if name.len() > len {
        return 2;
    }
    unsafe { ptr::copy_nonoverlapping(name.as_ptr(), buf.cast::<u8>(), name.len()) };
    NAV_HOST_OK
}

unsafe extern "C" fn get_jd(ud: *mut c_void) -> f64 {
    unsafe { state(ud) }.jd
}

unsafe extern "C" fn set_jd(ud: *mut c_void, jd: f64) {
    let s = unsafe { state(ud) };
    s.jd = jd;
    s.writes.push(jd);
}

unsafe extern "C" fn refresh(ud: *mut c_void) {
    unsafe { state(ud) }.refreshes += 1;
}

fn callbacks(state: &mut HostState) -> NavHostCallbacks {
    NavHostCallbacks {
        user_data: (state as *mut HostState).cast::<c_void>(),
        resolve: Some(resolve),
        equatorial: Some(equatorial),
        horizontal: Some(horizontal),
        magnitude: Some(magnitude),
        angular_size: Some(angular_size),
        equation_of_time: Some(equation_of_time),
        localized_name: Some(localized_name),
        get_simulated_jd: Some(get_jd),
        get_simulated_jde: None,
        set_simulated_jd: Some(set_jd),
        refresh: Some(refresh),
    }
}

fn default_config() -> NavPredictionConfig {
    NavPredictionConfig {
        altitude_limit: NAV_ALTITUDE_ALL,
        min_altitude_deg: -90.0,
        max_altitude_deg: 90.0,
        azimuth_reference: NAV_AZIMUTH_SOUTH,
        twilight: NAV_TWILIGHT_MORNING,
        use_pinned_jd: 0,
        pinned_jd: 0.0,
    }
}

fn empty_summary() -> NavPredictionSummary {
    NavPredictionSummary {
        reference_jd: 0.0,
        evaluation_jd: 0.0,
        twilight_hours: 0.0,
        row_count: 0,
        skipped_count: 0,
    }
}

fn text(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap()
}

const LOCATION: NavLocation = NavLocation {
    latitude_deg: 52.0,
    longitude_deg: 0.0,
};
const START_JD: f64 = 2_460_390.318;
const STARS: [u32; 3] = [32349, 99999, 91262];

fn build(
    cb: &NavHostCallbacks,
    config: &NavPredictionConfig,
    rows: &mut [NavPredictionRow],
    summary: &mut NavPredictionSummary,
) -> NavStatus {
    // SAFETY: All pointers reference live locals of the stated sizes.
    unsafe {
        navstars_build_prediction_table(
            cb,
            &LOCATION,
            config,
            STARS.as_ptr(),
            STARS.len(),
            rows.as_mut_ptr(),
            rows.len(),
            summary,
        )
    }
}

fn zero_rows<const N: usize>() -> [NavPredictionRow; N] {
    [NavPredictionRow {
        number: 0,
        body_code: 0,
        hip: 0,
        label: [0; NAVSTARS_LABEL_CAPACITY],
        designator: [0; NAVSTARS_DESIGNATOR_CAPACITY],
        magnitude: 0.0,
        azimuth_deg: 0.0,
        altitude_deg: 0.0,
        declination_deg: 0.0,
        declination_text: [0; NAVSTARS_DDM_CAPACITY],
    }; N]
}

#[test]
fn prediction_table_through_callbacks() {
    let mut host = HostState::new(START_JD);
    let cb = callbacks(&mut host);
    let mut rows = zero_rows::<16>();
    let mut summary = empty_summary();

    let status = build(&cb, &default_config(), &mut rows, &mut summary);
    assert_eq!(status, NavStatus::Ok);
    assert_eq!(summary.row_count, 8);
    assert_eq!(summary.skipped_count, 1);
    assert_eq!(summary.reference_jd, 2_460_390.0);
    assert!((summary.twilight_hours - 5.018_681_985).abs() < 1e-8);

    let labels: Vec<&str> = rows[..8].iter().map(|r| text(&r.label)).collect();
    assert_eq!(labels[5], "Saturn");
    assert_eq!(labels[6], "Sirius");
    assert_eq!(labels[7], "Vega");
    assert_eq!(text(&rows[0].designator), "☉");
    assert_eq!(text(&rows[6].designator), "(1)");
    assert_eq!(rows[6].hip, 32349);
    assert_eq!(rows[6].body_code, 0);
    assert_eq!(rows[1].body_code, 301);
    assert_eq!(text(&rows[6].declination_text), "S 16°43.0'");
    assert!((rows[3].azimuth_deg - 170.0).abs() < 1e-9);

    assert_eq!(host.jd, START_JD);
    assert_eq!(host.writes.last(), Some(&START_JD));
    assert_eq!(host.refreshes, 1);
}

#[test]
fn small_buffer_reports_full_count() {
    let mut host = HostState::new(START_JD);
    let cb = callbacks(&mut host);
    let mut rows = zero_rows::<3>();
    let mut summary = empty_summary();

    let status = build(&cb, &default_config(), &mut rows, &mut summary);
    assert_eq!(status, NavStatus::BufferTooSmall);
    assert_eq!(summary.row_count, 8);
    assert_eq!(text(&rows[2].designator), "♀");
    assert_eq!(host.jd, START_JD);
}

#[test]
fn failing_body_is_skipped() {
    let mut host = HostState::new(START_JD);
    host.fail_mars = true;
    let cb = callbacks(&mut host);
    let mut rows = zero_rows::<16>();
    let mut summary = empty_summary();

    assert_eq!(
        build(&cb, &default_config(), &mut rows, &mut summary),
        NavStatus::Ok
    );
    assert_eq!(summary.skipped_count, 2);
    assert!(rows[..summary.row_count].iter().all(|r| r.body_code != 499));
}

#[test]
fn sun_failure_restores_clock() {
    let mut host = HostState::new(START_JD);
    host.sun_missing = true;
    let cb = callbacks(&mut host);
    let mut rows = zero_rows::<16>();
    let mut summary = empty_summary();

    let status = build(&cb, &default_config(), &mut rows, &mut summary);
    assert_eq!(status, NavStatus::EphemerisUnavailable);
    assert_eq!(host.jd, START_JD);
    assert_eq!(host.refreshes, 1);
}

#[test]
fn invalid_config_codes_rejected() {
    let mut host = HostState::new(START_JD);
    let cb = callbacks(&mut host);
    let mut rows = zero_rows::<16>();
    let mut summary = empty_summary();

    let mut config = default_config();
    config.azimuth_reference = 5;
    assert_eq!(
        build(&cb, &config, &mut rows, &mut summary),
        NavStatus::InvalidConfig
    );

    let mut config = default_config();
    config.altitude_limit = NAV_ALTITUDE_CUSTOM;
    config.min_altitude_deg = 50.0;
    config.max_altitude_deg = 10.0;
    assert_eq!(
        build(&cb, &config, &mut rows, &mut summary),
        NavStatus::InvalidConfig
    );
    assert!(host.writes.is_empty());
}

#[test]
fn missing_callback_rejected() {
    let mut host = HostState::new(START_JD);
    let mut cb = callbacks(&mut host);
    cb.set_simulated_jd = None;
    let mut rows = zero_rows::<16>();
    let mut summary = empty_summary();
    assert_eq!(
        build(&cb, &default_config(), &mut rows, &mut summary),
        NavStatus::MissingCallback
    );
}

#[test]
fn null_arguments_rejected() {
    let mut host = HostState::new(START_JD);
    let cb = callbacks(&mut host);
    let mut summary = empty_summary();
    // SAFETY: Null pointers are the case under test.
    let status = unsafe {
        navstars_build_prediction_table(
            &cb,
            &LOCATION,
            &default_config(),
            ptr::null(),
            3,
            ptr::null_mut(),
            0,
            &mut summary,
        )
    };
    assert_eq!(status, NavStatus::NullPointer);

    // SAFETY: Null host is the case under test.
    let status = unsafe {
        navstars_build_prediction_table(
            ptr::null(),
            &LOCATION,
            &default_config(),
            ptr::null(),
            0,
            ptr::null_mut(),
            0,
            &mut summary,
        )
    };
    assert_eq!(status, NavStatus::NullPointer);
}

#[test]
fn daily_twilight_through_callbacks() {
    let mut host = HostState::new(START_JD);
    let cb = callbacks(&mut host);
    let mut out = std::mem::MaybeUninit::<NavDailyTwilight>::uninit();

    // SAFETY: `out` is written by the call before it is read.
    let day = unsafe {
        assert_eq!(
            navstars_compute_daily_twilight(&cb, &LOCATION, out.as_mut_ptr()),
            NavStatus::Ok
        );
        out.assume_init()
    };
    assert_eq!((day.date.year, day.date.month, day.date.day), (2024, 3, 20));
    assert_eq!(day.solar.epoch_jde, 2_460_390.0);
    assert!((day.nautical.morning_hours - 4.686_94).abs() < 1e-4);
    assert!((day.nautical.evening_hours - 19.313_06).abs() < 1e-4);
    assert!(day.sun.duration_minutes.abs() < 1e-12);
    assert_eq!(day.transit_hours, 12.0);
    assert!(host.writes.is_empty());
}
