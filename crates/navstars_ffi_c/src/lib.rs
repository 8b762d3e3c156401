//! C-facing ABI for the NavStars engine.
//!
//! The host application supplies ephemeris and clock access through
//! [`NavHostCallbacks`]; the library computes twilight bands, the daily
//! summary and the prediction table. Optional values cross the boundary as
//! NaN, strings as NUL-terminated UTF-8 in fixed-size buffers.

use std::ffi::c_char;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use navstars_core::{EphemerisError, ObserverLocation};
use navstars_frames::AzimuthReference;
use navstars_search::{
    AltitudeLimit, DailyTwilight, PredictionConfig, PredictionRow, SearchError, SolarSnapshot,
    TwilightResult, TwilightSide, TwilightThreshold, build_prediction_table,
    compute_daily_twilight, compute_twilight, max_twilight_duration_minutes,
};
use navstars_time::{CalendarDate, TimeError, format_utc_clock, wrap_hours};

pub mod host;

pub use host::{
    NAV_HOST_NOT_FOUND, NAV_HOST_OK, NavEotFn, NavGetJdFn, NavHostCallbacks, NavNameFn,
    NavPairFn, NavRefreshFn, NavResolveFn, NavScalarFn, NavSetJdFn,
};

use host::CallbackHost;

/// ABI version of the exported C API.
pub const NAVSTARS_API_VERSION: u32 = 1;

/// Byte capacity of label buffers, including the terminating NUL.
pub const NAVSTARS_LABEL_CAPACITY: usize = 64;
/// Byte capacity of designator buffers, including the terminating NUL.
pub const NAVSTARS_DESIGNATOR_CAPACITY: usize = 16;
/// Byte capacity of declination text buffers, including the terminating NUL.
pub const NAVSTARS_DDM_CAPACITY: usize = 32;
/// Minimum buffer size for [`navstars_format_clock`] ("HH:MM UTC" + NUL).
pub const NAVSTARS_CLOCK_CAPACITY: usize = 10;

/// C-compatible status codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStatus {
    Ok = 0,
    InvalidConfig = 1,
    InvalidLocation = 2,
    InvalidDate = 3,
    BodyNotFound = 4,
    EphemerisUnavailable = 5,
    HostError = 6,
    BufferTooSmall = 7,
    NullPointer = 8,
    MissingCallback = 9,
    InvalidThreshold = 10,
    Internal = 255,
}

impl From<&EphemerisError> for NavStatus {
    fn from(value: &EphemerisError) -> Self {
        match value {
            EphemerisError::BodyNotFound(_) => Self::BodyNotFound,
            EphemerisError::Unavailable { .. } => Self::EphemerisUnavailable,
            EphemerisError::Host(_) => Self::HostError,
            _ => Self::Internal,
        }
    }
}

impl From<&TimeError> for NavStatus {
    fn from(_: &TimeError) -> Self {
        Self::InvalidDate
    }
}

impl From<&SearchError> for NavStatus {
    fn from(value: &SearchError) -> Self {
        match value {
            SearchError::Ephemeris(e) => e.into(),
            SearchError::Time(e) => e.into(),
            SearchError::InvalidLocation(_) => Self::InvalidLocation,
            SearchError::InvalidConfig(_) => Self::InvalidConfig,
            _ => Self::Internal,
        }
    }
}

fn ffi_boundary(f: impl FnOnce() -> NavStatus) -> NavStatus {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => {
            log::error!("panic caught at the C boundary");
            NavStatus::Internal
        }
    }
}

/// Copy `s` into a NUL-terminated buffer, truncating at a UTF-8 boundary.
fn encode_c_utf8<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0_u8; N];
    if N == 0 {
        return out;
    }
    let mut end = s.len().min(N - 1);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    out[..end].copy_from_slice(&s.as_bytes()[..end]);
    out
}

pub(crate) fn decode_nul_terminated(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

fn opt_to_nan(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// C-compatible types
// ---------------------------------------------------------------------------

/// Observer position in degrees, north and east positive.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl From<NavLocation> for ObserverLocation {
    fn from(value: NavLocation) -> Self {
        ObserverLocation::new(value.latitude_deg, value.longitude_deg)
    }
}

/// Solar sample for the twilight calculator.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSolarSample {
    pub epoch_jde: f64,
    pub declination_rad: f64,
    pub equation_of_time_min: f64,
}

impl From<NavSolarSample> for SolarSnapshot {
    fn from(value: NavSolarSample) -> Self {
        SolarSnapshot {
            epoch_jde: value.epoch_jde,
            declination_rad: value.declination_rad,
            equation_of_time_min: value.equation_of_time_min,
        }
    }
}

/// Event altitude and maximum duration for one twilight computation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTwilightParams {
    pub altitude_deg: f64,
    pub max_duration_minutes: f64,
}

/// Twilight result. Fields without an event are NaN.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTwilightResult {
    pub morning_hours: f64,
    pub evening_hours: f64,
    pub duration_minutes: f64,
    pub transit_hours: f64,
    pub event_hour_angle_rad: f64,
}

impl From<&TwilightResult> for NavTwilightResult {
    fn from(r: &TwilightResult) -> Self {
        Self {
            morning_hours: opt_to_nan(r.morning_hours),
            evening_hours: opt_to_nan(r.evening_hours),
            duration_minutes: opt_to_nan(r.duration_minutes),
            transit_hours: r.transit_hours,
            event_hour_angle_rad: opt_to_nan(r.event_hour_angle_rad),
        }
    }
}

/// Gregorian date; `weekday` is 0 for Sunday through 6 for Saturday.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavCalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: u32,
}

impl From<CalendarDate> for NavCalendarDate {
    fn from(d: CalendarDate) -> Self {
        Self {
            year: d.year,
            month: d.month,
            day: d.day,
            weekday: d.weekday.index(),
        }
    }
}

/// Daily twilight summary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavDailyTwilight {
    pub date: NavCalendarDate,
    pub solar: NavSolarSample,
    pub civil: NavTwilightResult,
    pub nautical: NavTwilightResult,
    pub astronomical: NavTwilightResult,
    /// Sunrise (morning) and sunset (evening).
    pub sun: NavTwilightResult,
    pub transit_hours: f64,
}

impl From<&DailyTwilight> for NavDailyTwilight {
    fn from(d: &DailyTwilight) -> Self {
        Self {
            date: d.date.into(),
            solar: NavSolarSample {
                epoch_jde: d.solar.epoch_jde,
                declination_rad: d.solar.declination_rad,
                equation_of_time_min: d.solar.equation_of_time_min,
            },
            civil: (&d.civil).into(),
            nautical: (&d.nautical).into(),
            astronomical: (&d.astronomical).into(),
            sun: (&d.sun).into(),
            transit_hours: d.transit_hours,
        }
    }
}

pub const NAV_ALTITUDE_ALL: i32 = 0;
pub const NAV_ALTITUDE_ABOVE_TWENTY: i32 = 1;
pub const NAV_ALTITUDE_CUSTOM: i32 = 2;

pub const NAV_AZIMUTH_SOUTH: i32 = 0;
pub const NAV_AZIMUTH_NORTH: i32 = 1;

pub const NAV_TWILIGHT_MORNING: i32 = 0;
pub const NAV_TWILIGHT_EVENING: i32 = 1;

/// Prediction table options.
///
/// `min_altitude_deg`/`max_altitude_deg` are only read when
/// `altitude_limit` is [`NAV_ALTITUDE_CUSTOM`]; `pinned_jd` only when
/// `use_pinned_jd` is non-zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPredictionConfig {
    pub altitude_limit: i32,
    pub min_altitude_deg: f64,
    pub max_altitude_deg: f64,
    pub azimuth_reference: i32,
    pub twilight: i32,
    pub use_pinned_jd: u8,
    pub pinned_jd: f64,
}

impl NavPredictionConfig {
    fn to_rust(self) -> Result<PredictionConfig, NavStatus> {
        let altitude_limit = match self.altitude_limit {
            NAV_ALTITUDE_ALL => AltitudeLimit::All,
            NAV_ALTITUDE_ABOVE_TWENTY => AltitudeLimit::AboveTwentyDegrees,
            NAV_ALTITUDE_CUSTOM => AltitudeLimit::Custom {
                min_deg: self.min_altitude_deg,
                max_deg: self.max_altitude_deg,
            },
            _ => return Err(NavStatus::InvalidConfig),
        };
        let azimuth_reference = match self.azimuth_reference {
            NAV_AZIMUTH_SOUTH => AzimuthReference::South,
            NAV_AZIMUTH_NORTH => AzimuthReference::North,
            _ => return Err(NavStatus::InvalidConfig),
        };
        let twilight = match self.twilight {
            NAV_TWILIGHT_MORNING => TwilightSide::Morning,
            NAV_TWILIGHT_EVENING => TwilightSide::Evening,
            _ => return Err(NavStatus::InvalidConfig),
        };
        Ok(PredictionConfig {
            altitude_limit,
            azimuth_reference,
            twilight,
            pinned_jd: (self.use_pinned_jd != 0).then_some(self.pinned_jd),
        })
    }
}

/// One prediction table row.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPredictionRow {
    pub number: u32,
    /// NAIF code of the body, 0 for stars.
    pub body_code: i32,
    /// Hipparcos number, 0 for solar-system bodies.
    pub hip: u32,
    pub label: [u8; NAVSTARS_LABEL_CAPACITY],
    pub designator: [u8; NAVSTARS_DESIGNATOR_CAPACITY],
    pub magnitude: f64,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    pub declination_deg: f64,
    pub declination_text: [u8; NAVSTARS_DDM_CAPACITY],
}

impl From<&PredictionRow> for NavPredictionRow {
    fn from(r: &PredictionRow) -> Self {
        Self {
            number: u32::try_from(r.number).unwrap_or(u32::MAX),
            body_code: r.body.code(),
            hip: r.body.hip().unwrap_or(0),
            label: encode_c_utf8(&r.label),
            designator: encode_c_utf8(&r.designator),
            magnitude: r.magnitude,
            azimuth_deg: r.azimuth_deg,
            altitude_deg: r.altitude_deg,
            declination_deg: r.declination_deg,
            declination_text: encode_c_utf8(&r.declination_text),
        }
    }
}

/// Summary written next to the row buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPredictionSummary {
    pub reference_jd: f64,
    pub evaluation_jd: f64,
    /// UTC hour of the selected nautical twilight, NaN when there is none.
    pub twilight_hours: f64,
    /// Rows produced, which may exceed the buffer capacity.
    pub row_count: usize,
    pub skipped_count: usize,
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Returns the ABI version of the exported C API.
#[unsafe(no_mangle)]
pub extern "C" fn navstars_api_version() -> u32 {
    NAVSTARS_API_VERSION
}

/// Altitude and maximum duration for a named twilight band.
///
/// `threshold` is 0 for civil, 1 for nautical, 2 for astronomical.
///
/// # Safety
/// `out` must be a valid, writable pointer to [`NavTwilightParams`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn navstars_twilight_params(
    threshold: i32,
    out: *mut NavTwilightParams,
) -> NavStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return NavStatus::NullPointer;
        }
        let t = match usize::try_from(threshold)
            .ok()
            .and_then(|i| TwilightThreshold::ALL.get(i))
        {
            Some(t) => *t,
            None => return NavStatus::InvalidThreshold,
        };
        let params = NavTwilightParams {
            altitude_deg: t.altitude_deg(),
            max_duration_minutes: max_twilight_duration_minutes(t.altitude_deg(), t.band_deg()),
        };
        // SAFETY: Pointer is checked non-null above.
        unsafe { *out = params };
        NavStatus::Ok
    })
}

/// Linearized twilight for one event altitude.
///
/// # Safety
/// All pointers must be valid; `out` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn navstars_compute_twilight(
    params: *const NavTwilightParams,
    location: *const NavLocation,
    solar: *const NavSolarSample,
    out: *mut NavTwilightResult,
) -> NavStatus {
    ffi_boundary(|| {
        if params.is_null() || location.is_null() || solar.is_null() || out.is_null() {
            return NavStatus::NullPointer;
        }
        // SAFETY: Pointers are checked non-null above.
        let (params, location, solar) = unsafe { (*params, *location, *solar) };
        let location = ObserverLocation::from(location);
        if !location.is_valid() {
            return NavStatus::InvalidLocation;
        }
        let r = compute_twilight(
            params.altitude_deg,
            params.max_duration_minutes,
            &location,
            &solar.into(),
        );
        // SAFETY: Pointer is checked non-null above.
        unsafe { *out = (&r).into() };
        NavStatus::Ok
    })
}

/// Daily twilight summary for the host's simulated date.
///
/// The host clock is only read.
///
/// # Safety
/// `host` must point to a valid callback table whose callbacks honour
/// their contracts for the duration of the call; `location` must be valid
/// and `out` writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn navstars_compute_daily_twilight(
    host: *const NavHostCallbacks,
    location: *const NavLocation,
    out: *mut NavDailyTwilight,
) -> NavStatus {
    ffi_boundary(|| {
        if host.is_null() || location.is_null() || out.is_null() {
            return NavStatus::NullPointer;
        }
        // SAFETY: Pointers are checked non-null above.
        let (callbacks, location) = unsafe { (&*host, *location) };
        if !callbacks.is_complete() {
            log::warn!("daily twilight: host callback table is incomplete");
            return NavStatus::MissingCallback;
        }
        let adapter = CallbackHost::new(callbacks);
        match compute_daily_twilight(&adapter, &location.into()) {
            Ok(day) => {
                // SAFETY: Pointer is checked non-null above.
                unsafe { *out = (&day).into() };
                NavStatus::Ok
            }
            Err(e) => NavStatus::from(&e),
        }
    })
}

/// Build the prediction table at the selected nautical twilight.
///
/// Up to `capacity` rows are written to `out_rows`. When the table has
/// more rows the first `capacity` are written, `out_summary.row_count`
/// holds the full count and [`NavStatus::BufferTooSmall`] is returned.
/// The host clock is restored before returning.
///
/// # Safety
/// `host`, `location`, `config` and `out_summary` must be valid pointers.
/// `stars` must point to `n_stars` values (it may be null when `n_stars`
/// is 0). `out_rows` must point to `capacity` writable rows (it may be
/// null when `capacity` is 0).
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn navstars_build_prediction_table(
    host: *const NavHostCallbacks,
    location: *const NavLocation,
    config: *const NavPredictionConfig,
    stars: *const u32,
    n_stars: usize,
    out_rows: *mut NavPredictionRow,
    capacity: usize,
    out_summary: *mut NavPredictionSummary,
) -> NavStatus {
    ffi_boundary(|| {
        if host.is_null() || location.is_null() || config.is_null() || out_summary.is_null() {
            return NavStatus::NullPointer;
        }
        if (stars.is_null() && n_stars > 0) || (out_rows.is_null() && capacity > 0) {
            return NavStatus::NullPointer;
        }
        // SAFETY: Pointers are checked non-null above.
        let (callbacks, location, config) = unsafe { (&*host, *location, *config) };
        if !callbacks.is_complete() {
            log::warn!("prediction: host callback table is incomplete");
            return NavStatus::MissingCallback;
        }
        let config = match config.to_rust() {
            Ok(c) => c,
            Err(status) => return status,
        };
        let stars: &[u32] = if n_stars == 0 {
            &[]
        } else {
            // SAFETY: Caller guarantees `stars` points to `n_stars` values.
            unsafe { std::slice::from_raw_parts(stars, n_stars) }
        };

        let mut adapter = CallbackHost::new(callbacks);
        let table = match build_prediction_table(&mut adapter, &location.into(), stars, &config)
        {
            Ok(t) => t,
            Err(e) => return NavStatus::from(&e),
        };

        let written = table.rows.len().min(capacity);
        for (i, row) in table.rows.iter().take(written).enumerate() {
            // SAFETY: i < capacity and the caller guarantees `capacity` rows.
            unsafe { ptr::write(out_rows.add(i), row.into()) };
        }
        let summary = NavPredictionSummary {
            reference_jd: table.reference_jd,
            evaluation_jd: table.evaluation_jd,
            twilight_hours: opt_to_nan(table.twilight_hours),
            row_count: table.rows.len(),
            skipped_count: table.skipped.len(),
        };
        // SAFETY: Pointer is checked non-null above.
        unsafe { *out_summary = summary };

        if written < table.rows.len() {
            NavStatus::BufferTooSmall
        } else {
            NavStatus::Ok
        }
    })
}

/// Format a fractional UTC hour as "HH:MM UTC". The hour is wrapped into
/// [0, 24) first.
///
/// # Safety
/// `buf` must point to `len` writable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn navstars_format_clock(
    hours: f64,
    buf: *mut c_char,
    len: usize,
) -> NavStatus {
    ffi_boundary(|| {
        if buf.is_null() {
            return NavStatus::NullPointer;
        }
        if len < NAVSTARS_CLOCK_CAPACITY {
            return NavStatus::BufferTooSmall;
        }
        let text = format_utc_clock(wrap_hours(hours));
        let encoded: [u8; NAVSTARS_CLOCK_CAPACITY] = encode_c_utf8(&text);
        // SAFETY: Caller guarantees `len` >= NAVSTARS_CLOCK_CAPACITY writable bytes.
        unsafe {
            ptr::copy_nonoverlapping(encoded.as_ptr(), buf.cast::<u8>(), encoded.len());
        }
        NavStatus::Ok
    })
}

/// Calendar date and weekday of a Julian Date.
///
/// # Safety
/// `out` must be a valid, writable pointer to [`NavCalendarDate`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn navstars_jd_to_calendar(jd: f64, out: *mut NavCalendarDate) -> NavStatus {
    ffi_boundary(|| {
        if out.is_null() {
            return NavStatus::NullPointer;
        }
        match CalendarDate::from_jd(jd) {
            Ok(d) => {
                // SAFETY: Pointer is checked non-null above.
                unsafe { *out = d.into() };
                NavStatus::Ok
            }
            Err(e) => NavStatus::from(&e),
        }
    })
}
