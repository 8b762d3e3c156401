//! Host callback vtable and its adapter to the Rust host traits.

use std::ffi::{c_char, c_void};

use navstars_core::{
    Body, EphemerisError, EphemerisSource, EquatorialCoords, HorizontalCoords, SimulatedClock,
};

use crate::{NAVSTARS_LABEL_CAPACITY, decode_nul_terminated};

/// Callback return code: success.
pub const NAV_HOST_OK: i32 = 0;
/// Callback return code: the host does not know the body.
pub const NAV_HOST_NOT_FOUND: i32 = 1;

pub type NavResolveFn =
    unsafe extern "C" fn(user_data: *mut c_void, body_code: i32, hip: u32, out: *mut u64) -> i32;
pub type NavPairFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    handle: u64,
    jd: f64,
    out_a: *mut f64,
    out_b: *mut f64,
) -> i32;
pub type NavScalarFn =
    unsafe extern "C" fn(user_data: *mut c_void, handle: u64, jd: f64, out: *mut f64) -> i32;
pub type NavEotFn = unsafe extern "C" fn(user_data: *mut c_void, jde: f64, out: *mut f64) -> i32;
pub type NavNameFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    handle: u64,
    buf: *mut c_char,
    len: usize,
) -> i32;
pub type NavGetJdFn = unsafe extern "C" fn(user_data: *mut c_void) -> f64;
pub type NavSetJdFn = unsafe extern "C" fn(user_data: *mut c_void, jd: f64);
pub type NavRefreshFn = unsafe extern "C" fn(user_data: *mut c_void);

/// Ephemeris and clock callbacks supplied by the host.
///
/// `equatorial` writes (right ascension, declination) and `horizontal`
/// writes (azimuth from north through east, altitude), all in radians.
/// `localized_name`, `get_simulated_jde` and `refresh` are optional.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NavHostCallbacks {
    pub user_data: *mut c_void,
    pub resolve: Option<NavResolveFn>,
    pub equatorial: Option<NavPairFn>,
    pub horizontal: Option<NavPairFn>,
    pub magnitude: Option<NavScalarFn>,
    pub angular_size: Option<NavScalarFn>,
    pub equation_of_time: Option<NavEotFn>,
    pub localized_name: Option<NavNameFn>,
    pub get_simulated_jd: Option<NavGetJdFn>,
    pub get_simulated_jde: Option<NavGetJdFn>,
    pub set_simulated_jd: Option<NavSetJdFn>,
    pub refresh: Option<NavRefreshFn>,
}

impl NavHostCallbacks {
    /// All mandatory callbacks are present.
    pub fn is_complete(&self) -> bool {
        self.resolve.is_some()
            && self.equatorial.is_some()
            && self.horizontal.is_some()
            && self.magnitude.is_some()
            && self.angular_size.is_some()
            && self.equation_of_time.is_some()
            && self.get_simulated_jd.is_some()
            && self.set_simulated_jd.is_some()
    }
}

/// Resolved body: the host handle plus the body it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostHandle {
    pub raw: u64,
    pub body: Body,
}

/// [`EphemerisSource`] + [`SimulatedClock`] over a callback vtable.
pub(crate) struct CallbackHost<'a> {
    callbacks: &'a NavHostCallbacks,
}

impl<'a> CallbackHost<'a> {
    /// Callers must have checked [`NavHostCallbacks::is_complete`].
    pub(crate) fn new(callbacks: &'a NavHostCallbacks) -> Self {
        Self { callbacks }
    }
}

fn missing(name: &str) -> EphemerisError {
    EphemerisError::Host(format!("{name} callback not provided"))
}

fn check(code: i32, body: Body, what: &str) -> Result<(), EphemerisError> {
    match code {
        NAV_HOST_OK => Ok(()),
        NAV_HOST_NOT_FOUND => Err(EphemerisError::BodyNotFound(body.to_string())),
        other => Err(EphemerisError::Unavailable {
            body: body.to_string(),
            reason: format!("{what} callback returned {other}"),
        }),
    }
}

impl CallbackHost<'_> {
    fn pair(
        &self,
        f: Option<NavPairFn>,
        what: &str,
        handle: HostHandle,
        jd: f64,
    ) -> Result<(f64, f64), EphemerisError> {
        let f = f.ok_or_else(|| missing(what))?;
        let (mut a, mut b) = (f64::NAN, f64::NAN);
        // SAFETY: The host guarantees the callback contract; output pointers are valid locals.
        let code = unsafe { f(self.callbacks.user_data, handle.raw, jd, &mut a, &mut b) };
        check(code, handle.body, what)?;
        Ok((a, b))
    }

    fn scalar(
        &self,
        f: Option<NavScalarFn>,
        what: &str,
        handle: HostHandle,
        jd: f64,
    ) -> Result<f64, EphemerisError> {
        let f = f.ok_or_else(|| missing(what))?;
        let mut v = f64::NAN;
        // SAFETY: The host guarantees the callback contract; the output pointer is a valid local.
        let code = unsafe { f(self.callbacks.user_data, handle.raw, jd, &mut v) };
        check(code, handle.body, what)?;
        Ok(v)
    }
}

impl EphemerisSource for CallbackHost<'_> {
    type Handle = HostHandle;

    fn resolve(&self, body: Body) -> Result<HostHandle, EphemerisError> {
        let f = self.callbacks.resolve.ok_or_else(|| missing("resolve"))?;
        let mut raw = 0_u64;
        let hip = body.hip().unwrap_or(0);
        // SAFETY: The host guarantees the callback contract; the output pointer is a valid local.
        let code = unsafe { f(self.callbacks.user_data, body.code(), hip, &mut raw) };
        check(code, body, "resolve")?;
        Ok(HostHandle { raw, body })
    }

    fn equatorial(&self, h: HostHandle, jd: f64) -> Result<EquatorialCoords, EphemerisError> {
        let (ra, dec) = self.pair(self.callbacks.equatorial, "equatorial", h, jd)?;
        Ok(EquatorialCoords::new(ra, dec))
    }

    fn horizontal(&self, h: HostHandle, jd: f64) -> Result<HorizontalCoords, EphemerisError> {
        let (az, alt) = self.pair(self.callbacks.horizontal, "horizontal", h, jd)?;
        Ok(HorizontalCoords::new(az, alt))
    }

    fn magnitude(&self, h: HostHandle, jd: f64) -> Result<f64, EphemerisError> {
        self.scalar(self.callbacks.magnitude, "magnitude", h, jd)
    }

    fn angular_size_rad(&self, h: HostHandle, jd: f64) -> Result<f64, EphemerisError> {
        self.scalar(self.callbacks.angular_size, "angular_size", h, jd)
    }

    fn equation_of_time_minutes(&self, jde: f64) -> Result<f64, EphemerisError> {
        let f = self
            .callbacks
            .equation_of_time
            .ok_or_else(|| missing("equation_of_time"))?;
        let mut v = f64::NAN;
        // SAFETY: The host guarantees the callback contract; the output pointer is a valid local.
        let code = unsafe { f(self.callbacks.user_data, jde, &mut v) };
        check(code, Body::Sun, "equation_of_time")?;
        Ok(v)
    }

    fn localized_name(&self, h: HostHandle) -> String {
        let Some(f) = self.callbacks.localized_name else {
            return h.body.to_string();
        };
        let mut buf = [0_u8; NAVSTARS_LABEL_CAPACITY];
        // SAFETY: The buffer is a valid local of the advertised length.
        let code = unsafe {
            f(
                self.callbacks.user_data,
                h.raw,
                buf.as_mut_ptr().cast::<c_char>(),
                buf.len(),
            )
        };
        if code != NAV_HOST_OK {
            return h.body.to_string();
        }
        decode_nul_terminated(&buf)
    }
}

impl SimulatedClock for CallbackHost<'_> {
    fn simulated_jd(&self) -> f64 {
        match self.callbacks.get_simulated_jd {
            // SAFETY: The host guarantees the callback contract.
            Some(f) => unsafe { f(self.callbacks.user_data) },
            None => f64::NAN,
        }
    }

    fn set_simulated_jd(&mut self, jd: f64) {
        if let Some(f) = self.callbacks.set_simulated_jd {
            // SAFETY: The host guarantees the callback contract.
            unsafe { f(self.callbacks.user_data, jd) }
        }
    }

    fn simulated_jde(&self) -> f64 {
        match self.callbacks.get_simulated_jde {
            // SAFETY: The host guarantees the callback contract.
            Some(f) => unsafe { f(self.callbacks.user_data) },
            None => self.simulated_jd(),
        }
    }

    fn refresh(&mut self) {
        if let Some(f) = self.callbacks.refresh {
            // SAFETY: The host guarantees the callback contract.
            unsafe { f(self.callbacks.user_data) }
        }
    }
}
