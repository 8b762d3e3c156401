//! Degrees + decimal-minutes angle formatting, as used in nautical almanacs.

/// Which hemisphere letters to use when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HemisphereAxis {
    /// N for non-negative, S for negative (declination, latitude).
    NorthSouth,
    /// E for non-negative, W for negative (longitude).
    EastWest,
}

impl HemisphereAxis {
    const fn letter(self, negative: bool) -> char {
        match (self, negative) {
            (Self::NorthSouth, false) => 'N',
            (Self::NorthSouth, true) => 'S',
            (Self::EastWest, false) => 'E',
            (Self::EastWest, true) => 'W',
        }
    }
}

/// Degrees and decimal minutes of an unsigned angle, with a sign flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ddm {
    pub negative: bool,
    pub degrees: u32,
    /// Minutes rounded to one decimal place, [0, 60).
    pub minutes: f64,
}

/// Split decimal degrees into whole degrees and minutes rounded to 0.1'.
///
/// A rounded value of 60.0' carries into the degrees.
pub fn deg_to_ddm(deg: f64) -> Ddm {
    let negative = deg < 0.0;
    let abs = deg.abs();
    let mut degrees = abs.trunc() as u32;
    let mut minutes = ((abs - abs.trunc()) * 600.0).round() / 10.0;
    if minutes >= 60.0 {
        degrees += 1;
        minutes = 0.0;
    }
    Ddm {
        negative,
        degrees,
        minutes,
    }
}

/// Format an angle as `"N 12°34.5'"`.
pub fn format_ddm(deg: f64, axis: HemisphereAxis) -> String {
    let d = deg_to_ddm(deg);
    // Avoid "S 0°00.0'" for tiny negatives
    let negative = d.negative && (d.degrees > 0 || d.minutes > 0.0);
    format!(
        "{} {}°{:04.1}'",
        axis.letter(negative),
        d.degrees,
        d.minutes
    )
}
