//! Column-based ordering of prediction rows.

use std::cmp::Ordering;

use crate::prediction_types::PredictionRow;

/// Sortable columns of the prediction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PredictionColumn {
    /// Evaluation order.
    #[default]
    Number,
    Name,
    Azimuth,
    Altitude,
    Magnitude,
    Declination,
}

impl PredictionColumn {
    pub const ALL: [Self; 6] = [
        Self::Number,
        Self::Name,
        Self::Azimuth,
        Self::Altitude,
        Self::Magnitude,
        Self::Declination,
    ];
}

/// Compare two rows by `column`.
///
/// Numeric columns compare the underlying values rather than their text,
/// so `"9.5"` sorts before `"10.1"` and declinations sort south to north.
pub fn compare_rows(a: &PredictionRow, b: &PredictionRow, column: PredictionColumn) -> Ordering {
    match column {
        PredictionColumn::Number => a.number.cmp(&b.number),
        PredictionColumn::Name => a.label.to_lowercase().cmp(&b.label.to_lowercase()),
        PredictionColumn::Azimuth => a.azimuth_deg.total_cmp(&b.azimuth_deg),
        PredictionColumn::Altitude => a.altitude_deg.total_cmp(&b.altitude_deg),
        PredictionColumn::Magnitude => a.magnitude.total_cmp(&b.magnitude),
        PredictionColumn::Declination => a.declination_deg.total_cmp(&b.declination_deg),
    }
}

/// Stable sort by `column`, ties keeping evaluation order.
pub fn sort_rows(rows: &mut [PredictionRow], column: PredictionColumn, descending: bool) {
    rows.sort_by(|a, b| {
        let ord = compare_rows(a, b, column);
        if descending { ord.reverse() } else { ord }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstars_core::Body;

    fn row(number: usize, label: &str, az: f64, alt: f64, mag: f64, dec: f64) -> PredictionRow {
        PredictionRow {
            number,
            body: Body::Star(number as u32 + 1),
            label: label.to_string(),
            designator: format!("({})", number + 1),
            magnitude: mag,
            azimuth_deg: az,
            altitude_deg: alt,
            declination_deg: dec,
            declination_text: String::new(),
        }
    }

    fn sample() -> Vec<PredictionRow> {
        vec![
            row(0, "vega", 300.0, 45.0, 0.03, 38.8),
            row(1, "Altair", 10.1, 20.0, 0.77, 8.9),
            row(2, "Deneb", 9.5, 60.0, 1.25, 45.3),
        ]
    }

    fn labels(rows: &[PredictionRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn azimuth_numeric_not_lexical() {
        let mut rows = sample();
        sort_rows(&mut rows, PredictionColumn::Azimuth, false);
        assert_eq!(labels(&rows), ["Deneb", "Altair", "vega"]);
    }

    #[test]
    fn name_is_case_insensitive() {
        let mut rows = sample();
        sort_rows(&mut rows, PredictionColumn::Name, false);
        assert_eq!(labels(&rows), ["Altair", "Deneb", "vega"]);
    }

    #[test]
    fn magnitude_descending() {
        let mut rows = sample();
        sort_rows(&mut rows, PredictionColumn::Magnitude, true);
        assert_eq!(labels(&rows), ["Deneb", "Altair", "vega"]);
    }

    #[test]
    fn number_restores_evaluation_order() {
        let mut rows = sample();
        sort_rows(&mut rows, PredictionColumn::Declination, false);
        assert_eq!(labels(&rows), ["Altair", "vega", "Deneb"]);
        sort_rows(&mut rows, PredictionColumn::Number, false);
        assert_eq!(labels(&rows), ["vega", "Altair", "Deneb"]);
    }

    #[test]
    fn altitude_order() {
        let rows = sample();
        assert_eq!(
            compare_rows(&rows[0], &rows[2], PredictionColumn::Altitude),
            Ordering::Less
        );
    }
}
