//! Presentation-agnostic rows derived from a [`Report`].
//!
//! Every rendering surface (terminal table, card list, PDF table) reads these
//! rows instead of formatting prediction values itself.

use serde::Serialize;

use crate::{classify::Category, model::Report};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub day_label: String,
    /// Used by renderers for icon lookup.
    pub category: Category,
    /// Underlying label, casing untouched.
    pub weather_label: String,
    pub precipitation_text: String,
    pub temp_min_text: String,
    pub temp_max_text: String,
    pub wind_text: String,
}

impl DisplayRow {
    /// Weather label with the first letter of every word upper-cased.
    pub fn display_label(&self) -> String {
        capitalize_words(&self.weather_label)
    }
}

pub fn project(report: &Report) -> Vec<DisplayRow> {
    report
        .predictions
        .iter()
        .map(|p| DisplayRow {
            day_label: format!("Day {}", p.day_index),
            category: p.category,
            weather_label: p.weather_label.clone(),
            precipitation_text: format!("{}%", fmt_num(p.precipitation)),
            temp_min_text: format!("{}°", fmt_num(p.temp_min)),
            temp_max_text: format!("{}°", fmt_num(p.temp_max)),
            wind_text: format!("{} km/h", fmt_num(p.wind)),
        })
        .collect()
}

/// Shortest form of `value`; negative zero prints as `0`.
fn fmt_num(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::RawPrediction, report::build};

    fn sample_report(days: usize) -> Report {
        let raw: Vec<_> = (0..days)
            .map(|i| RawPrediction {
                weather: Some("light rain".into()),
                precipitation: Some(i as f64 * 1.5),
                temp_min: -2.0,
                temp_max: 7.25,
                wind: 12.0,
            })
            .collect();
        build("Bergen", &raw)
    }

    #[test]
    fn one_row_per_prediction_with_day_labels() {
        let report = sample_report(5);
        let rows = project(&report);

        assert_eq!(rows.len(), report.predictions.len());
        for (k, row) in rows.iter().enumerate() {
            assert_eq!(row.day_label, format!("Day {}", k + 1));
        }
    }

    #[test]
    fn formats_values_with_units() {
        let rows = project(&sample_report(2));
        let row = &rows[1];

        assert_eq!(row.category, Category::Rain);
        assert_eq!(row.weather_label, "light rain");
        assert_eq!(row.precipitation_text, "1.5%");
        assert_eq!(row.temp_min_text, "-2°");
        assert_eq!(row.temp_max_text, "7.25°");
        assert_eq!(row.wind_text, "12 km/h");
    }

    #[test]
    fn defaulted_precipitation_prints_as_zero_percent() {
        let report = build(
            "Bergen",
            &[RawPrediction {
                weather: None,
                precipitation: None,
                temp_min: 5.0,
                temp_max: 15.0,
                wind: 10.0,
            }],
        );
        let row = &project(&report)[0];
        assert_eq!(row.precipitation_text, "0%");
        assert_eq!(row.weather_label, "Clear");
    }

    #[test]
    fn display_label_capitalizes_each_word_only() {
        let rows = project(&sample_report(1));
        assert_eq!(rows[0].display_label(), "Light Rain");
        assert_eq!(rows[0].weather_label, "light rain");

        assert_eq!(capitalize_words("THUNDERSTORM"), "THUNDERSTORM");
        assert_eq!(capitalize_words("scattered  clouds"), "Scattered  Clouds");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        let report = build(
            "Tromsø",
            &[RawPrediction {
                weather: Some("snow".into()),
                precipitation: Some(-0.0),
                temp_min: -0.0,
                temp_max: 0.0,
                wind: -0.0,
            }],
        );
        let row = &project(&report)[0];

        assert_eq!(row.precipitation_text, "0%");
        assert_eq!(row.temp_min_text, "0°");
        assert_eq!(row.temp_max_text, "0°");
        assert_eq!(row.wind_text, "0 km/h");
        assert_eq!(fmt_num(-0.5), "-0.5");
    }

    #[test]
    fn empty_report_projects_to_no_rows() {
        assert!(project(&sample_report(0)).is_empty());
    }

    #[test]
    fn projecting_twice_is_identical() {
        let report = sample_report(4);
        assert_eq!(project(&report), project(&report));
    }
}
