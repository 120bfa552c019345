//! Terminal renderers. Both views read the same [`DisplayRow`]s and differ only
//! in layout.

use forecast_core::{
    Category, DisplayRow, Report,
    export::{TABLE_HEADER, generated_on},
};

pub fn icon(category: Category) -> &'static str {
    match category {
        Category::Sunny => "☀",
        Category::Rain => "☂",
        Category::Cloudy => "☁",
        Category::Snow => "❄",
        Category::Thunderstorm => "⚡",
        Category::Fog => "≋",
        Category::PartlyCloudy => "⛅",
        Category::Clear => "☾",
    }
}

pub fn render_heading(report: &Report) -> String {
    format!(
        "{} Weather Forecast Report\nNext {} days\nGenerated on {}\n",
        report.city,
        report.day_count(),
        generated_on(report)
    )
}

pub fn render_table(rows: &[DisplayRow]) -> String {
    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.day_label.clone(),
                format!("{} {}", icon(row.category), row.display_label()),
                row.precipitation_text.clone(),
                row.temp_min_text.clone(),
                row.temp_max_text.clone(),
                row.wind_text.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADER.map(|h| h.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADER.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

pub fn render_cards(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{}  {} {}\n  Precipitation: {}\n  Temperature:   {} / {}\n  Wind Speed:    {}\n\n",
            row.day_label,
            icon(row.category),
            row.display_label(),
            row.precipitation_text,
            row.temp_min_text,
            row.temp_max_text,
            row.wind_text,
        ));
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
