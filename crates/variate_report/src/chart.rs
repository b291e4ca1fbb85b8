//! Text bar chart of observed against expected frequencies.
//!
//! Each bin renders as one line: label, a bar of `#` proportional to the
//! observed count, and a `|` marker at the expected count.
//!
//! ```text
//! [0.00, 2.00)  ##########|         21   (20.00)
//! [2.00, 4.00)  ########  |         17   (20.00)
//! ```

use variate_core::pipeline::FrequencyRow;

/// Renders `rows` with bars scaled so the largest value spans `width` cells.
pub fn render_bar_chart(rows: &[FrequencyRow], width: usize) -> String {
    let width = width.max(1);
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let peak = rows
        .iter()
        .map(|r| (r.observed as f64).max(r.expected))
        .fold(0.0_f64, f64::max);
    let scale = if peak > 0.0 { width as f64 / peak } else { 0.0 };

    let mut out = String::new();
    for row in rows {
        let bar = (row.observed as f64 * scale).round() as usize;
        let marker = ((row.expected * scale).round() as usize).min(width);

        let mut cells: Vec<char> = (0..=width)
            .map(|i| if i < bar { '#' } else { ' ' })
            .collect();
        cells[marker] = '|';
        let cells: String = cells.into_iter().collect();

        out.push_str(&format!(
            "{:<label_width$}  {} {:>8}   ({:.2})\n",
            row.label,
            cells,
            row.observed,
            row.expected,
            label_width = label_width
        ));
    }
    out
}
