use crate::model::ScoredPrediction;
use crate::render::escape;

pub const BAR_COLOR: &str = "#4FC3F7";
pub const BAR_TITLE: &str = "Top Breed Predictions Confidence";
pub const BAR_AXIS_LABEL: &str = "Confidence (%)";

/// Pie slices start here, counter-clockwise from the positive x axis.
pub const PIE_START_DEGREES: f64 = 140.0;

const TAB20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    /// Fraction of the whole pie, in [0, 1].
    pub share: f64,
    pub start_degrees: f64,
    pub end_degrees: f64,
    pub color: &'static str,
}

impl PieSlice {
    fn mid_radians(&self) -> f64 {
        ((self.start_degrees + self.end_degrees) / 2.0).to_radians()
    }
}

/// Bars in prediction order; the first one is drawn on top.
pub fn bars(predictions: &[ScoredPrediction]) -> Vec<Bar> {
    predictions
        .iter()
        .map(|p| Bar {
            label: p.breed.name.clone(),
            percent: p.percent(),
        })
        .collect()
}

pub fn pie_slices(predictions: &[ScoredPrediction]) -> Vec<PieSlice> {
    let total: f64 = predictions.iter().map(|p| p.confidence).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = PIE_START_DEGREES;
    predictions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let share = p.confidence / total;
            let start = angle;
            angle += share * 360.0;
            PieSlice {
                label: p.breed.name.clone(),
                share,
                start_degrees: start,
                end_degrees: angle,
                color: TAB20[i % TAB20.len()],
            }
        })
        .collect()
}

pub fn bar_svg(bars: &[Bar]) -> String {
    const LABEL_WIDTH: f64 = 140.0;
    const PLOT_WIDTH: f64 = 320.0;
    const ROW_HEIGHT: f64 = 36.0;
    const TOP: f64 = 36.0;

    let height = TOP + ROW_HEIGHT * bars.len() as f64 + 40.0;
    let width = LABEL_WIDTH + PLOT_WIDTH + 20.0;
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart bar-chart" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
    ));
    svg.push_str(&format!(
        r#"<text x="{x}" y="20" text-anchor="middle" font-weight="bold">{BAR_TITLE}</text>"#,
        x = width / 2.0
    ));

    for (i, bar) in bars.iter().enumerate() {
        let y = TOP + ROW_HEIGHT * i as f64;
        let w = PLOT_WIDTH * (bar.percent / 100.0).clamp(0.0, 1.0);
        svg.push_str(&format!(
            r#"<text x="{lx}" y="{ty}" text-anchor="end">{label}</text><rect x="{LABEL_WIDTH}" y="{ry}" width="{w:.2}" height="{bh}" fill="{BAR_COLOR}"><title>{percent:.2}%</title></rect>"#,
            lx = LABEL_WIDTH - 8.0,
            ty = y + ROW_HEIGHT / 2.0 + 4.0,
            label = escape(&bar.label),
            ry = y + 6.0,
            bh = ROW_HEIGHT - 12.0,
            percent = bar.percent,
        ));
    }

    let axis_y = TOP + ROW_HEIGHT * bars.len() as f64;
    svg.push_str(&format!(
        r#"<line x1="{LABEL_WIDTH}" y1="{axis_y}" x2="{x2}" y2="{axis_y}" stroke="black"/>"#,
        x2 = LABEL_WIDTH + PLOT_WIDTH
    ));
    for tick in (0..=100).step_by(20) {
        let x = LABEL_WIDTH + PLOT_WIDTH * f64::from(tick) / 100.0;
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="11">{tick}</text>"#,
            y = axis_y + 14.0
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{x}" y="{y}" text-anchor="middle">{BAR_AXIS_LABEL}</text></svg>"#,
        x = LABEL_WIDTH + PLOT_WIDTH / 2.0,
        y = axis_y + 32.0
    ));
    svg
}

pub fn pie_svg(slices: &[PieSlice]) -> String {
    const SIZE: f64 = 360.0;
    const RADIUS: f64 = 120.0;
    let (cx, cy) = (SIZE / 2.0, SIZE / 2.0);
    // SVG's y axis points down.
    let point = |radius: f64, radians: f64| (cx + radius * radians.cos(), cy - radius * radians.sin());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart pie-chart" viewBox="0 0 {SIZE} {SIZE}" width="{SIZE}" height="{SIZE}">"#
    ));

    for slice in slices {
        let sweep = slice.end_degrees - slice.start_degrees;
        if sweep >= 359.999 {
            svg.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{RADIUS}" fill="{}"/>"#,
                slice.color
            ));
        } else {
            let (x0, y0) = point(RADIUS, slice.start_degrees.to_radians());
            let (x1, y1) = point(RADIUS, slice.end_degrees.to_radians());
            let large_arc = u8::from(sweep > 180.0);
            svg.push_str(&format!(
                r#"<path d="M {cx} {cy} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 0 {x1:.2} {y1:.2} Z" fill="{}"/>"#,
                slice.color
            ));
        }

        let mid = slice.mid_radians();
        let (px, py) = point(RADIUS * 0.6, mid);
        let (lx, ly) = point(RADIUS * 1.15, mid);
        let anchor = if mid.cos() < 0.0 { "end" } else { "start" };
        svg.push_str(&format!(
            r#"<text x="{px:.2}" y="{py:.2}" text-anchor="middle" font-size="12">{:.1}%</text><text x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}">{}</text>"#,
            slice.share * 100.0,
            escape(&slice.label),
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BreedEntry;

    fn prediction(name: &str, confidence: f64) -> ScoredPrediction {
        ScoredPrediction {
            breed: BreedEntry::new(name, "", None),
            confidence,
        }
    }

    fn sample() -> Vec<ScoredPrediction> {
        vec![
            prediction("Pug", 0.99),
            prediction("Husky", 0.95),
            prediction("Beagle", 0.91),
        ]
    }

    #[test]
    fn bars_keep_prediction_order_as_percentages() {
        let bars = bars(&sample());
        let labels: Vec<_> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Pug", "Husky", "Beagle"]);
        assert!((bars[0].percent - 99.0).abs() < 1e-9);
    }

    #[test]
    fn pie_shares_cover_the_whole_circle() {
        let slices = pie_slices(&sample());
        let total: f64 = slices.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-9);

        assert_eq!(slices[0].start_degrees, PIE_START_DEGREES);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_degrees, pair[1].start_degrees);
        }
        let last = slices.last().unwrap();
        assert!((last.end_degrees - PIE_START_DEGREES - 360.0).abs() < 1e-9);
    }

    #[test]
    fn pie_uses_distinct_palette_colors() {
        let slices = pie_slices(&sample());
        assert_eq!(slices[0].color, "#1f77b4");
        assert_ne!(slices[0].color, slices[1].color);
    }

    #[test]
    fn empty_pie_has_no_slices() {
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn svgs_carry_labels_and_percentages() {
        let predictions = sample();
        let bar = bar_svg(&bars(&predictions));
        assert!(bar.contains(BAR_TITLE));
        assert!(bar.contains(BAR_AXIS_LABEL));
        assert_eq!(bar.matches("<rect").count(), 3);

        let pie = pie_svg(&pie_slices(&predictions));
        assert_eq!(pie.matches("<path").count(), 3);
        assert!(pie.contains("33.3%"));
        assert!(pie.contains(">Husky<"));
    }

    #[test]
    fn single_slice_pie_is_a_circle() {
        let pie = pie_svg(&pie_slices(&[prediction("Pug", 0.9)]));
        assert!(pie.contains("<circle"));
        assert!(pie.contains("100.0%"));
    }
}
