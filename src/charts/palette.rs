//! Colours shared by the chart renderers.

use plotters::style::RGBColor;

/// Line colours, cycled when there are more series than entries.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const MISSING_CELL: RGBColor = RGBColor(200, 200, 200);

// Cool-warm diverging scale anchors
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Colour for the `index`-th series.
pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Map a coefficient in [-1, 1] onto the cool-warm scale. NaN is grey.
pub fn coolwarm(value: f64) -> RGBColor {
    if value.is_nan() {
        return MISSING_CELL;
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COOL, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Whether annotations on a cell of this value need light text.
pub fn needs_light_text(value: f64) -> bool {
    value.abs() > 0.6
}
