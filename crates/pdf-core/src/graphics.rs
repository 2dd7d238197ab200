//! Vector drawing operators

use crate::document::Color;

/// Kappa constant for approximating a quarter circle with a cubic Bézier
const CIRCLE_KAPPA: f64 = 0.552_284_749_831;

/// Generate operators for a filled disc
///
/// The circle outline is built from four cubic Bézier segments and filled
/// with the given color. Coordinates are PDF coordinates (origin
/// bottom-left), center at (cx, cy).
pub fn generate_disc_operators(cx: f64, cy: f64, radius: f64, color: Color) -> Vec<u8> {
    let k = CIRCLE_KAPPA * radius;

    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} rg\n", color.r, color.g, color.b));
    // Start at the rightmost point, sweep counter-clockwise
    ops.push_str(&format!("{} {} m\n", cx + radius, cy));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx + radius,
        cy + k,
        cx + k,
        cy + radius,
        cx,
        cy + radius
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx - k,
        cy + radius,
        cx - radius,
        cy + k,
        cx - radius,
        cy
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx - radius,
        cy - k,
        cx - k,
        cy - radius,
        cx,
        cy - radius
    ));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        cx + k,
        cy - radius,
        cx + radius,
        cy - k,
        cx + radius,
        cy
    ));
    ops.push_str("f\n");
    ops.push_str("Q\n");

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_operators_structure() {
        let ops = generate_disc_operators(100.0, 200.0, 10.0, Color::rgb(0.5, 0.25, 0.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("q\n"));
        assert!(ops_str.ends_with("Q\n"));
        assert!(ops_str.contains("0.5 0.25 0 rg"));
        assert!(ops_str.contains("110 200 m"));
        assert_eq!(ops_str.matches(" c\n").count(), 4);
        assert!(ops_str.contains("f\n"));
    }

    #[test]
    fn test_disc_operators_fill_before_restore() {
        let ops = generate_disc_operators(0.0, 0.0, 5.0, Color::black());
        let ops_str = String::from_utf8(ops).unwrap();

        let fill = ops_str.find("f\n").unwrap();
        let restore = ops_str.rfind("Q\n").unwrap();
        assert!(fill < restore);
    }
}
