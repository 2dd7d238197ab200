//! Text measurement, word wrapping and operator generation

use crate::document::Color;
use crate::{Align, FontStyle};

/// A font selection for measuring and drawing text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Registered font family name
    pub family: String,
    /// Variant within the family
    pub style: FontStyle,
    /// Font size in points
    pub size: f32,
}

impl TextStyle {
    pub fn new(family: &str, style: FontStyle, size: f32) -> Self {
        Self {
            family: family.to_string(),
            style,
            size,
        }
    }
}

/// Measures text width in points for a given style
///
/// Layout code measures through this trait so it can run against the real
/// embedded fonts or against a fixed-advance stub in tests.
pub trait TextMeasure {
    fn text_width(&self, style: &TextStyle, text: &str) -> f64;
}

/// Context for rendering a single text run
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for a text run
///
/// Emits the BT/Tf/Td/Tj/ET sequence for hex-encoded glyph text at a
/// position given in PDF coordinates (origin bottom-left).
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Wrap text into lines no wider than `max_width` points
///
/// Greedy word wrap measured against real font metrics. A single word wider
/// than the column is kept on its own line rather than split. All layout
/// estimation and all rendering goes through this one function; keeping a
/// second wrap implementation anywhere would let the two drift apart.
pub fn wrap_to_width(
    measure: &dyn TextMeasure,
    style: &TextStyle,
    text: &str,
    max_width: f64,
) -> Vec<String> {
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else {
            let candidate = format!("{current_line} {word}");
            if measure.text_width(style, &candidate) <= max_width {
                current_line = candidate;
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
