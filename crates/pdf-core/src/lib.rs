//! PDF Core - Low-level PDF construction
//!
//! This crate provides functionality for:
//! - Building PDF documents from scratch, page by page
//! - Embedding TrueType fonts (Type0/Identity-H with ToUnicode)
//! - Placing text with alignment and font-metric word wrapping
//! - Inserting images (JPEG, PNG) and filled vector discs
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontData, FontFamily, PdfDocument, A4_HEIGHT, A4_WIDTH};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(A4_WIDTH, A4_HEIGHT);
//! let regular = FontData::from_bytes("body-regular", font_bytes)?;
//! doc.register_font_family("body", FontFamily::new(regular))?;
//! doc.set_font("body", 12.0)?;
//! doc.insert_text("Hello, World!", page, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod text;

pub use document::{Color, PdfDocument, A4_HEIGHT, A4_WIDTH};
pub use font::{FontData, FontFamily, FontStyle};
pub use graphics::generate_disc_operators;
pub use image::ImageScaleMode;
pub use text::{generate_text_operators, wrap_to_width, TextMeasure, TextRenderContext, TextStyle};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
