//! Font handling for PDF documents

use crate::{PdfError, Result};
use ab_glyph::{Font as _, FontVec};
use lopdf::{Dictionary, Object, Stream};
use std::collections::HashSet;
use std::fmt;

/// Font style tag
///
/// Catalog text only distinguishes the upright regular and bold cuts;
/// weights such as "light" are registered as their own families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
}

/// Font data for an embedded TrueType program
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data, embedded whole at save time
    pub ttf_data: Vec<u8>,
    /// Characters placed with this font (drives /W and ToUnicode)
    pub used_chars: HashSet<char>,
    /// Parsed font program (owns its bytes)
    font: Option<FontVec>,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("name", &self.name)
            .field("bytes", &self.ttf_data.len())
            .field("used_chars", &self.used_chars.len())
            .finish()
    }
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

/// Font family holding the regular cut and an optional bold cut
#[derive(Debug)]
pub struct FontFamily {
    /// Regular variant (required)
    pub regular: FontData,
    /// Bold variant
    pub bold: Option<FontData>,
}

impl FontFamily {
    /// Create a family from its regular variant
    pub fn new(regular: FontData) -> Self {
        Self {
            regular,
            bold: None,
        }
    }

    /// Attach a bold variant
    pub fn with_bold(mut self, bold: FontData) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Get the font data for the requested style, falling back to regular
    pub fn variant(&self, style: FontStyle) -> &FontData {
        match style {
            FontStyle::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontStyle::Normal => &self.regular,
        }
    }

    /// Mutable access to the font data for the requested style
    pub fn variant_mut(&mut self, style: FontStyle) -> &mut FontData {
        match style {
            FontStyle::Bold => self.bold.as_mut().unwrap_or(&mut self.regular),
            FontStyle::Normal => &mut self.regular,
        }
    }

    /// Internal font name for the variant (for PDF resource naming)
    pub fn variant_name(family_name: &str, style: FontStyle) -> String {
        match style {
            FontStyle::Bold => format!("{family_name}-bold"),
            FontStyle::Normal => family_name.to_string(),
        }
    }

    /// Iterate the variants that were actually used in the document
    pub(crate) fn used_variants(&self) -> impl Iterator<Item = &FontData> {
        [Some(&self.regular), self.bold.as_ref()]
            .into_iter()
            .flatten()
            .filter(|font| !font.used_chars.is_empty())
    }
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_bytes(name: &str, ttf_data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(ttf_data.clone())
            .map_err(|e| PdfError::FontParseError(format!("{}: {e}", name)))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data,
            used_chars: HashSet::new(),
            font: Some(font),
        })
    }

    /// Record characters as used (for /W widths and ToUnicode)
    pub fn add_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.used_chars.insert(c);
        }
    }

    /// Get glyph ID for a character (0 is .notdef)
    pub fn glyph_id(&self, c: char) -> u16 {
        self.font.as_ref().map(|f| f.glyph_id(c).0).unwrap_or(0)
    }

    /// Check if the font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c) != 0
    }

    /// Glyph advance width in font units
    pub fn glyph_advance(&self, c: char) -> f32 {
        self.font
            .as_ref()
            .map(|f| f.h_advance_unscaled(f.glyph_id(c)))
            .unwrap_or(0.0)
    }

    /// Font units per em
    pub fn units_per_em(&self) -> f32 {
        self.font
            .as_ref()
            .and_then(|f| f.units_per_em())
            .unwrap_or(1000.0)
    }

    /// Font ascender in font units
    pub fn ascender(&self) -> f32 {
        self.font.as_ref().map(|f| f.ascent_unscaled()).unwrap_or(800.0)
    }

    /// Font descender in font units
    pub fn descender(&self) -> f32 {
        self.font
            .as_ref()
            .map(|f| f.descent_unscaled())
            .unwrap_or(-200.0)
    }

    /// Text width in font units
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.glyph_advance(c)).sum()
    }

    /// Text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        self.text_width(text) / self.units_per_em() * font_size
    }

    /// Encode text as a hex string for the PDF Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::new();
        for c in text.chars() {
            result.push_str(&format!("{:04X}", self.glyph_id(c)));
        }
        format!("<{result}>")
    }

    /// Scale a font-unit value into the 1000-unit glyph space PDF expects
    fn to_glyph_space(&self, value: f32) -> i64 {
        (value / self.units_per_em() * 1000.0).round() as i64
    }

    /// Generate the /W array for the used glyphs
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut gids: Vec<u16> = self.used_chars.iter().map(|&c| self.glyph_id(c)).collect();
        gids.sort_unstable();
        gids.dedup();

        let mut widths = Vec::new();
        for gid in gids {
            let advance = self
                .font
                .as_ref()
                .map(|f| f.h_advance_unscaled(ab_glyph::GlyphId(gid)))
                .unwrap_or(1000.0);
            widths.push(Object::Integer(gid as i64));
            widths.push(Object::Array(vec![Object::Integer(
                self.to_glyph_space(advance),
            )]));
        }

        widths
    }

    /// Generate the ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mut char_list: Vec<char> = self.used_chars.iter().copied().collect();
        char_list.sort_by_key(|c| *c as u32);

        // PDF spec recommends limiting bfchar sections to 100 entries
        for chunk in char_list.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for c in chunk {
                cmap.push_str(&format!("<{:04X}> <{:04X}>\n", self.glyph_id(*c), *c as u32));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }

    /// Generate all PDF objects needed to embed this font
    ///
    /// Reference placeholders (FontFile2, FontDescriptor, DescendantFonts,
    /// ToUnicode) are patched with real object ids by the document when the
    /// objects are added.
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Type", "CMap".into()),
                ("Length", (tounicode_content.len() as i32).into()),
            ]),
            tounicode_content.into_bytes(),
        );

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Length1", (self.ttf_data.len() as i32).into()),
            ]),
            self.ttf_data.clone(),
        );

        let ascent = self.to_glyph_space(self.ascender());
        let descent = self.to_glyph_space(self.descender());
        let font_bbox = vec![
            Object::Integer(0),
            Object::Integer(descent),
            Object::Integer(1000),
            Object::Integer(ascent),
        ];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascent.into()),
            ("Descent", descent.into()),
            ("CapHeight", ascent.into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()),
            ("ToUnicode", Object::Reference((0, 0))),
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }
}
