//! PDF document builder
//!
//! Documents are assembled page by page from a blank object tree. Content
//! operators are buffered per page and written as one stream per page at
//! save time, after fonts have been embedded with their complete
//! used-character sets.

use crate::graphics::generate_disc_operators;
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, FontFamily, FontStyle, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.89;

/// RGB color (components 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a color from components in 0.0 - 1.0
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit components
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a "#RRGGBB" or "RRGGBB" hex color
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PdfError::InvalidColor(hex.to_string()));
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| {
            PdfError::InvalidColor(hex.to_string())
        })?;
        Ok(Self::from_rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// High-level PDF document assembled from scratch
///
/// The public coordinate system has its origin at the top-left of each page
/// (y grows downward); conversion to PDF bottom-origin coordinates happens
/// at operator generation using the page size recorded when the page was
/// added.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Page objects in order
    page_ids: Vec<ObjectId>,
    /// (width, height) in points per page, same order as page_ids
    page_sizes: Vec<(f64, f64)>,
    /// Registered font families
    font_families: HashMap<String, FontFamily>,
    /// Current font family name
    current_family: Option<String>,
    /// Current font style
    current_style: FontStyle,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Embedded fonts (variant name -> Type0 font object)
    embedded_fonts: HashMap<String, ObjectId>,
    /// Font resources per page (page number -> variant name -> resource name)
    page_font_resources: HashMap<usize, HashMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images by content hash (-> object id, pixel width, height)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Image resources per page (page number -> resource name -> object id)
    page_image_resources: HashMap<usize, HashMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with a catalog and an empty page tree
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.add_object(Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", 0.into()),
            ("Kids", Object::Array(vec![])),
        ])));

        let catalog_id = inner.add_object(Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ])));
        inner.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            page_sizes: Vec::new(),
            font_families: HashMap::new(),
            current_family: None,
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            page_content_buffer: HashMap::new(),
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append a page of the given size
    ///
    /// Returns the new page number (1-indexed).
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        let mut page_dict = Dictionary::new();
        page_dict.set(b"Type", Object::Name(b"Page".to_vec()));
        page_dict.set(b"Parent", Object::Reference(self.pages_id));
        page_dict.set(
            b"MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width as f32),
                Object::Real(height as f32),
            ]),
        );

        let page_id = self.inner.add_object(Object::Dictionary(page_dict));
        self.page_ids.push(page_id);
        self.page_sizes.push((width, height));

        // Keep the page tree's Kids/Count in sync
        let pages_obj = self.inner.get_object(self.pages_id)?;
        let mut pages_dict = pages_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Pages object is not a dictionary".to_string()))?
            .clone();
        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        pages_dict.set(b"Kids", Object::Array(kids));
        pages_dict.set(b"Count", Object::Integer(self.page_ids.len() as i64));
        self.inner.objects.insert(self.pages_id, pages_dict.into());

        Ok(self.page_ids.len())
    }

    /// Register a font family under a name
    pub fn register_font_family(&mut self, name: &str, family: FontFamily) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        self.font_families.insert(name.to_string(), family);
        Ok(())
    }

    /// Select the current font family and size
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;
        Ok(())
    }

    /// Change only the font size
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("no font family set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Change the font style (falls back to regular if the cut is missing)
    pub fn set_font_style(&mut self, style: FontStyle) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("no font family set".to_string()));
        }

        self.current_style = style;
        Ok(())
    }

    /// Set the text fill color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Width in points of `text` in the current font state
    pub fn text_width(&self, text: &str) -> Result<f64> {
        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("no font family set".to_string()))?;
        let family = self
            .font_families
            .get(family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;

        let font = family.variant(self.current_style);
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Place a text run on a page
    ///
    /// `y` is measured from the top of the page to the text baseline.
    /// Empty text is a no-op.
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        if text.is_empty() {
            return Ok(());
        }

        let family_name = self
            .current_family
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("no font family set".to_string()))?;

        // Track usage and encode in one borrow of the variant
        let (variant_name, text_width, text_hex) = {
            let family = self
                .font_families
                .get_mut(&family_name)
                .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;
            let font = family.variant_mut(self.current_style);
            font.add_chars(text);
            (
                font.name.clone(),
                font.text_width_points(text, self.current_font_size) as f64,
                font.encode_text_hex(text),
            )
        };

        let font_resource_name = self.font_resource_name(&variant_name, page);

        let (_, page_height) = self.page_sizes[page - 1];
        let pdf_y = page_height - y;

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&text_hex, x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Place an image stretched to the given box
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Place an image with a scaling mode
    ///
    /// `y` is measured from the top of the page to the top of the image.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (resource_name, orig_width, orig_height) = self.image_resource(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        let (_, page_height) = self.page_sizes[page - 1];
        let pdf_y = page_height - y - actual_height;

        let operators =
            generate_image_operators(&resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a filled disc centered at (cx, cy)
    ///
    /// `cy` is measured from the top of the page.
    pub fn fill_disc(
        &mut self,
        page: usize,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (_, page_height) = self.page_sizes[page - 1];
        let pdf_y = page_height - cy;

        let operators = generate_disc_operators(cx, pdf_y, radius, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Embed fonts, flush content streams and write page resources
    ///
    /// Runs once per save; fonts are embedded only now so the /W widths and
    /// ToUnicode tables cover every character the document used.
    fn finalize(&mut self) -> Result<()> {
        self.embed_fonts()?;
        self.flush_content_buffers();
        self.write_page_resources()?;
        Ok(())
    }

    /// Embed every font variant that placed at least one character
    fn embed_fonts(&mut self) -> Result<()> {
        self.embedded_fonts.clear();

        let mut objects = Vec::new();
        for family in self.font_families.values() {
            for font in family.used_variants() {
                objects.push((font.name.clone(), font.to_pdf_objects()?));
            }
        }

        for (name, font_objects) in objects {
            let font_file_id = self.inner.add_object(font_objects.font_file_stream);

            let mut font_descriptor = font_objects.font_descriptor;
            font_descriptor.set("FontFile2", Object::Reference(font_file_id));
            let font_descriptor_id = self.inner.add_object(font_descriptor);

            let mut cid_font = font_objects.cid_font;
            cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
            let cid_font_id = self.inner.add_object(cid_font);

            let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

            let mut type0_font = font_objects.type0_font;
            type0_font.set(
                "DescendantFonts",
                Object::Array(vec![Object::Reference(cid_font_id)]),
            );
            type0_font.set("ToUnicode", Object::Reference(tounicode_id));
            let type0_font_id = self.inner.add_object(type0_font);

            self.embedded_fonts.insert(name, type0_font_id);
        }

        Ok(())
    }

    /// Write each page's buffered operators as its content stream
    fn flush_content_buffers(&mut self) {
        let mut buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();
        buffers.sort_by_key(|(page, _)| *page);

        for (page, content) in buffers {
            let stream_id = self
                .inner
                .add_object(Object::Stream(Stream::new(Dictionary::new(), content)));

            let page_id = self.page_ids[page - 1];
            let new_page_dict = match self.inner.get_object(page_id) {
                Ok(Object::Dictionary(page_dict)) => {
                    let mut dict = page_dict.clone();
                    dict.set(b"Contents", Object::Reference(stream_id));
                    Some(dict)
                }
                _ => None,
            };
            if let Some(dict) = new_page_dict {
                self.inner.objects.insert(page_id, dict.into());
            }
        }
    }

    /// Populate each page's Resources dictionary with its fonts and images
    fn write_page_resources(&mut self) -> Result<()> {
        for (index, page_id) in self.page_ids.iter().enumerate() {
            let page = index + 1;

            let mut resources = Dictionary::new();

            if let Some(fonts) = self.page_font_resources.get(&page) {
                let mut font_dict = Dictionary::new();
                for (variant_name, resource_name) in fonts {
                    let font_ref = self
                        .embedded_fonts
                        .get(variant_name)
                        .ok_or_else(|| PdfError::FontNotFound(variant_name.clone()))?;
                    font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
                }
                resources.set(b"Font", Object::Dictionary(font_dict));
            }

            if let Some(images) = self.page_image_resources.get(&page) {
                let mut xobject_dict = Dictionary::new();
                for (resource_name, object_id) in images {
                    xobject_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
                }
                resources.set(b"XObject", Object::Dictionary(xobject_dict));
            }

            let page_obj = self.inner.get_object(*page_id)?;
            let mut page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::SaveError("page object is not a dictionary".to_string()))?
                .clone();
            page_dict.set(b"Resources", Object::Dictionary(resources));
            self.inner.objects.insert(*page_id, page_dict.into());
        }

        Ok(())
    }

    /// Resource name ("F1", "F2", ...) for a font variant on a page
    fn font_resource_name(&mut self, variant_name: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(variant_name) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        page_resources.insert(variant_name.to_string(), resource_name.clone());
        resource_name
    }

    /// Embed an image (deduplicated by content hash) and register it on a page
    ///
    /// Returns the page resource name and the pixel dimensions.
    fn image_resource(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if !self.embedded_images.contains_key(&data_hash) {
            let xobject = ImageXObject::from_bytes(data)?;
            let (width, height) = (xobject.width, xobject.height);
            let object_id = self.inner.add_object(xobject.to_pdf_stream());
            self.embedded_images
                .insert(data_hash, (object_id, width, height));
        }

        let (object_id, width, height) = self.embedded_images[&data_hash];

        let page_resources = self.page_image_resources.entry(page).or_default();
        for (name, id) in page_resources.iter() {
            if *id == object_id {
                return Ok((name.clone(), width, height));
            }
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        page_resources.insert(resource_name.clone(), object_id);

        Ok((resource_name, width, height))
    }

    /// Buffer content operators for a page until save
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Access the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}
