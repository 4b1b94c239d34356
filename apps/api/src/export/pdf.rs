//! PDF exporter — direct-layout strategy.
//!
//! Composes the PDF byte stream straight from the normalized resume fields
//! (no HTML intermediate, no browser process): A4 pages, 15mm symmetric
//! margins, header (name bold/large, contact line smaller/muted), sectioned
//! blocks, and a page-number footer on every page.
//!
//! All text is sanitized to the Latin-1 repertoire before layout, so export
//! cannot fail on extended characters. Document metadata dates and id are
//! pinned, making the output byte-for-byte deterministic for identical input.

use printpdf::{
    BuiltinFont, Color, CustomPdfConformance, IndirectFontRef, Mm, PdfConformance, PdfDocument,
    PdfDocumentReference, PdfLayerIndex, PdfLayerReference, PdfPageIndex, Rgb,
};
use time::OffsetDateTime;

use crate::export::layout::{FontMetricTable, HELVETICA, HELVETICA_BOLD, PT_TO_MM};
use crate::export::{to_latin1, ExportError};
use crate::models::resume::ResumePayload;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
/// Body text stops this far above the page edge; the footer lives below it.
const FOOTER_ZONE_MM: f32 = 14.0;

const NAME_SIZE: f32 = 22.0;
const CONTACT_SIZE: f32 = 10.0;
const SECTION_SIZE: f32 = 13.0;
const ENTRY_SIZE: f32 = 11.5;
const BODY_SIZE: f32 = 10.5;
const FOOTER_SIZE: f32 = 9.0;

const BLACK: (f32, f32, f32) = (0.07, 0.09, 0.13);
const MUTED: (f32, f32, f32) = (0.42, 0.45, 0.50);

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * 1.4 * PT_TO_MM
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Tracks the current page, layer, and vertical cursor while sections are
/// laid out top-down. `y_mm` is measured from the page bottom.
struct PageWriter {
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    y_mm: f32,
}

impl PageWriter {
    fn new(doc: &PdfDocumentReference, page: PdfPageIndex, layer: PdfLayerIndex) -> Self {
        Self {
            pages: vec![(page, layer)],
            layer: doc.get_page(page).get_layer(layer),
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    /// Starts a fresh page when fewer than `needed_mm` of body space remain.
    fn ensure_room(&mut self, doc: &PdfDocumentReference, needed_mm: f32) {
        if self.y_mm - needed_mm < MARGIN_MM + FOOTER_ZONE_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.pages.push((page, layer));
            self.layer = doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn set_color(&self, rgb: (f32, f32, f32)) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(rgb.0, rgb.1, rgb.2, None)));
    }

    fn line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        font: &IndirectFontRef,
        size: f32,
    ) {
        self.ensure_room(doc, line_height_mm(size));
        self.y_mm -= line_height_mm(size);
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y_mm), font);
    }

    fn centered_line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        font: &IndirectFontRef,
        metrics: &FontMetricTable,
        size: f32,
    ) {
        self.ensure_room(doc, line_height_mm(size));
        self.y_mm -= line_height_mm(size);
        let width = metrics.measure_mm(text, size);
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.layer.use_text(text, size, Mm(x), Mm(self.y_mm), font);
    }

    /// Word-wraps `text` against the content width and writes each line.
    fn paragraph(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        font: &IndirectFontRef,
        metrics: &FontMetricTable,
        size: f32,
    ) {
        for line in metrics.wrap_mm(text, CONTENT_WIDTH_MM, size) {
            self.line(doc, &line, font, size);
        }
    }

    fn section_header(&mut self, doc: &PdfDocumentReference, title: &str, fonts: &Fonts) {
        // Keep the header attached to at least one body line.
        self.ensure_room(doc, line_height_mm(SECTION_SIZE) + line_height_mm(BODY_SIZE) + 3.0);
        self.spacer(3.0);
        self.line(doc, title, &fonts.bold, SECTION_SIZE);
        self.spacer(1.0);
    }

    fn spacer(&mut self, mm: f32) {
        self.y_mm -= mm;
    }
}

/// Exports the resume as a complete A4 PDF document.
pub fn export_pdf(payload: &ResumePayload) -> Result<Vec<u8>, ExportError> {
    let name = to_latin1(payload.full_name.trim());
    let title = if name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{name} - Resume")
    };

    let (doc, first_page, first_layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    // Pinned metadata — identical payload must produce identical bytes.
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }))
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH)
        .with_document_id("resume-architect-export".to_string());

    let fonts = Fonts {
        regular: add_font(&doc, BuiltinFont::Helvetica)?,
        bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
        oblique: add_font(&doc, BuiltinFont::HelveticaOblique)?,
    };

    let mut writer = PageWriter::new(&doc, first_page, first_layer);

    // Header: name, then contact line.
    writer.set_color(BLACK);
    if !name.is_empty() {
        writer.centered_line(&doc, &name, &fonts.bold, &HELVETICA_BOLD, NAME_SIZE);
    }
    let contact = contact_line(payload);
    if !contact.is_empty() {
        writer.set_color(MUTED);
        writer.centered_line(&doc, &contact, &fonts.regular, &HELVETICA, CONTACT_SIZE);
        writer.set_color(BLACK);
    }
    writer.spacer(4.0);

    let summary = to_latin1(payload.summary.trim());
    if !summary.is_empty() {
        writer.section_header(&doc, "Professional Summary", &fonts);
        writer.paragraph(&doc, &summary, &fonts.regular, &HELVETICA, BODY_SIZE);
    }

    if !payload.skills.is_empty() {
        writer.section_header(&doc, "Skills", &fonts);
        let skills = to_latin1(&payload.skills.join(", "));
        writer.paragraph(&doc, &skills, &fonts.regular, &HELVETICA, BODY_SIZE);
    }

    if !payload.experience.is_empty() {
        writer.section_header(&doc, "Experience", &fonts);
        for exp in &payload.experience {
            let heading = to_latin1(&format!("{} @ {}", exp.role.trim(), exp.company.trim()));
            writer.line(&doc, &heading, &fonts.bold, ENTRY_SIZE);
            let period = to_latin1(exp.period.trim());
            if !period.is_empty() {
                writer.line(&doc, &period, &fonts.oblique, BODY_SIZE);
            }
            let description = to_latin1(exp.description.trim());
            if !description.is_empty() {
                writer.paragraph(&doc, &description, &fonts.regular, &HELVETICA, BODY_SIZE);
            }
            writer.spacer(2.0);
        }
    }

    if !payload.education.is_empty() {
        writer.section_header(&doc, "Education", &fonts);
        for edu in &payload.education {
            let heading = to_latin1(&format!("{} - {}", edu.institution.trim(), edu.course.trim()));
            writer.line(&doc, &heading, &fonts.bold, ENTRY_SIZE);
            let year = to_latin1(edu.year.trim());
            if !year.is_empty() {
                writer.line(&doc, &year, &fonts.regular, BODY_SIZE);
            }
            writer.spacer(2.0);
        }
    }

    // Page-number footer on every page.
    let total = writer.pages.len();
    for (index, (page, layer)) in writer.pages.iter().enumerate() {
        let footer = format!("Page {} of {}", index + 1, total);
        let footer_layer = doc.get_page(*page).get_layer(*layer);
        footer_layer.set_fill_color(Color::Rgb(Rgb::new(MUTED.0, MUTED.1, MUTED.2, None)));
        let width = HELVETICA.measure_mm(&footer, FOOTER_SIZE);
        footer_layer.use_text(
            footer.as_str(),
            FOOTER_SIZE,
            Mm((PAGE_WIDTH_MM - width) / 2.0),
            Mm(8.0),
            &fonts.regular,
        );
    }
    drop(writer);

    doc.save_to_bytes()
        .map_err(|e| ExportError::Engine(format!("PDF serialization failed: {e}")))
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Engine(format!("Failed to register built-in font: {e}")))
}

fn contact_line(payload: &ResumePayload) -> String {
    let parts: Vec<String> = [
        payload.email.trim(),
        payload.phone.trim(),
        payload.location.trim(),
        payload.linkedin.trim(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .map(|part| to_latin1(part))
    .collect();
    parts.join(" | ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
