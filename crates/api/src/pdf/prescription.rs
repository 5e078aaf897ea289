use super::translit::transliterate;
use chrono::{Duration, NaiveDateTime};
use mediconnect_domain::{Doctor, MedicalRecord, Patient};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::io::BufWriter;
use thiserror::Error;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP: Mm = Mm(280.0);
const BOTTOM: Mm = Mm(20.0);
const MARGIN: Mm = Mm(20.0);
const LINE_HEIGHT: Mm = Mm(5.5);
const WRAP_WIDTH: usize = 80;

const PLACEHOLDER_NOT_PROVIDED: &str = "Not provided";
const PLACEHOLDER_NOT_SPECIFIED: &str = "Not specified";
const PLACEHOLDER_NO_INFORMATION: &str = "No information available";

/// How many days a prescription stays valid after it was written.
const VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Could not prepare document fonts: {0}")]
    Font(String),
    #[error("Could not write document: {0}")]
    Write(String),
}

struct DocumentWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: Mm,
}

impl DocumentWriter {
    fn new(title: &str) -> Result<Self, DocumentError> {
        let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocumentError::Font(e.to_string()))?;
        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: TOP,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
    }

    fn line(&mut self, text: &str, size: f64, bold: bool) {
        if self.y < BOTTOM {
            self.new_page();
        }
        let font = if bold { &self.bold } else { &self.font };
        self.layer
            .use_text(transliterate(text), size as f32, MARGIN, self.y, font);
        self.y -= LINE_HEIGHT;
    }

    fn heading(&mut self, text: &str) {
        self.line(text, 11.0, true);
    }

    fn text(&mut self, text: &str) {
        self.line(text, 10.0, false);
    }

    fn multiline(&mut self, text: &str) {
        for line in wrap_text(text, WRAP_WIDTH) {
            self.text(&line);
        }
    }

    fn gap(&mut self, mm: f64) {
        self.y -= Mm(mm as f32);
    }

    fn save(self) -> Result<Vec<u8>, DocumentError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| DocumentError::Write(e.to_string()))?;
        buf.into_inner()
            .map_err(|e| DocumentError::Write(e.to_string()))
    }
}

fn wrap_text(text: &str, max_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_length {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.clone(),
        _ => placeholder.to_string(),
    }
}

/// Renders the prescription document for a medical record. Missing optional
/// fields render placeholder strings and every failure comes back as an
/// error value, so the caller can always produce a clean error response.
pub fn render_prescription(
    record: &MedicalRecord,
    patient: &Patient,
    doctor: &Doctor,
    record_date: NaiveDateTime,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, DocumentError> {
    let mut writer = DocumentWriter::new("Prescription")?;

    writer.line("MEDICONNECT CLINIC", 14.0, true);
    writer.line("Official prescription", 12.0, false);
    writer.gap(8.0);

    writer.heading("RECORD INFORMATION");
    writer.text(&format!("Record: PR-{}", record.id));
    writer.text(&format!(
        "Date of issue: {}",
        record_date.format("%d.%m.%Y %H:%M")
    ));
    writer.text(&format!(
        "Valid until: {}",
        (record_date + Duration::days(VALIDITY_DAYS)).format("%d.%m.%Y")
    ));
    writer.gap(4.0);

    writer.heading("PATIENT INFORMATION");
    writer.text(&format!("Full name: {}", patient.full_name()));
    writer.text(&format!(
        "Date of birth: {}",
        patient
            .date_of_birth
            .map(|d| d.format("%d.%m.%Y").to_string())
            .unwrap_or_else(|| PLACEHOLDER_NOT_PROVIDED.to_string())
    ));
    writer.text(&format!(
        "Phone: {}",
        or_placeholder(&patient.phone, PLACEHOLDER_NOT_PROVIDED)
    ));
    writer.text(&format!(
        "Blood type: {}",
        or_placeholder(&patient.blood_type, PLACEHOLDER_NOT_SPECIFIED)
    ));
    writer.gap(4.0);

    writer.heading("DOCTOR INFORMATION");
    writer.text(&format!("Name: Dr. {}", doctor.full_name()));
    writer.text(&format!("Specialization: {}", doctor.specialization));
    writer.text(&format!(
        "License: {}",
        or_placeholder(&doctor.license_number, PLACEHOLDER_NOT_PROVIDED)
    ));
    writer.gap(4.0);

    if let Some(diagnosis) = &record.diagnosis {
        if !diagnosis.trim().is_empty() {
            writer.heading("DIAGNOSIS");
            writer.multiline(diagnosis);
            writer.gap(2.0);
        }
    }

    writer.heading("PRESCRIPTIONS");
    writer.multiline(&or_placeholder(
        &record.prescriptions,
        PLACEHOLDER_NO_INFORMATION,
    ));
    writer.gap(2.0);

    if let Some(notes) = &record.notes {
        if !notes.trim().is_empty() {
            writer.heading("MEDICAL NOTES");
            writer.multiline(notes);
            writer.gap(2.0);
        }
    }

    writer.gap(6.0);
    writer.text("_________________________");
    writer.line("Doctor's signature", 8.0, false);
    writer.gap(4.0);
    writer.line(
        &format!("Document created: {}", generated_at.format("%d.%m.%Y %H:%M")),
        8.0,
        false,
    );

    writer.save()
}
