//! Printable duty estimate.
//!
//! [`layout_quote`] decides what goes on which page; [`render_pdf`] only draws it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::UserDirs;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;
use time::{macros::format_description, OffsetDateTime};

use crate::domain::{
    freight_rate, CalculationResult, VolumeResult, BANK_CHARGE_PERCENT, INSURANCE_CHARGE_PERCENT,
};
use crate::util::format::{format_cbm, format_money, format_npr, format_percent};
use crate::util::version::{version_label, APP_NAME};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 20.0;
const VALUE_COLUMN_MM: f32 = 140.0;
const TOP_MARGIN_MM: f32 = 20.0;
const FOOTER_Y_MM: f32 = 12.0;
const BODY_BOTTOM_MM: f32 = 25.0;
const WRAP_COLUMNS: usize = 80;

pub const COMPANY_NAME: &str = "SNLH Logistics";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to build PDF: {0}")]
    Pdf(String),
    #[error("no directory available for exports")]
    NoExportDir,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    Heading,
    Body,
    Total,
    Note,
    Spacer,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::Subtitle => 13.0,
            LineStyle::Heading => 12.0,
            LineStyle::Body | LineStyle::Spacer => 10.0,
            LineStyle::Total => 13.0,
            LineStyle::Note => 8.0,
        }
    }

    fn height_mm(self) -> f32 {
        match self {
            LineStyle::Title => 11.0,
            LineStyle::Subtitle => 8.0,
            LineStyle::Heading => 9.0,
            LineStyle::Body => 6.0,
            LineStyle::Total => 9.0,
            LineStyle::Note => 5.0,
            LineStyle::Spacer => 4.0,
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Heading | LineStyle::Total)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
    /// Right-hand column, used for amounts.
    pub value: Option<String>,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            value: None,
        }
    }

    fn row(style: LineStyle, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            style,
            text: label.into(),
            value: Some(value.into()),
        }
    }

    fn spacer() -> Self {
        Self::new(LineStyle::Spacer, "")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
    pub footer: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteDocument {
    pub title: String,
    pub pages: Vec<ReportPage>,
}

impl QuoteDocument {
    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Lays out the estimate: title block, product detail, optional warehouse and volume,
/// itemized charges, bold grand total and a timestamp footer on every page.
pub fn layout_quote(
    result: &CalculationResult,
    volume: Option<&VolumeResult>,
    generated_at: OffsetDateTime,
) -> QuoteDocument {
    let mut lines = vec![
        ReportLine::new(LineStyle::Title, COMPANY_NAME),
        ReportLine::new(LineStyle::Subtitle, "Duty & Logistics Cost Estimate"),
        ReportLine::spacer(),
        ReportLine::new(LineStyle::Heading, "Product Details"),
        ReportLine::row(LineStyle::Body, "HS Code", result.tariff_code.clone()),
    ];
    for (idx, chunk) in wrap(&result.product_description, WRAP_COLUMNS)
        .into_iter()
        .enumerate()
    {
        let label = if idx == 0 {
            format!("Description: {chunk}")
        } else {
            chunk
        };
        lines.push(ReportLine::new(LineStyle::Body, label));
    }
    lines.push(ReportLine::row(
        LineStyle::Body,
        "Duty Rate",
        format_percent(result.duty_rate_percent),
    ));

    if let Some(warehouse) = result.warehouse {
        lines.push(ReportLine::spacer());
        lines.push(ReportLine::new(LineStyle::Heading, "Warehouse"));
        lines.push(ReportLine::new(LineStyle::Body, warehouse.name));
        lines.push(ReportLine::new(LineStyle::Body, warehouse.address));
        lines.push(ReportLine::new(LineStyle::Body, warehouse.city));
        lines.push(ReportLine::new(
            LineStyle::Body,
            format!("Contact: {}, {}", warehouse.contact, warehouse.phone),
        ));
    }

    if let Some(volume) = volume {
        let dims = volume.input;
        lines.push(ReportLine::spacer());
        lines.push(ReportLine::new(LineStyle::Heading, "Shipment Volume"));
        lines.push(ReportLine::row(
            LineStyle::Body,
            "Dimensions (L x W x H)",
            format!("{} x {} x {} cm", dims.length_cm, dims.width_cm, dims.height_cm),
        ));
        lines.push(ReportLine::row(
            LineStyle::Body,
            "Volume",
            format_cbm(volume.cubic_meters),
        ));
    }

    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(LineStyle::Heading, "Charges"));
    lines.push(ReportLine::row(
        LineStyle::Body,
        format!(
            "Declared Value (1 {} = NPR {:.2})",
            result.currency.code(),
            result.exchange_rate
        ),
        format!("{} {}", result.currency.code(), format_money(result.amount)),
    ));
    lines.push(ReportLine::row(
        LineStyle::Body,
        "Amount in NPR",
        format_npr(result.amount_in_base_currency),
    ));
    lines.push(ReportLine::row(
        LineStyle::Body,
        format!("Customs Duty ({})", format_percent(result.duty_rate_percent)),
        format_npr(result.duty_amount),
    ));
    lines.push(ReportLine::row(
        LineStyle::Body,
        freight_label(result.weight_kg),
        format_npr(result.freight_charge),
    ));
    lines.push(ReportLine::row(
        LineStyle::Body,
        format!("Bank Charge ({})", format_percent(BANK_CHARGE_PERCENT)),
        format_npr(result.bank_charge),
    ));
    lines.push(ReportLine::row(
        LineStyle::Body,
        format!("Insurance ({})", format_percent(INSURANCE_CHARGE_PERCENT)),
        format_npr(result.insurance_charge),
    ));
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::row(
        LineStyle::Total,
        "Grand Total",
        format_npr(result.grand_total),
    ));
    lines.push(ReportLine::spacer());
    lines.push(ReportLine::new(
        LineStyle::Note,
        "* Exchange rates are approximate and may vary. Please verify with current rates.",
    ));

    let stamp = generated_at
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        ))
        .unwrap_or_default();

    let chunks = paginate(lines);
    let total = chunks.len();
    let pages = chunks
        .into_iter()
        .enumerate()
        .map(|(idx, lines)| ReportPage {
            lines,
            footer: format!(
                "Generated {stamp} | {APP_NAME} {} | Page {} of {total}",
                version_label(),
                idx + 1
            ),
        })
        .collect();

    QuoteDocument {
        title: format!("{COMPANY_NAME} Duty Estimate {}", result.tariff_code),
        pages,
    }
}

fn freight_label(weight_kg: Option<f64>) -> String {
    match weight_kg {
        Some(weight) if weight.is_finite() && weight > 0.0 => format!(
            "Freight ({weight} kg @ NPR {}/kg)",
            freight_rate(weight)
        ),
        _ => "Freight (no weight given)".to_string(),
    }
}

fn paginate(lines: Vec<ReportLine>) -> Vec<Vec<ReportLine>> {
    let budget = PAGE_HEIGHT_MM - TOP_MARGIN_MM - BODY_BOTTOM_MM;
    let mut pages = vec![Vec::new()];
    let mut used = 0.0_f32;

    for line in lines {
        let height = line.style.height_mm();
        if used + height > budget && pages.last().is_some_and(|page| !page.is_empty()) {
            pages.push(Vec::new());
            used = 0.0;
        }
        if line.style == LineStyle::Spacer && used == 0.0 {
            continue;
        }
        used += height;
        if let Some(page) = pages.last_mut() {
            page.push(line);
        }
    }

    pages
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Draws the document with the PDF base fonts.
pub fn render_pdf(document: &QuoteDocument) -> Result<Vec<u8>, ReportError> {
    let (pdf, first_page, first_layer) = PdfDocument::new(
        document.title.clone(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Page 1",
    );
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ReportError::Pdf(err.to_string()))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ReportError::Pdf(err.to_string()))?;

    for (idx, page) in document.pages.iter().enumerate() {
        let layer = if idx == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = pdf.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", idx + 1),
            );
            pdf.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    pdf.save_to_bytes()
        .map_err(|err| ReportError::Pdf(err.to_string()))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &ReportPage,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let mut y = PAGE_HEIGHT_MM - TOP_MARGIN_MM;
    for line in &page.lines {
        y -= line.style.height_mm();
        if line.style == LineStyle::Spacer {
            continue;
        }
        let font = if line.style.is_bold() { bold } else { regular };
        let size = line.style.font_size();
        layer.use_text(line.text.clone(), size, Mm(LEFT_MARGIN_MM), Mm(y), font);
        if let Some(value) = &line.value {
            layer.use_text(value.clone(), size, Mm(VALUE_COLUMN_MM), Mm(y), font);
        }
    }
    layer.use_text(
        page.footer.clone(),
        LineStyle::Note.font_size(),
        Mm(LEFT_MARGIN_MM),
        Mm(FOOTER_Y_MM),
        regular,
    );
}

/// Renders the estimate and writes it to the user's download directory.
pub fn export_quote(
    result: &CalculationResult,
    volume: Option<&VolumeResult>,
) -> Result<PathBuf, ReportError> {
    let now = OffsetDateTime::now_utc();
    let document = layout_quote(result, volume, now);
    let bytes = render_pdf(&document)?;

    let dir = export_dir().ok_or(ReportError::NoExportDir)?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(export_file_name(&result.tariff_code, now));
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), pages = document.pages.len(), "exported duty estimate");
    Ok(path)
}

/// `duty-estimate-<code>-<unix seconds>.pdf`, with anything outside `[A-Za-z0-9.-]` in the
/// code replaced so a feed code can never escape the export directory.
fn export_file_name(tariff_code: &str, now: OffsetDateTime) -> String {
    let code: String = tariff_code
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("duty-estimate-{code}-{}.pdf", now.unix_timestamp())
}

fn export_dir() -> Option<PathBuf> {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .or_else(crate::util::persistence::data_dir)
}
