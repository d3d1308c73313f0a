use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use std::path::{Path, PathBuf};

use super::{MonthlyReport, ReportRow};
use crate::ui::util::format_money;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_X: f32 = 14.0;
const TABLE_RIGHT: f32 = PAGE_W - MARGIN_X;
const TABLE_TOP: f32 = 65.0;
const CONTINUED_TOP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 20.0;
const ROW_H: f32 = 8.0;
const BODY_SIZE: f32 = 10.0;

/// Builtin fonts only cover Latin-1, so the rupee sign is spelled out.
const PDF_CURRENCY: &str = "Rs. ";

/// Column titles and their left edge, in mm from the page's left side.
const COLUMNS: [(&str, f32); 6] = [
    ("#", 14.0),
    ("Date", 24.0),
    ("Category", 50.0),
    ("Description", 82.0),
    ("Type", 142.0),
    ("Amount", 164.0),
];
const DESCRIPTION_CHARS: usize = 32;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn text_black() -> Color {
    rgb(0, 0, 0)
}

fn row_text() -> Color {
    rgb(30, 30, 30)
}

fn income_green() -> Color {
    rgb(0, 128, 0)
}

fn expense_red() -> Color {
    rgb(255, 0, 0)
}

fn header_fill() -> Color {
    rgb(41, 128, 185)
}

fn stripe_fill() -> Color {
    rgb(245, 245, 245)
}

fn highlight_fill() -> Color {
    rgb(255, 204, 204)
}

/// Convert a distance from the top edge into printpdf's bottom-left origin.
fn from_top(y: f32) -> Mm {
    Mm(PAGE_H - y)
}

/// Rough Helvetica width: half an em per glyph.
fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.3528 * 0.5
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Render the report as an A4 PDF document and return its bytes.
pub(crate) fn render_pdf(report: &MonthlyReport) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Expense Report {}", report.month),
        Mm(PAGE_W),
        Mm(PAGE_H),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Failed to load Helvetica")?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Failed to load Helvetica Bold")?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    draw_heading(&layer, &fonts, report);

    let mut y = TABLE_TOP;
    draw_header_row(&layer, &fonts, y);
    y += ROW_H;

    if report.rows.is_empty() {
        layer.set_fill_color(row_text());
        layer.use_text(
            "No transactions for this month.",
            BODY_SIZE,
            Mm(MARGIN_X),
            from_top(y + ROW_H - 2.5),
            &fonts.regular,
        );
    }

    for row in &report.rows {
        if y + ROW_H > PAGE_H - BOTTOM_MARGIN {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = CONTINUED_TOP;
            draw_header_row(&layer, &fonts, y);
            y += ROW_H;
        }
        draw_row(&layer, &fonts, row, y);
        y += ROW_H;
    }

    doc.save_to_bytes().context("Failed to serialize PDF")
}

fn draw_heading(layer: &PdfLayerReference, fonts: &Fonts, report: &MonthlyReport) {
    let title = "Monthly Expense Tracker";
    let title_size = 18.0;
    layer.set_fill_color(rgb(40, 40, 40));
    layer.use_text(
        title,
        title_size,
        Mm((PAGE_W - approx_text_width(title, title_size)) / 2.0),
        from_top(20.0),
        &fonts.bold,
    );

    let summary = &report.summary;
    let lines = [
        (format!("Month: {}", report.month), text_black(), 30.0),
        (
            format!(
                "Total Income:  {}",
                format_money(summary.total_income, PDF_CURRENCY)
            ),
            income_green(),
            40.0,
        ),
        (
            format!(
                "Total Expense:  {}",
                format_money(summary.total_expense, PDF_CURRENCY)
            ),
            expense_red(),
            48.0,
        ),
        (
            format!("Balance:  {}", format_money(summary.balance(), PDF_CURRENCY)),
            text_black(),
            56.0,
        ),
    ];
    for (text, color, y) in lines {
        layer.set_fill_color(color);
        layer.use_text(text, 12.0, Mm(MARGIN_X), from_top(y), &fonts.regular);
    }
}

fn fill_row(layer: &PdfLayerReference, y: f32, color: Color) {
    layer.set_fill_color(color);
    layer.add_rect(Rect::new(
        Mm(MARGIN_X),
        from_top(y + ROW_H),
        Mm(TABLE_RIGHT),
        from_top(y),
    ));
}

fn draw_header_row(layer: &PdfLayerReference, fonts: &Fonts, y: f32) {
    fill_row(layer, y, header_fill());
    layer.set_fill_color(rgb(255, 255, 255));
    for (title, x) in COLUMNS {
        layer.use_text(
            title,
            BODY_SIZE,
            Mm(x + 1.0),
            from_top(y + ROW_H - 2.5),
            &fonts.bold,
        );
    }
}

fn draw_row(layer: &PdfLayerReference, fonts: &Fonts, row: &ReportRow, y: f32) {
    if row.highlighted {
        fill_row(layer, y, highlight_fill());
    } else if row.number % 2 == 0 {
        fill_row(layer, y, stripe_fill());
    }

    let cells = [
        row.number.to_string(),
        row.date.clone(),
        row.category.to_string(),
        clip(&row.description, DESCRIPTION_CHARS),
        row.kind.to_string(),
        format_money(row.amount, PDF_CURRENCY),
    ];
    layer.set_fill_color(row_text());
    for ((_, x), text) in COLUMNS.iter().zip(cells) {
        layer.use_text(
            text,
            BODY_SIZE,
            Mm(x + 1.0),
            from_top(y + ROW_H - 2.5),
            &fonts.regular,
        );
    }
}

/// Write `Expense_Report_<month>.pdf` into `dir`, creating it if needed.
pub(crate) fn export_pdf(report: &MonthlyReport, dir: &Path) -> Result<PathBuf> {
    let bytes = render_pdf(report)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(report.file_name("pdf"));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = report.rows.len(), "exported PDF report");
    Ok(path)
}
