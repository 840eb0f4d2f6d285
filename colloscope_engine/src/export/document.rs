//! Printable document export.
//!
//! Rendering happens in two stages. [`DocumentLayout::build`] decides what goes
//! on each page (title, header band, rows, holiday banners) without touching
//! any PDF machinery, and [`write_pdf`] draws that layout with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::core::domain::{HolidayMarker, ScheduleEntry};
use crate::core::error::ColloscopeResult;
use crate::time::Locale;

pub const HEADER_BAND: [&str; 6] = ["Id", "Date", "Time", "Professor", "Room", "Subject"];
pub const HOLIDAY_BANNER: &str = "Holidays";

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 36;

const TITLE_HEIGHT: i64 = 32;
const ROW_HEIGHT: i64 = 18;
const BANNER_HEIGHT: i64 = 27;

const TITLE_SIZE: i64 = 14;
const BANNER_SIZE: i64 = 14;
const TEXT_SIZE: i64 = 11;
const DATE_SIZE: i64 = 9;
const CELL_PADDING: i64 = 3;

/// Column widths matching `HEADER_BAND`, summing to the printable width.
const COLUMN_WIDTHS: [i64; 6] = [28, 118, 50, 118, 80, 129];

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// One table row of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    /// 1-based position in the export.
    pub id: usize,
    pub date: String,
    pub time: String,
    pub professor: String,
    pub classroom: String,
    pub subject: String,
}

impl DocumentRow {
    fn cells(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.date.clone(),
            self.time.clone(),
            self.professor.clone(),
            self.classroom.clone(),
            self.subject.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    HeaderBand,
    Row(DocumentRow),
    HolidayBanner,
}

impl Block {
    fn height(&self) -> i64 {
        match self {
            Block::Title(_) => TITLE_HEIGHT,
            Block::HeaderBand | Block::Row(_) => ROW_HEIGHT,
            Block::HolidayBanner => BANNER_HEIGHT,
        }
    }
}

/// Page-by-page content of a document export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pages: Vec<Vec<Block>>,
}

impl DocumentLayout {
    /// Lay out `entries` in the given order.
    ///
    /// A holiday banner goes before the first row dated strictly after the
    /// next unused holiday marker, and each marker is used at most once.
    pub fn build(
        entries: &[ScheduleEntry],
        group_label: &str,
        holidays: &[HolidayMarker],
        locale: Locale,
    ) -> Self {
        let mut layout = PageFiller::new();
        layout.push(Block::Title(format!("Schedule for group {}", group_label)));
        layout.push(Block::HeaderBand);

        let mut pending = holidays.iter().peekable();
        for (index, entry) in entries.iter().enumerate() {
            if let Some(holiday) = pending.peek() {
                if entry.date > holiday.date {
                    layout.push(Block::HolidayBanner);
                    pending.next();
                }
            }

            layout.push(Block::Row(DocumentRow {
                id: index + 1,
                date: entry.long_date(locale),
                time: entry.hour_label(),
                professor: entry.professor.clone(),
                classroom: entry.classroom.clone(),
                subject: entry.subject.clone(),
            }));
        }

        Self {
            pages: layout.finish(),
        }
    }

    pub fn pages(&self) -> &[Vec<Block>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All blocks in reading order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &DocumentRow> {
        self.blocks().filter_map(|block| match block {
            Block::Row(row) => Some(row),
            _ => None,
        })
    }

    pub fn banner_count(&self) -> usize {
        self.blocks()
            .filter(|block| **block == Block::HolidayBanner)
            .count()
    }
}

/// Splits blocks into pages, repeating the header band after each break.
struct PageFiller {
    pages: Vec<Vec<Block>>,
    current: Vec<Block>,
    used: i64,
}

impl PageFiller {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            used: 0,
        }
    }

    fn push(&mut self, block: Block) {
        if self.used + block.height() > PAGE_HEIGHT - 2 * MARGIN && !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
            self.used = 0;
            if !matches!(block, Block::HeaderBand) {
                self.used += Block::HeaderBand.height();
                self.current.push(Block::HeaderBand);
            }
        }
        self.used += block.height();
        self.current.push(block);
    }

    fn finish(mut self) -> Vec<Vec<Block>> {
        if !self.current.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Render entries straight to PDF bytes.
pub fn render(
    entries: &[ScheduleEntry],
    group_label: &str,
    holidays: &[HolidayMarker],
    locale: Locale,
) -> ColloscopeResult<Vec<u8>> {
    let layout = DocumentLayout::build(entries, group_label, holidays, locale);
    write_pdf(&layout)
}

/// Draw a layout as an A4 PDF using the built-in Helvetica fonts.
pub fn write_pdf(layout: &DocumentLayout) -> ColloscopeResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
    for page in layout.pages() {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut body = Vec::new();
    doc.save_to(&mut body)?;
    log::debug!(
        "Rendered document with {} pages ({} bytes)",
        layout.page_count(),
        body.len()
    );
    Ok(body)
}

fn page_operations(blocks: &[Block]) -> Vec<Operation> {
    let mut ops = vec![Operation::new("w", vec![Object::Real(0.5)])];
    let mut top = PAGE_HEIGHT - MARGIN;
    let printable = PAGE_WIDTH - 2 * MARGIN;

    for block in blocks {
        let bottom = top - block.height();
        match block {
            Block::Title(title) => {
                centered_text(&mut ops, title, BOLD_FONT, TITLE_SIZE, bottom + 12, printable);
            }
            Block::HeaderBand => {
                let labels = HEADER_BAND.map(String::from);
                table_row(&mut ops, &labels, BOLD_FONT, TEXT_SIZE, bottom);
            }
            Block::Row(row) => {
                table_row(&mut ops, &row.cells(), REGULAR_FONT, TEXT_SIZE, bottom);
            }
            Block::HolidayBanner => {
                centered_text(&mut ops, HOLIDAY_BANNER, BOLD_FONT, BANNER_SIZE, bottom + 8, printable);
            }
        }
        top = bottom;
    }

    ops
}

fn table_row(ops: &mut Vec<Operation>, cells: &[String; 6], font: &str, size: i64, bottom: i64) {
    let mut x = MARGIN;
    for (column, (cell, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
        ops.push(Operation::new(
            "re",
            vec![
                Object::Integer(x),
                Object::Integer(bottom),
                Object::Integer(width),
                Object::Integer(ROW_HEIGHT),
            ],
        ));
        ops.push(Operation::new("S", vec![]));

        // Long-form dates are the widest cells.
        let size = if column == 1 && font == REGULAR_FONT {
            DATE_SIZE
        } else {
            size
        };
        let text = fit_text(cell, width - 2 * CELL_PADDING, size);
        let text_x = x + (width - estimated_width(&text, size)) / 2;
        show_text(ops, &text, font, size, text_x, bottom + (ROW_HEIGHT - size) / 2 + 2);
        x += width;
    }
}

fn centered_text(ops: &mut Vec<Operation>, text: &str, font: &str, size: i64, baseline: i64, width: i64) {
    let text = fit_text(text, width, size);
    let x = MARGIN + (width - estimated_width(&text, size)) / 2;
    show_text(ops, &text, font, size, x, baseline);
}

fn show_text(ops: &mut Vec<Operation>, text: &str, font: &str, size: i64, x: i64, y: i64) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]));
    ops.push(Operation::new("ET", vec![]));
}

/// Approximate Helvetica advance: about half the font size per glyph.
fn estimated_width(text: &str, size: i64) -> i64 {
    text.chars().count() as i64 * size * 55 / 100
}

/// Truncate `text` with an ellipsis so it fits `width`.
fn fit_text(text: &str, width: i64, size: i64) -> String {
    if estimated_width(text, size) <= width {
        return text.to_string();
    }
    let max_chars = (width * 100 / (size * 55)).max(1) as usize;
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Encode for a WinAnsi font. Characters outside Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Weekday;
    use chrono::{Duration, NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Entry falling exactly on `day` (weeks anchored on the preceding Monday)
    fn entry_on(day: NaiveDate) -> ScheduleEntry {
        use chrono::Datelike;
        let offset = day.weekday().num_days_from_monday() as usize;
        ScheduleEntry::new(
            "4",
            "Maths",
            "M. X",
            "B204",
            Weekday::ALL[offset],
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            day - Duration::days(offset as i64),
        )
    }

    #[test]
    fn test_banner_inserted_once_before_first_row_after_holiday() {
        let entries = vec![
            entry_on(date(2024, 10, 25)),
            entry_on(date(2024, 11, 4)),
            entry_on(date(2024, 11, 6)),
        ];
        let holidays = vec![HolidayMarker::new(date(2024, 10, 28))];
        let layout = DocumentLayout::build(&entries, "4", &holidays, Locale::French);

        assert_eq!(layout.banner_count(), 1);
        let blocks: Vec<&Block> = layout.blocks().collect();
        let banner = blocks
            .iter()
            .position(|b| **b == Block::HolidayBanner)
            .unwrap();
        match blocks[banner + 1] {
            Block::Row(row) => {
                assert_eq!(row.id, 2);
                assert_eq!(row.date, "lundi 4 novembre");
            }
            other => panic!("expected a row after the banner, got {:?}", other),
        }
        match blocks[banner - 1] {
            Block::Row(row) => assert_eq!(row.id, 1),
            other => panic!("expected a row before the banner, got {:?}", other),
        }
    }

    /// A row dated on the holiday marker itself does not trigger the banner
    #[test]
    fn test_banner_needs_strictly_later_date() {
        let entries = vec![entry_on(date(2024, 10, 28))];
        let holidays = vec![HolidayMarker::new(date(2024, 10, 28))];
        let layout = DocumentLayout::build(&entries, "4", &holidays, Locale::French);
        assert_eq!(layout.banner_count(), 0);
    }

    #[test]
    fn test_title_header_and_ids() {
        let entries = vec![entry_on(date(2024, 9, 30)), entry_on(date(2024, 10, 1))];
        let layout = DocumentLayout::build(&entries, "7", &[], Locale::English);
        let blocks: Vec<&Block> = layout.blocks().collect();

        assert_eq!(blocks[0], &Block::Title("Schedule for group 7".to_string()));
        assert_eq!(blocks[1], &Block::HeaderBand);
        let ids: Vec<usize> = layout.rows().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(layout.rows().next().unwrap().date, "monday 30 september");
        assert_eq!(layout.rows().next().unwrap().time, "14h00");
    }

    #[test]
    fn test_long_exports_repeat_header_on_each_page() {
        let entries: Vec<ScheduleEntry> = (0..120)
            .map(|i| date(2024, 9, 2) + Duration::days(i))
            .filter(|day| day.format("%a").to_string() != "Sun")
            .map(entry_on)
            .collect();
        let layout = DocumentLayout::build(&entries, "1", &[], Locale::French);

        assert!(layout.page_count() > 1);
        for page in layout.pages() {
            let band_position = page.iter().position(|b| *b == Block::HeaderBand);
            assert!(band_position.is_some());
            let used: i64 = page.iter().map(Block::height).sum();
            assert!(used <= PAGE_HEIGHT - 2 * MARGIN);
        }
        assert_eq!(layout.rows().count(), entries.len());
    }

    #[test]
    fn test_empty_document_has_title_and_header() {
        let layout = DocumentLayout::build(&[], "3", &[], Locale::French);
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.rows().count(), 0);

        let pdf = write_pdf(&layout).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_pdf_contains_banner_text() {
        let entries = vec![entry_on(date(2024, 10, 25)), entry_on(date(2024, 11, 4))];
        let holidays = vec![HolidayMarker::new(date(2024, 10, 28))];
        let pdf = render(&entries, "4", &holidays, Locale::French).unwrap();

        let doc = Document::load_mem(&pdf).unwrap();
        let pages = doc.get_pages();
        let page_id = *pages.values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("(Holidays)"));
        assert!(text.contains("(Schedule for group 4)"));
    }

    #[test]
    fn test_win_ansi_keeps_latin1() {
        assert_eq!(win_ansi("août"), vec![b'a', b'o', 0xfb, b't']);
        assert_eq!(win_ansi("a€"), vec![b'a', b'?']);
    }

    #[test]
    fn test_fit_text_truncates() {
        let long = "x".repeat(200);
        let fitted = fit_text(&long, 100, 11);
        assert!(fitted.ends_with("..."));
        assert!(estimated_width(&fitted, 11) <= 100);
        assert_eq!(fit_text("short", 100, 11), "short");
    }
}
