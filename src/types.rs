use crate::error::{BookError, BookResult};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Longest sheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Highest column index in an .xlsx worksheet (XFD).
pub const MAX_COLUMN: u16 = 16_384;

/// 1-based column indexes, so builders can write `col::F` instead of `6`.
pub mod col {
    pub const A: u16 = 1;
    pub const B: u16 = 2;
    pub const C: u16 = 3;
    pub const D: u16 = 4;
    pub const E: u16 = 5;
    pub const F: u16 = 6;
    pub const G: u16 = 7;
    pub const H: u16 = 8;
    pub const I: u16 = 9;
    pub const J: u16 = 10;
    pub const K: u16 = 11;
    pub const L: u16 = 12;
    pub const M: u16 = 13;
    pub const N: u16 = 14;
    pub const O: u16 = 15;
    pub const P: u16 = 16;
    pub const Q: u16 = 17;
    pub const R: u16 = 18;
    pub const S: u16 = 19;
    pub const T: u16 = 20;
    pub const U: u16 = 21;
    pub const V: u16 = 22;
    pub const W: u16 = 23;
}

//==============================================================================
// Cell Addressing
//==============================================================================

/// Convert a 1-based column index to its letter form (1 → A, 27 → AA)
pub fn column_letter(col: u16) -> String {
    let mut result = String::new();
    let mut idx = usize::from(col.max(1)) - 1;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert column letters to a 1-based index (A → 1, AA → 27)
pub fn column_number(letters: &str) -> Option<u16> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut value: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        value = value * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
    }
    u16::try_from(value)
        .ok()
        .filter(|v| (1..=MAX_COLUMN).contains(v))
}

/// A 1-based cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddr {
    pub row: u32,
    pub col: u16,
}

impl CellAddr {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse A1 notation. Absolute markers (`$B$12`) are accepted.
    pub fn parse(a1: &str) -> BookResult<Self> {
        let cleaned: String = a1.trim().chars().filter(|c| *c != '$').collect();
        let split = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| BookError::Parse(format!("Missing row in cell address '{}'", a1)))?;
        let (letters, digits) = cleaned.split_at(split);

        let col = column_number(letters)
            .ok_or_else(|| BookError::Parse(format!("Invalid column in cell address '{}'", a1)))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| BookError::Parse(format!("Invalid row in cell address '{}'", a1)))?;
        if row == 0 {
            return Err(BookError::Parse(format!(
                "Row must be 1 or greater in cell address '{}'",
                a1
            )));
        }

        Ok(Self { row, col })
    }

    pub fn a1(&self) -> String {
        format!("{}{}", column_letter(self.col), self.row)
    }

    /// Zero-based (row, col) pair used by the xlsx writer
    pub fn zero_based(&self) -> (u32, u16) {
        (self.row - 1, self.col - 1)
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.a1())
    }
}

/// A cell on a named sheet, rendered as a quoted cross-sheet reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetCell {
    pub sheet: String,
    pub addr: CellAddr,
}

impl SheetCell {
    pub fn new(sheet: impl Into<String>, addr: CellAddr) -> Self {
        Self {
            sheet: sheet.into(),
            addr,
        }
    }

    /// Top-left cell of a sheet, the usual hyperlink target
    pub fn origin(sheet: impl Into<String>) -> Self {
        Self::new(sheet, CellAddr::new(1, 1))
    }
}

impl fmt::Display for SheetCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.addr)
    }
}

//==============================================================================
// Cell Content
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// Formula text including its leading `=`
    Formula(String),
}

impl CellValue {
    pub fn formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.starts_with('=') && s.len() > 1 {
            CellValue::Formula(s)
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(n as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<f64>,
    /// RGB color, e.g. `0x000080`
    pub font_color: Option<u32>,
    pub fill: Option<u32>,
    pub number_format: Option<String>,
    pub wrap: bool,
}

impl CellStyle {
    pub fn is_plain(&self) -> bool {
        *self == CellStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    /// Internal hyperlink target
    pub link: Option<SheetCell>,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: CellStyle::default(),
            link: None,
        }
    }

    pub fn bold(&mut self) -> &mut Self {
        self.style.bold = true;
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.style.italic = true;
        self
    }

    pub fn size(&mut self, points: f64) -> &mut Self {
        self.style.font_size = Some(points);
        self
    }

    pub fn color(&mut self, rgb: u32) -> &mut Self {
        self.style.font_color = Some(rgb);
        self
    }

    pub fn fill(&mut self, rgb: u32) -> &mut Self {
        self.style.fill = Some(rgb);
        self
    }

    pub fn number_format(&mut self, format: &str) -> &mut Self {
        self.style.number_format = Some(format.to_string());
        self
    }

    pub fn wrap(&mut self) -> &mut Self {
        self.style.wrap = true;
        self
    }

    pub fn link_to(&mut self, target: SheetCell) -> &mut Self {
        self.link = Some(target);
        self
    }
}

//==============================================================================
// Sheets
//==============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<CellAddr, Cell>,
    column_widths: BTreeMap<u16, f64>,
    merges: Vec<(CellAddr, CellAddr)>,
    right_to_left: bool,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merges: Vec::new(),
            right_to_left: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write a value, replacing any previous cell (and its style) at that address
    pub fn write(&mut self, row: u32, col: u16, value: impl Into<CellValue>) -> &mut Cell {
        let cell = Cell::new(value);
        match self.cells.entry(CellAddr::new(row, col)) {
            Entry::Occupied(mut slot) => {
                slot.insert(cell);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(cell),
        }
    }

    /// Write a hyperlink cell pointing at the top-left cell of `target`
    pub fn link(&mut self, row: u32, col: u16, text: impl Into<CellValue>, target: &str) -> &mut Cell {
        let cell = self.write(row, col, text);
        cell.link = Some(SheetCell::origin(target));
        cell
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&CellAddr::new(row, col))
    }

    pub fn cell_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(&CellAddr::new(row, col))
    }

    pub fn cell_a1(&self, a1: &str) -> Option<&Cell> {
        CellAddr::parse(a1).ok().and_then(|addr| self.cells.get(&addr))
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellAddr, &Cell)> {
        self.cells.iter()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn formula_count(&self) -> usize {
        self.cells.values().filter(|c| c.value.is_formula()).count()
    }

    /// Remove every cell at or below `row`
    pub fn clear_from_row(&mut self, row: u32) {
        self.cells.retain(|addr, _| addr.row < row);
        self.merges.retain(|(first, _)| first.row < row);
    }

    /// Remove every cell, merge and column width
    pub fn clear(&mut self) {
        self.clear_from_row(1);
        self.column_widths.clear();
    }

    /// Highest used row, 0 for an empty sheet
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|a| a.row).max().unwrap_or(0)
    }

    /// Highest used column, 0 for an empty sheet
    pub fn max_column(&self) -> u16 {
        self.cells.keys().map(|a| a.col).max().unwrap_or(0)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn set_column_widths(&mut self, widths: &[(u16, f64)]) {
        for &(col, width) in widths {
            self.set_column_width(col, width);
        }
    }

    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn merge(&mut self, first: CellAddr, last: CellAddr) {
        if !self.merges.contains(&(first, last)) {
            self.merges.push((first, last));
        }
    }

    pub fn merges(&self) -> &[(CellAddr, CellAddr)] {
        &self.merges
    }

    pub fn set_right_to_left(&mut self, rtl: bool) {
        self.right_to_left = rtl;
    }

    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }
}

//==============================================================================
// Workbook
//==============================================================================

/// Check a sheet name against the rules Excel enforces
pub fn validate_sheet_name(name: &str) -> BookResult<()> {
    if name.trim().is_empty() {
        return Err(BookError::Sheet("Sheet name must not be blank".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(BookError::Sheet(format!(
            "Sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(bad) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(BookError::Sheet(format!(
            "Sheet name '{}' contains invalid character '{}'",
            name, bad
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(BookError::Sheet(format!(
            "Sheet name '{}' must not start or end with an apostrophe",
            name
        )));
    }
    // Excel reserves this name for its change-tracking sheet
    if name.eq_ignore_ascii_case("history") {
        return Err(BookError::Sheet(format!("Sheet name '{}' is reserved", name)));
    }
    Ok(())
}

/// In-memory workbook: ordered sheets plus the sheet shown on open
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookModel {
    sheets: Vec<Sheet>,
    active: usize,
}

impl WorkbookModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty sheet. Names are unique, compared case-insensitively as Excel does.
    pub fn add_sheet(&mut self, name: &str) -> BookResult<&mut Sheet> {
        validate_sheet_name(name)?;
        if self
            .sheets
            .iter()
            .any(|s| s.name().to_lowercase() == name.to_lowercase())
        {
            return Err(BookError::Sheet(format!("Duplicate sheet name '{}'", name)));
        }
        self.sheets.push(Sheet::new(name));
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Like `sheet_mut`, but a missing sheet is an error
    pub fn require_mut(&mut self, name: &str) -> BookResult<&mut Sheet> {
        self.sheet_mut(name)
            .ok_or_else(|| BookError::Sheet(format!("Unknown sheet '{}'", name)))
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn set_active(&mut self, name: &str) -> BookResult<()> {
        let idx = self
            .sheets
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| BookError::Sheet(format!("Unknown sheet '{}'", name)))?;
        self.active = idx;
        Ok(())
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(self.active)
    }

    pub fn resolve(&self, target: &SheetCell) -> Option<&Cell> {
        self.sheet(&target.sheet)
            .and_then(|s| s.cell(target.addr.row, target.addr.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn test_column_number() {
        assert_eq!(column_number("A"), Some(1));
        assert_eq!(column_number("w"), Some(23));
        assert_eq!(column_number("AA"), Some(27));
        assert_eq!(column_number("XFD"), Some(MAX_COLUMN));
        assert_eq!(column_number("XFE"), None);
        assert_eq!(column_number(""), None);
        assert_eq!(column_number("A1"), None);
    }

    #[test]
    fn test_cell_addr_parse() {
        let addr = CellAddr::parse("F21").unwrap();
        assert_eq!(addr, CellAddr::new(21, 6));
        assert_eq!(addr.a1(), "F21");
        assert_eq!(CellAddr::parse("$B$12").unwrap(), CellAddr::new(12, 2));
        assert_eq!(addr.zero_based(), (20, 5));
    }

    #[test]
    fn test_cell_addr_parse_errors() {
        assert!(CellAddr::parse("F").is_err());
        assert!(CellAddr::parse("21").is_err());
        assert!(CellAddr::parse("F0").is_err());
        assert!(CellAddr::parse("").is_err());
    }

    #[test]
    fn test_sheet_cell_display_quotes_name() {
        let target = SheetCell::new("Profit and Loss", CellAddr::new(21, 6));
        assert_eq!(target.to_string(), "'Profit and Loss'!F21");
        let odd = SheetCell::new("Owner's Sheet", CellAddr::new(1, 1));
        assert_eq!(odd.to_string(), "'Owner''s Sheet'!A1");
    }

    #[test]
    fn test_cell_value_from_str() {
        assert_eq!(
            CellValue::from("=SUM(A1:A3)"),
            CellValue::Formula("=SUM(A1:A3)".to_string())
        );
        assert_eq!(CellValue::from("Total"), CellValue::Text("Total".to_string()));
        assert_eq!(CellValue::from("="), CellValue::Text("=".to_string()));
        assert_eq!(CellValue::from(5), CellValue::Number(5.0));
    }

    #[test]
    fn test_sheet_write_and_clear() {
        let mut sheet = Sheet::new("Test");
        sheet.write(1, col::A, "Header").bold();
        sheet.write(8, col::F, 100);
        sheet.write(9, col::G, "=F8*2");
        assert_eq!(sheet.max_row(), 9);
        assert_eq!(sheet.max_column(), col::G);
        assert_eq!(sheet.formula_count(), 1);
        assert!(sheet.cell(1, col::A).unwrap().style.bold);

        sheet.clear_from_row(7);
        assert_eq!(sheet.cell_count(), 1);
        assert_eq!(sheet.max_row(), 1);
    }

    #[test]
    fn test_sheet_clear_drops_widths_and_merges() {
        let mut sheet = Sheet::new("Test");
        sheet.write(2, col::A, "Title");
        sheet.merge(CellAddr::new(2, col::A), CellAddr::new(2, col::D));
        sheet.set_column_widths(&[(col::A, 5.0), (col::D, 30.0)]);

        sheet.clear();
        assert_eq!(sheet.cell_count(), 0);
        assert!(sheet.merges().is_empty());
        assert!(sheet.column_widths().is_empty());
    }

    #[test]
    fn test_sheet_write_replaces_style() {
        let mut sheet = Sheet::new("Test");
        sheet.write(2, col::B, "old").bold().fill(0xFFCCCC);
        sheet.write(2, col::B, "new");
        let cell = sheet.cell_a1("B2").unwrap();
        assert_eq!(cell.value, CellValue::Text("new".to_string()));
        assert!(cell.style.is_plain());
    }

    #[test]
    fn test_sheet_link() {
        let mut sheet = Sheet::new("Notes");
        sheet.link(1, col::C, "Back", "Financial Position");
        let cell = sheet.cell(1, col::C).unwrap();
        assert_eq!(
            cell.link.as_ref().map(ToString::to_string),
            Some("'Financial Position'!A1".to_string())
        );
    }

    #[test]
    fn test_validate_sheet_name() {
        assert!(validate_sheet_name("28.29.30.31").is_ok());
        assert!(validate_sheet_name("22.-23").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name("a/b").is_err());
        assert!(validate_sheet_name("History").is_err());
        assert!(validate_sheet_name(&"x".repeat(32)).is_err());
        assert!(validate_sheet_name(&"x".repeat(31)).is_ok());
    }

    #[test]
    fn test_workbook_rejects_duplicates() {
        let mut model = WorkbookModel::new();
        model.add_sheet("Equity").unwrap();
        let err = model.add_sheet("EQUITY").unwrap_err();
        assert!(err.to_string().contains("Duplicate sheet name"));
        assert_eq!(model.sheet_names(), vec!["Equity"]);
    }

    #[test]
    fn test_workbook_active_and_resolve() {
        let mut model = WorkbookModel::new();
        model.add_sheet("A").unwrap();
        model.add_sheet("B").unwrap().write(3, col::C, 42);
        model.set_active("B").unwrap();
        assert_eq!(model.active_index(), 1);
        assert!(model.set_active("Missing").is_err());

        let target = SheetCell::new("B", CellAddr::new(3, 3));
        assert_eq!(model.resolve(&target).unwrap().value, CellValue::Number(42.0));
        assert!(model.resolve(&SheetCell::origin("A")).is_none());
    }
}
