//! Minimal CSV reader for the reference tables.
//!
//! Handles the subset of RFC 4180 the reference files use: quoted fields,
//! doubled quotes, separators and line breaks inside quotes, CRLF or LF
//! endings and a leading UTF-8 BOM. Empty lines are skipped; a line holding
//! only separators or spaces is still a record.

use super::ReferenceError;

/// One parsed record with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRecord {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Parse `text` into records.
pub fn parse_records(text: &str) -> Result<Vec<CsvRecord>, ReferenceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut fields), record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ReferenceError::Csv {
            line: record_line,
            message: "unterminated quoted field".into(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, fields, record_line);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<CsvRecord>, fields: Vec<String>, line: usize) {
    let empty_line = fields.len() == 1 && fields[0].is_empty();
    if !empty_line {
        records.push(CsvRecord { line, fields });
    }
}

/// Header-aware view over a parsed CSV file.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<CsvRecord>,
}

impl CsvTable {
    /// Parse `text`, treating the first record as the header row.
    pub fn parse(text: &str) -> Result<Self, ReferenceError> {
        let mut records = parse_records(text)?.into_iter();
        let headers = match records.next() {
            Some(header) => header.fields.into_iter().map(|h| h.trim().to_string()).collect(),
            None => Vec::new(),
        };
        Ok(Self {
            headers,
            rows: records.collect(),
        })
    }

    /// Position of a required column, matched exactly against the trimmed header.
    pub fn column(&self, name: &str) -> Result<usize, ReferenceError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReferenceError::MissingColumn(name.to_string()))
    }

    /// Position of an optional column.
    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> &[CsvRecord] {
        &self.rows
    }
}
