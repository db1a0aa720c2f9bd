//! Comma-delimited text tables with double-quote escaping.
//!
//! Quoted cells may contain commas; a doubled quote inside a quoted cell is a
//! literal quote. A quote that is never closed simply leaves the rest of the
//! line inside the cell.

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// Header plus data rows of a parsed payload. Both are empty when the payload
/// had fewer than two non-blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

pub fn parse_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == QUOTE {
            if in_quotes && chars.peek() == Some(&QUOTE) {
                cur.push(QUOTE);
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }
        if ch == DELIMITER && !in_quotes {
            out.push(trim_cell(&cur).to_string());
            cur.clear();
            continue;
        }
        cur.push(ch);
    }

    out.push(trim_cell(&cur).to_string());
    out
}

/// Splits `payload` into a header and data rows, skipping blank lines.
pub fn parse_table(payload: &str) -> ParsedTable {
    let payload = payload.strip_prefix(BOM).unwrap_or(payload);
    let lines: Vec<&str> = payload
        .lines()
        .map(trim_cell)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return ParsedTable::default();
    };
    if rest.is_empty() {
        return ParsedTable::default();
    }

    ParsedTable {
        header: parse_line(first),
        rows: rest.iter().map(|line| parse_line(line)).collect(),
    }
}

/// Whitespace trim that also drops byte-order marks left by spreadsheet exports.
fn trim_cell(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_delimiter_stays_in_cell() {
        assert_eq!(
            parse_line(r#""Smith, Jr.",20.5,3"#),
            vec!["Smith, Jr.", "20.5", "3"]
        );
    }

    #[test]
    fn doubled_quote_is_literal() {
        assert_eq!(
            parse_line(r#""The ""Jet"" Jones",1"#),
            vec![r#"The "Jet" Jones"#, "1"]
        );
    }

    #[test]
    fn cells_are_trimmed_and_trailing_empty_kept() {
        assert_eq!(parse_line(" a , b ,"), vec!["a", "b", ""]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn unclosed_quote_swallows_rest_of_line() {
        assert_eq!(parse_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn crlf_and_blank_lines_are_skipped() {
        let table = parse_table("name,ppg\r\n\r\nAlpha,20\r\n   \nBeta,10\n");
        assert_eq!(table.header, vec!["name", "ppg"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Beta", "10"]);
    }

    #[test]
    fn header_only_payload_is_empty() {
        assert!(parse_table("name,ppg\n").is_empty());
        assert!(parse_table("\n  \n").is_empty());
    }

    #[test]
    fn leading_bom_is_stripped_from_header() {
        let table = parse_table("\u{feff}name,ppg\r\nAlpha,20\r\n");
        assert_eq!(table.header, vec!["name", "ppg"]);
        assert_eq!(table.rows, vec![vec!["Alpha", "20"]]);
        assert_eq!(parse_line("\u{feff} a ,b"), vec!["a", "b"]);
    }
}
