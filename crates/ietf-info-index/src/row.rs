//! Parsing of a single index table row into a [`DocumentRecord`].
//!
//! Row layout, as published:
//!
//! ```text
//! <tr>
//!   <td><script>...</script><noscript>9000</noscript></td>
//!   <td><b>Title</b><br>
//!     Authors
//!     [ May 2021 ]
//!     (Status: PROPOSED STANDARD)
//!     (Stream: IETF, Area: tsv, WG: quic)
//!   </td>
//! </tr>
//! ```

use std::collections::BTreeMap;

use ietf_info_core::DocumentRecord;

use crate::markup;

/// Element whose presence in the first cell marks a genuine data row.
pub const ROW_MARKER: &str = "noscript";

const NOT_ISSUED: &str = "Not issued";

/// Parse one `<tr>` block. Returns `None` for header/noise rows and for rows
/// missing a number or title.
pub fn parse_row(row: &str) -> Option<DocumentRecord> {
    let cells = markup::outer_blocks(row, "td");
    let first = markup::inner_html(&row[cells.first()?.clone()]);
    let marker = markup::first_element(first, ROW_MARKER)?;
    let number: u32 = markup::text_content(marker).trim().parse().ok()?;

    let second = markup::inner_html(&row[cells.get(1)?.clone()]);
    let title = markup::text_content(markup::first_element(second, "b")?)
        .trim()
        .to_string();
    let text = markup::text_content(second);

    let mut record = DocumentRecord::new(number, title).with_issued(!text.contains(NOT_ISSUED));
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()).skip(1) {
        if line.contains('[') {
            if let Some(year) = parse_year(line) {
                record.year = Some(year);
            }
        } else if line.contains(':') {
            parse_attributes(line, &mut record.attributes);
        }
    }
    Some(record)
}

/// Year from a date line such as `[ May 2021 ]`: the second-to-last token.
pub fn parse_year(line: &str) -> Option<i32> {
    line.split_whitespace().rev().nth(1)?.parse().ok()
}

/// `(Key: value, Other: value)` → `key = value`, `other = value`.
///
/// Parentheses are dropped before splitting on `", "`. Parts without a
/// `": "` separator (e.g. the tail of `Format: TXT, HTML`) are skipped.
pub fn parse_attributes(line: &str, into: &mut BTreeMap<String, String>) {
    let cleaned: String = line.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    for part in cleaned.split(", ") {
        let mut pieces = part.split(": ");
        if let (Some(key), Some(value)) = (pieces.next(), pieces.next()) {
            into.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"<tr>
<td valign="top"><script language="javascript">doMainDocLink('RFC9000');</script><noscript>9000</noscript>&nbsp;</td>
<td valign="top"><b>QUIC: A UDP-Based Multiplexed and Secure Transport</b>
<br>
J. Iyengar, Ed., M. Thomson, Ed.
[ May 2021 ]
(Format: HTML, TXT, PDF, XML)
(Status: PROPOSED STANDARD)
(Stream: IETF, Area: tsv, WG: quic)
(DOI: 10.17487/RFC9000)
</td>
</tr>"#;

    #[test]
    fn parses_published_row() {
        let rec = parse_row(ROW).expect("row should parse");
        assert_eq!(rec.number(), 9000);
        assert_eq!(rec.title, "QUIC: A UDP-Based Multiplexed and Secure Transport");
        assert!(rec.issued);
        assert_eq!(rec.year, Some(2021));
        assert_eq!(rec.status(), Some("PROPOSED STANDARD"));
        assert_eq!(rec.attributes["stream"], "IETF");
        assert_eq!(rec.attributes["wg"], "quic");
        assert_eq!(rec.attributes["doi"], "10.17487/RFC9000");
        assert_eq!(rec.attributes["format"], "HTML");
    }

    #[test]
    fn character_references_in_title_are_decoded() {
        let row = "<tr><td><noscript>7005</noscript></td><td><b>Caf&#233; &#x2013; Test</b>\nA. Author\n[ June 2022 ]\n(Status: INFORMATIONAL)\n</td></tr>";
        let rec = parse_row(row).unwrap();
        assert_eq!(rec.title, "Caf\u{e9} \u{2013} Test");
        assert_eq!(rec.status(), Some("INFORMATIONAL"));
    }

    #[test]
    fn title_line_colon_is_not_an_attribute() {
        let rec = parse_row(ROW).unwrap();
        assert!(!rec.attributes.contains_key("quic"));
    }

    #[test]
    fn row_without_marker_is_skipped() {
        let row = "<tr><td><b>Number</b></td><td><b>Title</b></td></tr>";
        assert!(parse_row(row).is_none());
    }

    #[test]
    fn row_with_bad_number_is_skipped() {
        let row = "<tr><td><noscript>RFC</noscript></td><td><b>T</b></td></tr>";
        assert!(parse_row(row).is_none());
    }

    #[test]
    fn row_without_title_cell_is_skipped() {
        assert!(parse_row("<tr><td><noscript>7</noscript></td></tr>").is_none());
    }

    #[test]
    fn not_issued_row() {
        let row = "<tr><td><noscript>7002</noscript></td><td><b>Not Issued</b>\nNot issued.\n</td></tr>";
        let rec = parse_row(row).unwrap();
        assert!(!rec.issued);
        assert!(rec.year.is_none());
    }

    #[test]
    fn unparseable_year_stays_absent() {
        let row = "<tr><td><noscript>7003</noscript></td><td><b>T</b>\n[ Month unknown ]\n(Status: HISTORIC)\n</td></tr>";
        let rec = parse_row(row).unwrap();
        assert_eq!(rec.year, None);
        assert_eq!(rec.status(), Some("HISTORIC"));
    }

    #[test]
    fn year_is_second_to_last_token() {
        assert_eq!(parse_year("[ March 2023 ]"), Some(2023));
        assert_eq!(parse_year("[ 2023"), None);
        assert_eq!(parse_year("["), None);
    }

    #[test]
    fn attributes_lowercase_keys() {
        let mut attrs = BTreeMap::new();
        parse_attributes("(Obsoletes RFC1, Updated by: RFC2) (DOI: x)", &mut attrs);
        assert_eq!(attrs.get("updated by").map(String::as_str), Some("RFC2 DOI"));
        assert!(!attrs.contains_key("obsoletes rfc1"));
    }
}
