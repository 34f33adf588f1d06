//! HTML backend.
//!
//! Produces one self-contained page. Every cell carries a `bgcolor` for its
//! conservation level; motif cells are wrapped in `<u><b>`.


use super::{RenderOptions, Row, LEGEND, SUMMARY_KEY};
use crate::model::Conservation;
use crate::summary::{rank, MatchRecord};

/// Display color for a conservation level.
pub fn color_name(level: Conservation) -> &'static str {
    match level {
        Conservation::Identical => "gold",
        Conservation::Strong => "pink",
        Conservation::Weak => "lightgreen",
        Conservation::NonConserved => "white",
    }
}

/// Escapes markup characters in text content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_char(c: char) -> String {
    let mut buf = [0u8; 4];
    escape(c.encode_utf8(&mut buf))
}

/// The legend paragraph.
pub fn legend() -> String {
    format!("<p>{}</p>\n", escape(LEGEND))
}

/// One line per match: position, literal, score.
pub fn summary_listing(records: &[MatchRecord]) -> String {
    listing("motif-list", records.iter())
}

/// Matches ordered by descending score.
pub fn ranked_listing(records: &[MatchRecord]) -> String {
    let mut out = String::from("<h3>Ranked by conservation</h3>\n");
    out.push_str(&listing("motif-rank", rank(records).into_iter()));
    out
}

fn listing<'a>(class: &str, records: impl Iterator<Item = &'a MatchRecord>) -> String {
    let mut out = String::new();
    out.push_str(&format!("<table class=\"{}\">\n", class));
    out.push_str(&format!("<tr><th><tt>{}</tt></th></tr>\n", escape(SUMMARY_KEY)));
    for record in records {
        out.push_str(&format!(
            "<tr><td><tt>{} {} {}</tt></td></tr>\n",
            record.position,
            escape(&record.literal),
            record.score
        ));
    }
    out.push_str("</table>\n");
    out
}

/// The paginated sequence table, one `<tr>` per row.
pub fn annotated_view(rows: &[Row]) -> String {
    let mut out = String::from("<table class=\"sequence-view\">\n");
    for row in rows {
        out.push_str(&format!("<tr><td><tt>{}</tt></td>", row.position));
        for cell in &row.cells {
            let color = color_name(cell.conservation);
            let symbol = escape_char(cell.symbol);
            if cell.in_motif {
                out.push_str(&format!("<td bgcolor=\"{color}\"><tt><u><b>{symbol}</b></u></tt></td>"));
            } else {
                out.push_str(&format!("<td bgcolor=\"{color}\"><tt>{symbol}</tt></td>"));
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Assembles the page: legend, summary listing, annotated view, and the
/// ranked listing when requested.
pub fn document(rows: &[Row], records: &[MatchRecord], options: &RenderOptions) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&options.title)));
    out.push_str("</head>\n<body>\n");
    out.push_str(&legend());
    out.push_str(&summary_listing(records));
    out.push_str(&annotated_view(rows));
    if options.ranked {
        out.push_str(&ranked_listing(records));
    }
    out.push_str("</body>\n</html>\n");
    out
}
