//! Plain-text exports for printing or spreadsheet import.

use std::borrow::Cow;
use std::fmt::Write;

use stitch_quant::Pattern;

/// One CSV line per grid row, codes separated by commas.
pub fn grid_csv(pattern: &Pattern) -> String {
    let mut out = String::new();
    for row in pattern.grid() {
        let line: Vec<Cow<'_, str>> = row.into_iter().map(csv_field).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Header `code,color,count`, then one line per code in assignment order.
pub fn legend_csv(pattern: &Pattern) -> String {
    let mut out = String::from("code,color,count\n");
    for entry in pattern.colors() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{},{},{}", csv_field(&entry.code), entry.color, entry.count);
    }
    out
}

/// Quote a field when it contains a delimiter, a quote or a line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
