//! Rendering of summary collections
//!
//! Text output prints, for every pass, the summary, its entity list written
//! as a Python-style list literal, and a `---` separator line. JSON output
//! writes the whole collection at once.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::summary::SummaryCollection;
use std::io::Write;

/// Write a collection in the requested format and flush the sink
///
/// # Errors
///
/// Returns error if writing to `out` fails
pub fn print_summaries<W: Write>(
    collection: &SummaryCollection,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(collection, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, collection)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write every summary record as text
pub fn write_text<W: Write>(collection: &SummaryCollection, out: &mut W) -> std::io::Result<()> {
    for summary in &collection.summaries {
        writeln!(out, "{}", summary.denser_summary)?;
        writeln!(out, "{}", python_list_repr(&summary.missing_entities))?;
        writeln!(out, "---")?;
    }
    Ok(())
}

/// Format strings the way Python prints a `list[str]`
///
/// # Examples
///
/// ```
/// use chain_of_density::output::python_list_repr;
///
/// let entities = vec!["cat".to_string(), "mat".to_string()];
/// assert_eq!(python_list_repr(&entities), "['cat', 'mat']");
/// assert_eq!(python_list_repr(&[]), "[]");
/// ```
pub fn python_list_repr(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| python_str_repr(s)).collect();
    format!("[{}]", inner.join(", "))
}

/// Code point ranges Python's `str.isprintable()` rejects, besides controls:
/// non-ASCII separators (Zs, Zl, Zp), format characters (Cf), private use
/// (Co) and noncharacters. Unassigned code points are not tracked.
const NON_PRINTABLE: &[(u32, u32)] = &[
    (0x00a0, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x0890, 0x0891),
    (0x08e2, 0x08e2),
    (0x1680, 0x1680),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2064),
    (0x2066, 0x206f),
    (0x3000, 0x3000),
    (0xe000, 0xf8ff),
    (0xfdd0, 0xfdef),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0x110bd, 0x110bd),
    (0x110cd, 0x110cd),
    (0x13430, 0x1343f),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
    (0xf0000, 0x10ffff),
];

fn is_printable(c: char) -> bool {
    let cp = c as u32;
    if cp < 0x20 || (0x7f..=0x9f).contains(&cp) {
        return false;
    }
    // U+xFFFE and U+xFFFF are noncharacters in every plane
    if cp & 0xfffe == 0xfffe {
        return false;
    }
    !NON_PRINTABLE.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Quote a string like Python's `repr`: single quotes unless the text holds
/// a single quote and no double quote.
fn python_str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let cp = c as u32;
                if cp <= 0xff {
                    out.push_str(&format!("\\x{:02x}", cp));
                } else if cp <= 0xffff {
                    out.push_str(&format!("\\u{:04x}", cp));
                } else {
                    out.push_str(&format!("\\U{:08x}", cp));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
