//! Delimiter-separated values with configurable separators.
//!
//! The field scanner is a [`read_to_dyn`] over a shared stop set, so one
//! grammar shape serves every separator configuration; the stop set is
//! filled in from the options at parse time.

use std::collections::BTreeMap;

use crate::error::{ParseError, Result};
use crate::parsers::{
    alt, bracket, lit, map, read1_to, read_to_dyn, rep, repsep, StopState, Trail,
};
use crate::{driver, Options, Parser};

/// Separator configuration for [`parse_csv`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    /// Separator between fields. Default `,`.
    pub field_sep: char,
    /// Separator between records. Default `\n`.
    pub record_sep: char,
    /// Quote character for fields containing separators. A doubled quote
    /// inside a quoted field stands for the quote itself. Default `"`.
    pub quote: char,
}

impl Default for CsvOptions {
    fn default() -> CsvOptions {
        CsvOptions {
            field_sep: ',',
            record_sep: '\n',
            quote: '"',
        }
    }
}

fn csv_parser(options: &CsvOptions) -> impl Parser<Output = Vec<Vec<String>>> + 'static {
    let q = options.quote;
    let qs = q.to_string();
    let field_sep = options.field_sep.to_string();
    let record_sep = options.record_sep.to_string();

    // Unquoted fields stop at either separator; the stop set is owned by
    // the state cell so a single scanner definition covers both.
    let stops = StopState::new("");
    stops.set_stop(&format!("{}{}", options.field_sep, options.record_sep));

    let doubled = map(lit(&format!("{}{}", q, q)), move |_| qs.clone());
    let quoted_body = map(
        rep(alt((doubled, read1_to(&q.to_string(), true)))),
        |pieces: Vec<String>| pieces.concat(),
    );
    let quoted = bracket(lit(&q.to_string()), quoted_body, lit(&q.to_string()));

    let field = alt((quoted, read_to_dyn(stops, true)));
    let record = repsep(field, lit(&field_sep), Trail::Disallow);
    map(
        repsep(record, lit(&record_sep), Trail::Disallow),
        |mut rows: Vec<Vec<String>>| {
            // A trailing record separator leaves one phantom empty record.
            if rows.last().map_or(false, |r| r == &[String::new()]) {
                rows.pop();
            }
            rows
        },
    )
}

/// Parse delimiter-separated text into rows of fields.
///
/// ```
/// use sprig::grammars::csv::{parse_csv, CsvOptions};
///
/// let rows = parse_csv("a,b\nc,\"d,e\"\n", &CsvOptions::default()).unwrap();
/// assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d,e"]]);
/// ```
pub fn parse_csv(source: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>, ParseError> {
    let p = driver(csv_parser(options), Options::new().detailed(true));
    p.parse(source)
}

/// Parse like [`parse_csv`], treating the first row as a header and
/// producing one key-to-value map per remaining row.
///
/// Rows shorter than the header simply lack those keys; extra fields
/// beyond the header are dropped.
pub fn parse_csv_records(
    source: &str,
    options: &CsvOptions,
) -> Result<Vec<BTreeMap<String, String>>, ParseError> {
    let mut rows = parse_csv(source, options)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let header = rows.remove(0);
    Ok(rows
        .into_iter()
        .map(|row| header.iter().cloned().zip(row).collect())
        .collect())
}
