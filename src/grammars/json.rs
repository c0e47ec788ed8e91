//! A forgiving JSON dialect.
//!
//! Everything plain JSON accepts, plus the conveniences that keep showing
//! up in hand-written config files: `0x`/`0b`/`0o` integer literals,
//! underscores between digits, single-quoted strings, unquoted identifier
//! keys, `\xNN` escapes, and trailing commas in arrays and objects.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::Num;

use crate::error::{ParseError, Result};
use crate::parsers::{
    alt, alt_named, bracket, check, ilit, lazy, lit, lits, map, opt, read, read1, read1_to, rep,
    repsep, seq, skip, take_in, try_map, LazyParser, Trail,
};
use crate::{driver, Options, Parser};

/// A parsed JSON-ish value.
///
/// Integers land in `Int` when they fit an `i64` and spill into `Big`
/// otherwise; anything with a fraction or exponent becomes `Float`.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// An integer that fits in 64 bits.
    Int(i64),
    /// An integer that doesn't.
    Big(BigInt),
    /// A number with a fractional part or exponent.
    Float(f64),
    /// A string, escapes resolved.
    Str(String),
    /// `[ ... ]`
    Array(Vec<Json>),
    /// `{ ... }`
    Object(BTreeMap<String, Json>),
}

const DEC_DIGITS: &str = "0123456789_";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF_";
const OCT_DIGITS: &str = "01234567_";
const BIN_DIGITS: &str = "01_";
const WS: &str = " \t\r\n";
const IDENT_START: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$";
const IDENT_REST: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$0123456789";

/// Turn the raw text of a numeric literal into a [`Json`] value.
fn number_value(text: String) -> Result<Json, String> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(&text)),
    };
    let radix = match body.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0b") | Some("0B") => 2,
        Some("0o") | Some("0O") => 8,
        _ => 10,
    };
    let body = if radix == 10 { body } else { &body[2..] };
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return Err("expected digits".to_string());
    }

    if radix == 10 && digits.contains(['.', 'e', 'E']) {
        return digits
            .parse::<f64>()
            .map(|v| Json::Float(if sign == "-" { -v } else { v }))
            .map_err(|e| e.to_string());
    }

    let signed = format!("{}{}", sign, digits);
    match i64::from_str_radix(&signed, radix) {
        Ok(v) => Ok(Json::Int(v)),
        Err(_) => BigInt::from_str_radix(&signed, radix)
            .map(Json::Big)
            .map_err(|e| e.to_string()),
    }
}

fn escape_sequence() -> impl Parser<Output = String> + 'static {
    map(
        seq((
            lit("\\"),
            alt((
                map(lits(&["n", "t", "r", "b", "f", "0"]), |c| {
                    match c.as_str() {
                        "n" => "\n",
                        "t" => "\t",
                        "r" => "\r",
                        "b" => "\u{8}",
                        "f" => "\u{c}",
                        _ => "\0",
                    }
                    .to_string()
                }),
                map(
                    try_map(seq((lit("x"), take_in(2, HEX_DIGITS))), hex_escape),
                    |c| c.to_string(),
                ),
                map(
                    try_map(seq((lit("u"), take_in(4, HEX_DIGITS))), hex_escape),
                    |c| c.to_string(),
                ),
                // Any other escaped character stands for itself: \" \' \\ \/
                crate::parsers::take(1),
            )),
        )),
        |(_, text)| text,
    )
}

fn hex_escape((_, digits): (String, String)) -> Result<char, String> {
    let code = u32::from_str_radix(&digits, 16).map_err(|e| e.to_string())?;
    char::from_u32(code).ok_or_else(|| format!("invalid character code {:#x}", code))
}

fn string_literal() -> impl Parser<Output = String> + 'static {
    // Either quote style opens a string, and the one that opened it must
    // close it. The body stops at that quote, a backslash, or a raw
    // newline; the other quote character is plain text.
    let body = |quote: &str| {
        let stop: String = format!("{}\\\n", quote);
        map(
            rep(alt((escape_sequence(), read1_to(&stop, false)))),
            |pieces: Vec<String>| pieces.concat(),
        )
    };
    alt((
        bracket(lit("\""), body("\""), lit("\"")),
        bracket(lit("'"), body("'"), lit("'")),
    ))
}

/// The value grammar. Useful directly when a JSON-ish value is one piece
/// of a larger grammar; for whole documents use [`parse_json`].
pub fn json_value() -> LazyParser<Json> {
    let value = lazy::<Json>();
    let ws = || skip(WS);

    let number = try_map(
        crate::parsers::outer(check((
            opt(lits(&["-", "+"])),
            alt((
                check((ilit("0x"), read1(HEX_DIGITS))),
                check((ilit("0b"), read1(BIN_DIGITS))),
                check((ilit("0o"), read1(OCT_DIGITS))),
                check((
                    read1(DEC_DIGITS),
                    opt(check((lit("."), read1(DEC_DIGITS)))),
                    opt(check((ilit("e"), opt(lits(&["-", "+"])), read1("0123456789")))),
                )),
            )),
        ))),
        number_value,
    );

    let ident = crate::parsers::outer(check((take_in(1, IDENT_START), read(IDENT_REST))));
    let key = alt((string_literal(), ident));
    let member = map(
        seq((key, ws(), lit(":"), ws(), value.clone())),
        |(k, _, _, _, v)| (k, v),
    );

    let object = map(
        bracket(
            check((lit("{"), ws())),
            repsep(member, check((ws(), lit(","), ws())), Trail::Allow),
            check((ws(), lit("}"))),
        ),
        |members| Json::Object(members.into_iter().collect()),
    );

    let array = map(
        bracket(
            check((lit("["), ws())),
            repsep(value.clone(), check((ws(), lit(","), ws())), Trail::Allow),
            check((ws(), lit("]"))),
        ),
        Json::Array,
    );

    value.define(alt_named(
        "value",
        (
            map(lit("null"), |_| Json::Null),
            map(lit("true"), |_| Json::Bool(true)),
            map(lit("false"), |_| Json::Bool(false)),
            number,
            map(string_literal(), Json::Str),
            array,
            object,
        ),
    ));
    value
}

/// Parse a complete JSON-ish document.
///
/// ```
/// use sprig::grammars::json::{parse_json, Json};
///
/// let v = parse_json("{a: 1, 'b': [true, null]}").unwrap();
/// match v {
///     Json::Object(map) => assert_eq!(map.len(), 2),
///     other => panic!("expected object, got {:?}", other),
/// }
/// ```
pub fn parse_json(source: &str) -> Result<Json, ParseError> {
    let p = driver(
        json_value(),
        Options::new().trim(true).detailed(true).causes(true),
    );
    p.parse(source)
}
