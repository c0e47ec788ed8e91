//! Dotted and bracketed key paths, like `users[3].name` or `a['b c'][0]`.

use crate::error::{ParseError, Result};
use crate::parsers::{
    alt, bracket, check, lit, map, outer, read, read1, read1_to, rep, seq, take_in, try_map,
};
use crate::{driver, Options, Parser};

/// One step of a key path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A named field, from `.name`, a bare leading name, or a quoted
    /// bracket segment.
    Field(String),
    /// A numeric index, from `[0]`.
    Index(usize),
}

const IDENT_START: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$";
const IDENT_REST: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$0123456789";

fn ident() -> impl Parser<Output = Key> + 'static {
    map(
        outer(check((take_in(1, IDENT_START), read(IDENT_REST)))),
        Key::Field,
    )
}

fn bracket_segment() -> impl Parser<Output = Key> + 'static {
    let index = try_map(read1("0123456789"), |digits| {
        digits
            .parse::<usize>()
            .map(Key::Index)
            .map_err(|e| e.to_string())
    });
    let quoted = alt((
        map(bracket(lit("'"), read1_to("'", false), lit("'")), Key::Field),
        map(
            bracket(lit("\""), read1_to("\"", false), lit("\"")),
            Key::Field,
        ),
    ));
    bracket(lit("["), alt((index, quoted)), lit("]"))
}

/// The path grammar itself, for embedding in larger grammars.
pub fn key_path() -> impl Parser<Output = Vec<Key>> + 'static {
    map(
        seq((
            alt((ident(), bracket_segment())),
            rep(alt((
                map(seq((lit("."), ident())), |(_, k)| k),
                bracket_segment(),
            ))),
        )),
        |(first, rest)| {
            let mut keys = vec![first];
            keys.extend(rest);
            keys
        },
    )
}

/// Parse a key path into its steps.
///
/// ```
/// use sprig::grammars::keypath::{parse_key_path, Key};
///
/// assert_eq!(
///     parse_key_path("users[3].name").unwrap(),
///     vec![
///         Key::Field("users".to_string()),
///         Key::Index(3),
///         Key::Field("name".to_string()),
///     ],
/// );
/// ```
pub fn parse_key_path(source: &str) -> Result<Vec<Key>, ParseError> {
    let p = driver(key_path(), Options::new().detailed(true));
    p.parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> Key {
        Key::Field(s.to_string())
    }

    #[test]
    fn test_simple_paths() {
        assert_eq!(parse_key_path("a").unwrap(), vec![field("a")]);
        assert_eq!(
            parse_key_path("a.b.c").unwrap(),
            vec![field("a"), field("b"), field("c")]
        );
        assert_eq!(
            parse_key_path("a[0][12]").unwrap(),
            vec![field("a"), Key::Index(0), Key::Index(12)]
        );
    }

    #[test]
    fn test_quoted_segments() {
        assert_eq!(
            parse_key_path("a['b c'].d").unwrap(),
            vec![field("a"), field("b c"), field("d")]
        );
        assert_eq!(
            parse_key_path("[\"x\"]").unwrap(),
            vec![field("x")]
        );
    }

    #[test]
    fn test_rejects() {
        assert!(parse_key_path("").is_err());
        assert!(parse_key_path("a.").is_err());
        assert!(parse_key_path("a[b]").is_err());
        assert!(parse_key_path("a..b").is_err());
        assert!(parse_key_path("3a").is_err());
    }
}
