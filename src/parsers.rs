//! The parser zoo: primitives and combinators.

mod chars;
mod either;
mod exact;
mod lazy;
mod map;
mod name;
mod option;
mod outer;
mod read_to;
mod repeat;
mod sequence;

pub use chars::{
    iread, iread1, iskip, iskip1, itake_in, itake_not_in, read, read1, skip, skip1, take, take_in,
    take_not_in, ReadChars, SkipChars, TakeChars,
};
pub use either::{alt, alt_named, AltParser, Alternatives};
pub use exact::{ilit, ilits, lit, lits, Literal};
pub use lazy::{lazy, LazyParser};
pub use map::{chain, map, try_map, verify, ChainParser, MapParser, TryMapParser, VerifyParser};
pub use name::{debug, name, DebugParser, NamedParser};
pub use option::{and_not, not, opt, AndNotParser, NotParser, OptionalParser};
pub use outer::{outer, read1_to_parser, read_to_parser, OuterParser, ReadToParser};
pub use read_to::{
    iread1_to, iread_to, peek, read1_to, read_to, read_to_dyn, Peek, ReadTo, ReadToDyn, StopState,
};
pub use repeat::{empty, rep, rep1, rep1sep, repsep, EmptyParser, RepeatParser, Trail};
pub use sequence::{
    bracket, bracket_any, check, seq, BracketAnyParser, BracketParser, CheckParser, SeqParser,
    Sequence,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::traits::Parser;

    #[test]
    fn test_parse() {
        let p = empty();
        assert_parse_eq(p, "", ());
        assert_no_parse(p, "x");

        let p = "ok";
        assert_parse_eq(p, "ok", "ok".to_string());
        assert_no_parse(p, "");
        assert_no_parse(p, "o");
        assert_no_parse(p, "nok");

        let p = seq(("ok", "go"));
        assert_parse_eq(&p, "okgo", ("ok".to_string(), "go".to_string()));
        assert_no_parse(&p, "ok");

        let p = map(seq((lit("#"), read1("0123456789"))), |(_, n)| n);
        assert_parse_eq(&p, "#100", "100".to_string());
    }

    #[test]
    fn test_shared_parsers() {
        // Differently shaped parsers behind one erased type.
        let tokens: Vec<crate::SharedParser<String>> = vec![
            crate::shared(lit("let")),
            crate::shared(read1("0123456789")),
            crate::shared(outer(check((lit("\""), read("abc"), lit("\""))))),
        ];
        assert_eq!(tokens[1].parse("42").unwrap(), "42");
        assert_eq!(tokens[2].parse("\"abc\"").unwrap(), "\"abc\"");
        assert!(tokens[0].parse("42").is_err());
    }

    #[test]
    fn test_combinators_compose() {
        // Every combinator accepts every other as input; spot-check a few
        // deep stacks.
        let p = rep(opt(alt((
            map(lit("a"), |_| 'a'),
            map(bracket(lit("["), name(take(1), "inner"), lit("]")), |_| 'b'),
        ))));
        assert!(p.parse("a[x]a").is_ok());

        let p = outer(rep1sep(
            verify(read1("abc"), |_| Ok(())),
            check((skip(" "), lit(","), skip(" "))),
            Trail::Disallow,
        ));
        assert_parse_eq(&p, "ab , c", "ab , c".to_string());
    }
}
