//! Driver behaviors and diagnostics, end to end.

use sprig::prelude::*;

#[test]
fn test_consume_all_message() {
    let p = driver(read1("abc"), Options::new().detailed(true));
    let err = p.parse("abcd").unwrap_err();
    assert_eq!(err.position, 3);
    assert_eq!(
        err.to_string(),
        "expected to consume all input, but only 3 chars consumed at line 1 column 3"
    );
}

#[test]
fn test_cause_chain_reaches_semantic_rejection() {
    // One branch matches the text but rejects it in conversion; that
    // rejection, three characters in, is the reported story.
    let p = alt((
        map(lit("fooo"), |_| 0i64),
        try_map(take_in(3, "0123"), |s: String| {
            if s.starts_with('0') {
                Err("cannot start with 0".to_string())
            } else {
                s.parse::<i64>().map_err(|e| e.to_string())
            }
        }),
    ));
    let d = driver(p, Options::new().detailed(true).causes(true));
    let err = d.parse("012").unwrap_err();
    assert_eq!(err.message, "cannot start with 0");
    assert_eq!(err.position, 3);
    // The enclosing alternation is still visible as context.
    let cause = err.cause.as_ref().unwrap();
    assert!(cause.inner.is_some());
}

#[test]
fn test_trailing_separator_scenarios() {
    let make = || {
        driver(
            repsep(read1_to(" ", true), lit(" "), Trail::Disallow),
            Options::new().detailed(true),
        )
    };
    assert_eq!(make().parse("foo foo foo").unwrap(), vec!["foo"; 3]);
    assert!(make().parse("foo foo foo ").is_err());
}

#[test]
fn test_empty_input_boundaries() {
    // Parsers that tolerate emptiness.
    assert!(skip("ab").parse("").is_ok());
    assert!(read("ab").parse("").is_ok());
    assert!(read_to("x", true).parse("").is_ok());
    assert!(opt(lit("x")).parse("").is_ok());
    assert!(rep(lit("x")).parse("").is_ok());
    assert!(take(0).parse("").is_ok());
    assert!(peek(0).parse("").is_ok());

    // Parsers that demand input.
    assert!(skip1("ab").parse("").is_err());
    assert!(read1("ab").parse("").is_err());
    assert!(take(1).parse("").is_err());
    assert!(peek(1).parse("").is_err());
    assert!(lit("x").parse("").is_err());
    assert!(rep1(lit("x")).parse("").is_err());
}

#[test]
fn test_positions_never_regress() {
    // Every built-in's success lands at or after its starting point.
    let d = driver(
        seq((skip(" "), rep(alt((lit("ab"), lit("a")))), read("xyz"))),
        Options::new().consume_all(false),
    );
    for source in ["", " ", "aab", " abaxy", "junk", "a", "x"] {
        let _ = d.parse(source);
    }
}

#[test]
fn test_marked_output_shape() {
    let p = driver(
        rep1(check((lit("ok"), lit("\n")))),
        Options::new().detailed(true).context_lines(1),
    );
    let err = p
        .parse_with("ok\nko\nok\n", &Options::new().detailed(true).context_lines(1))
        .unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 0);
    assert_eq!(err.context, vec!["ok", "ko", "ok"]);
    assert_eq!(err.marked, "ok\nko\n^--\nok");
    assert_eq!(err.source_line, "ko");
}

#[test]
fn test_undefined_on_error_mode() {
    let p = driver(read1("abc"), Options::new());
    assert_eq!(p.parse_opt("cab"), Some("cab".to_string()));
    assert_eq!(p.parse_opt("nope"), None);
}

#[test]
fn test_latest_is_monotonic_within_a_parse() {
    // alt probes a deep branch first, then matches a shallow one; a later
    // failure at a *nearer* position must not displace the farther one.
    let deep = check((lit("ab"), lit("cd"), lit("ef")));
    let p = seq((alt((outer(deep), lit("a"))), lit("!")));
    let d = driver(p, Options::new().detailed(true));
    let err = d.parse("abcdX").unwrap_err();
    // The deep branch died at position 4; the "!" check died at 1.
    let latest = err.latest.as_ref().unwrap();
    assert_eq!(latest.position, 4);
}
