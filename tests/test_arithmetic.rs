//! An arithmetic expression grammar, the classic recursive-descent
//! workout: precedence by layering, parentheses by recursion.

use sprig::prelude::*;

fn arithmetic() -> impl Parser<Output = i64> {
    let ws = || skip(" \t");
    let expr = lazy::<i64>();

    let number = try_map(outer(check((opt(lit("-")), read1("0123456789")))), |s| {
        s.parse::<i64>().map_err(|e| e.to_string())
    });

    let primary = alt((
        number,
        bracket(check((lit("("), ws())), expr.clone(), check((ws(), lit(")")))),
    ));

    let product = map(
        seq((
            primary.clone(),
            rep(map(
                seq((ws(), lits(&["*", "/"]), ws(), primary.clone())),
                |(_, op, _, rhs)| (op, rhs),
            )),
        )),
        |(first, rest): (i64, Vec<(String, i64)>)| {
            rest.into_iter().fold(first, |acc, (op, rhs)| {
                if op == "*" {
                    acc * rhs
                } else {
                    acc / rhs
                }
            })
        },
    );

    let sum = map(
        seq((
            product.clone(),
            rep(map(
                seq((ws(), lits(&["+", "-"]), ws(), product.clone())),
                |(_, op, _, rhs)| (op, rhs),
            )),
        )),
        |(first, rest): (i64, Vec<(String, i64)>)| {
            rest.into_iter().fold(first, |acc, (op, rhs)| {
                if op == "+" {
                    acc + rhs
                } else {
                    acc - rhs
                }
            })
        },
    );

    expr.define(sum);
    expr
}

fn eval(source: &str) -> Result<i64, sprig::ParseError> {
    driver(arithmetic(), Options::new().trim(true).detailed(true)).parse(source)
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2 + 3 * 4").unwrap(), 14);
    assert_eq!(eval("2 * 3 + 4").unwrap(), 10);
    assert_eq!(eval("20 - 6 / 2").unwrap(), 17);
}

#[test]
fn test_parentheses() {
    assert_eq!(eval("(2 + 3) * 4").unwrap(), 20);
    assert_eq!(eval("((7))").unwrap(), 7);
    assert_eq!(eval("2 * (3 + (4 - 1))").unwrap(), 12);
}

#[test]
fn test_whitespace_and_negatives() {
    assert_eq!(eval("  1+1  ").unwrap(), 2);
    assert_eq!(eval("-3 * -4").unwrap(), 12);
    assert_eq!(eval("10 - -5").unwrap(), 15);
}

#[test]
fn test_left_associativity() {
    assert_eq!(eval("100 / 10 / 2").unwrap(), 5);
    assert_eq!(eval("10 - 4 - 3").unwrap(), 3);
}

#[test]
fn test_rejects() {
    assert!(eval("").is_err());
    assert!(eval("2 +").is_err());
    assert!(eval("(2 + 3").is_err());
    assert!(eval("2 ** 3").is_err());

    // The reported error is the consume-all check, but the farthest
    // failure, inside the parenthesized group, rides along.
    let err = eval("2 + (3 *)").unwrap_err();
    let latest = err.latest.as_ref().unwrap();
    assert!(latest.position >= 7, "latest position {}", latest.position);
}
