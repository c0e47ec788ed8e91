//! Tree mode: named nodes, spans, and position lookup.

use sprig::prelude::*;

// expression ::= string | number | call
// call       ::= ident "(" number ("," " " number)* ")"
fn expression() -> impl Parser<Output = ()> {
    let ident = read1("abcdefghijklmnopqrstuvwxyz");
    let number = name(
        try_map(read1("0123456789"), |s| {
            s.parse::<i64>().map_err(|e| e.to_string())
        }),
        "number",
    );
    let string = name(
        bracket(lit("\""), read("abcdefghijklmnopqrstuvwxyz "), lit("\"")),
        "string",
    );
    let call = name(
        seq((
            ident,
            lit("("),
            repsep(number.clone(), lit(", "), Trail::Disallow),
            lit(")"),
        )),
        "call",
    );
    name(
        alt((
            map(string, |_| ()),
            map(number, |_| ()),
            map(call, |_| ()),
        )),
        "expression",
    )
}

fn parse_tree(source: &str) -> (Vec<()>, sprig::ParseNode) {
    let d = driver(
        repsep(expression(), lit(" "), Trail::Disallow),
        Options::new().detailed(true),
    );
    d.parse_tree(source).unwrap()
}

#[test]
fn test_named_path_at_position() {
    let (values, root) = parse_tree("\"foo\" 22 bar(69, 72)");
    assert_eq!(values.len(), 3);

    // Position 14 is inside the `69` argument of the call.
    let path = root.path_to(14, true);
    let names: Vec<&str> = path.iter().map(|n| n.name.as_deref().unwrap()).collect();
    assert_eq!(names, vec!["number", "call", "expression"]);

    let number = path[0];
    assert_eq!(number.start, 13);
    assert_eq!(number.end, 15);
    assert_eq!(number.value_as::<i64>(), Some(&69));

    let call = path[1];
    assert_eq!((call.start, call.end), (9, 20));
}

#[test]
fn test_spans_nest() {
    let (_, root) = parse_tree("\"foo\" 22 bar(69, 72)");
    fn walk(node: &sprig::ParseNode) {
        for child in &node.children {
            assert!(child.start >= node.start, "child starts before parent");
            assert!(child.end <= node.end, "child ends after parent");
            assert!(child.start <= child.end);
            walk(child);
        }
    }
    assert!(root.start <= root.end);
    walk(&root);
}

#[test]
fn test_unnamed_structural_nodes_visible_when_asked() {
    let (_, root) = parse_tree("bar(69)");
    let all = root.path_to(4, false);
    let named = root.path_to(4, true);
    // The call's sequence contributes an unnamed structural node.
    assert!(all.len() > named.len());
    assert_eq!(
        named
            .iter()
            .map(|n| n.name.as_deref().unwrap())
            .collect::<Vec<_>>(),
        vec!["number", "call", "expression"],
    );
}

#[test]
fn test_failed_branches_leave_no_nodes() {
    let (_, root) = parse_tree("22");
    // The string and call branches were tried and rejected; only the
    // number's chain may appear in the tree.
    fn collect_names<'n>(node: &'n sprig::ParseNode, out: &mut Vec<&'n str>) {
        if let Some(name) = &node.name {
            out.push(name);
        }
        for child in &node.children {
            collect_names(child, out);
        }
    }
    let mut names = Vec::new();
    collect_names(&root, &mut names);
    assert_eq!(names, vec!["expression", "number"]);
}

#[test]
fn test_values_snapshot_at_named_nodes() {
    let (_, root) = parse_tree("\"foo\" 22 bar(69, 72)");
    // 22 sits at positions 6..8.
    let path = root.path_to(6, true);
    assert_eq!(path[0].name.as_deref(), Some("number"));
    assert_eq!(path[0].value_as::<i64>(), Some(&22));
    // The enclosing expression snapshots its own (unit) value.
    assert_eq!(path[1].name.as_deref(), Some("expression"));
    assert!(path[1].value_as::<()>().is_some());
}
