//! A small reader for generated programs, used to check their structure.

#![allow(dead_code)]

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(String),
    /// `bracket` is true for `[...]`.
    List { bracket: bool, items: Vec<Node> },
}

impl Node {
    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Atom(_))
    }
}

fn tokenize(src: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in src.chars() {
        match c {
            '(' | ')' | '[' | ']' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Read every top-level form in `src`.
pub fn read_all(src: &str) -> Result<Vec<Node>, String> {
    let tokens = tokenize(src);
    let mut pos = 0;
    let mut nodes = Vec::new();
    while pos < tokens.len() {
        nodes.push(read(&tokens, &mut pos)?);
    }
    Ok(nodes)
}

fn read(tokens: &[String], pos: &mut usize) -> Result<Node, String> {
    let tok = tokens.get(*pos).ok_or("unexpected end of input")?.clone();
    *pos += 1;
    let close = match tok.as_str() {
        "(" => ")",
        "[" => "]",
        ")" | "]" => return Err(format!("unbalanced '{tok}' at token {}", *pos - 1)),
        _ => return Ok(Node::Atom(tok)),
    };
    let mut items = Vec::new();
    loop {
        match tokens.get(*pos).map(String::as_str) {
            None => return Err(format!("missing '{close}'")),
            Some(t) if t == close => {
                *pos += 1;
                return Ok(Node::List {
                    bracket: tok == "[",
                    items,
                });
            }
            Some(")") | Some("]") => return Err(format!("mismatched close, wanted '{close}'")),
            Some(_) => items.push(read(tokens, pos)?),
        }
    }
}

#[derive(Debug, Default)]
pub struct Stats {
    /// Deepest chain of nested compound forms.
    pub nesting: usize,
    pub variables: usize,
    pub integers: usize,
    pub booleans: usize,
    pub binding_groups: usize,
}

/// Check a program's arity, scoping and literal invariants.
pub fn check(program: &Node) -> Result<Stats, String> {
    let mut stats = Stats::default();
    check_expr(program, &[], 1, &mut stats)?;
    Ok(stats)
}

fn check_datum(atom: &str, scope: &[String], stats: &mut Stats) -> Result<(), String> {
    if atom == "#t" || atom == "#f" {
        stats.booleans += 1;
    } else if let Ok(i) = atom.parse::<i64>() {
        if !(-100..=100).contains(&i) {
            return Err(format!("integer {i} out of range"));
        }
        stats.integers += 1;
    } else if scope.iter().any(|s| s == atom) {
        stats.variables += 1;
    } else {
        return Err(format!("{atom} referenced outside its scope {scope:?}"));
    }
    Ok(())
}

fn check_expr(node: &Node, scope: &[String], level: usize, stats: &mut Stats) -> Result<(), String> {
    let items = match node {
        Node::Atom(a) => return check_datum(a, scope, stats),
        Node::List { bracket: true, .. } => return Err("bracket used as an expression".into()),
        Node::List { items, .. } => items,
    };
    stats.nesting = stats.nesting.max(level);
    let keyword = match items.first() {
        Some(Node::Atom(k)) => k.as_str(),
        other => return Err(format!("form without keyword: {other:?}")),
    };
    let args = &items[1..];
    match keyword {
        "if" if args.len() == 3 => {}
        "begin" if (2..=4).contains(&args.len()) => {}
        "let" | "letrec" if args.len() == 2 => {
            let mut extended = scope.to_vec();
            let bindings = match &args[0] {
                Node::List {
                    bracket: false,
                    items,
                } if (2..=4).contains(&items.len()) => items,
                other => return Err(format!("bad binding list {other:?}")),
            };
            let mut group = HashSet::new();
            for b in bindings {
                let (name, init) = match b {
                    Node::List {
                        bracket: true,
                        items,
                    } if items.len() == 2 => (&items[0], &items[1]),
                    other => return Err(format!("bad binding {other:?}")),
                };
                let name = match name {
                    Node::Atom(n) => n.clone(),
                    other => return Err(format!("bad binding name {other:?}")),
                };
                if scope.contains(&name) {
                    return Err(format!("{name} shadows an enclosing binding"));
                }
                if !group.insert(name.clone()) {
                    return Err(format!("{name} bound twice in one group"));
                }
                match init {
                    Node::List {
                        bracket: false,
                        items,
                    } if items.len() == 2
                        && items[0] == Node::Atom("quote".into())
                        && items[1].is_atom() =>
                    {
                        if let Node::Atom(d) = &items[1] {
                            check_datum(d, scope, stats)?;
                        }
                    }
                    other => return Err(format!("initializer is not a quoted datum: {other:?}")),
                }
                extended.push(name);
            }
            stats.binding_groups += 1;
            return check_expr(&args[1], &extended, level + 1, stats);
        }
        _ => return Err(format!("bad form '{keyword}' with {} arguments", args.len())),
    }
    for a in args {
        check_expr(a, scope, level + 1, stats)?;
    }
    Ok(())
}
