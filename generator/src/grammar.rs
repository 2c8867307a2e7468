use crate::emit::{Emit, Emitter};
use crate::symbol::{Symbol, SymbolTable};

/// The compound forms the production engine can choose between.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Form {
    If,
    Begin,
    Let,
    Letrec,
}

impl Form {
    /// Selection order; the index of a form here is its index in the
    /// weighted choice.
    pub const ALL: [Form; 4] = [Form::If, Form::Begin, Form::Let, Form::Letrec];

    pub fn keyword(self) -> &'static str {
        match self {
            Form::If => "if",
            Form::Begin => "begin",
            Form::Let => "let",
            Form::Letrec => "letrec",
        }
    }

    /// Map a drawn index back to its form. Any index outside the grammar
    /// means the selection itself is broken.
    pub fn from_index(i: usize) -> Form {
        match i {
            0 => Form::If,
            1 => Form::Begin,
            2 => Form::Let,
            3 => Form::Letrec,
            _ => unreachable!("grammar has no alternative at index {i}"),
        }
    }
}

/// A terminal value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Datum {
    Variable(Symbol),
    Int(i64),
    Bool(bool),
}

impl Emit for Datum {
    fn emit(&self, e: &mut Emitter, st: &SymbolTable) {
        match self {
            Datum::Variable(sym) => e.emit_inline(st.from_sym(*sym)),
            Datum::Int(i) => e.emit_inline(&i.to_string()),
            Datum::Bool(true) => e.emit_inline("#t"),
            Datum::Bool(false) => e.emit_inline("#f"),
        }
    }
}
