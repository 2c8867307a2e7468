use crate::symbol::SymbolTable;

/// Accumulates generated source text.
#[derive(Default)]
pub struct Emitter {
    output: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_inline(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Start `s` on a fresh line.
    pub fn emit_block(&mut self, s: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(s);
    }

    pub fn open(&mut self, keyword: &str) {
        self.output.push('(');
        self.output.push_str(keyword);
    }

    pub fn close(&mut self) {
        self.output.push(')');
    }

    pub fn space(&mut self) {
        self.output.push(' ');
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn emit(self) -> String {
        self.output
    }
}

pub trait Emit {
    fn emit(&self, e: &mut Emitter, st: &SymbolTable);
}
