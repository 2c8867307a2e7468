//! Random generation of well-formed, lexically scoped Scheme programs for
//! use as fuzz input.
//!
//! ```no_run
//! let program = scheme_gen::generate_program(4).unwrap();
//! print!("{}", scheme_gen::script(&program));
//! ```

mod config;
mod emit;
mod environment;
mod error;
mod generator;
mod grammar;
mod program;
mod symbol;

pub use crate::config::{FormWeights, ProgramConfig};
pub use crate::emit::{Emit, Emitter};
pub use crate::environment::{Environment, Scope};
pub use crate::error::GenerateError;
pub use crate::generator::{
    DatumGenerator, GeneratorState, LeafGenerator, LetterNumberGenerator, SymbolGenerator,
};
pub use crate::grammar::{Datum, Form};
pub use crate::program::ProgramGenerator;
pub use crate::symbol::{Symbol, SymbolTable};

/// Line appended after every program so an interpreter reading from stdin
/// stops.
pub const TERMINATOR: &str = "(exit)";

pub fn generate_with_config(config: ProgramConfig) -> Result<String, GenerateError> {
    ProgramGenerator::from_config(config)?.generate()
}

/// Generate one program with default settings and the given depth bound.
pub fn generate_program(max_depth: usize) -> Result<String, GenerateError> {
    generate_with_config(ProgramConfig::with_max_depth(max_depth))
}

pub fn generate() -> Result<String, GenerateError> {
    generate_with_config(ProgramConfig::default())
}

/// Frame `program` as a complete script: the program, then the terminator on
/// its own line.
pub fn script(program: &str) -> String {
    let mut e = Emitter::new();
    e.emit_block(program);
    e.emit_block(TERMINATOR);
    e.emit_inline("\n");
    e.emit()
}
