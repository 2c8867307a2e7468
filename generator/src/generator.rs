use rand::Rng;

use crate::environment::{Environment, Scope};
use crate::grammar::Datum;
use crate::symbol::{Symbol, SymbolTable};

/// Everything a generator mutates: the one random stream, interned names and
/// the scope frames of the program being built.
pub struct GeneratorState<R: Rng> {
    pub rng: R,
    pub symbols: SymbolTable,
    pub environment: Environment,
}

impl<R: Rng> GeneratorState<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            symbols: SymbolTable::new(),
            environment: Environment::new(),
        }
    }
}

pub trait SymbolGenerator {
    /// Draw one candidate identifier. Whether it is fresh for a given scope
    /// is decided by the caller.
    fn generate<R: Rng>(&self, state: &mut GeneratorState<R>) -> Symbol;
}

/// Names of one lowercase letter followed by an unpadded number in 0..=999.
#[derive(Debug, Default, Copy, Clone)]
pub struct LetterNumberGenerator;

impl SymbolGenerator for LetterNumberGenerator {
    fn generate<R: Rng>(&self, state: &mut GeneratorState<R>) -> Symbol {
        let letter = char::from(b'a' + state.rng.random_range(0..26u8));
        let number: u32 = state.rng.random_range(0..=999);
        state.symbols.to_sym(&format!("{letter}{number}"))
    }
}

pub trait DatumGenerator {
    /// Produce a leaf whose variable references, if any, are bound in `scope`.
    fn generate<R: Rng>(&self, scope: Scope, state: &mut GeneratorState<R>) -> Datum;
}

/// Splits a single uniform draw into variable, integer and boolean bands.
#[derive(Debug, Clone)]
pub struct LeafGenerator {
    pub p_variable: f64,
    pub integer_threshold: f64,
    pub p_true: f64,
    pub min_integer: i64,
    pub max_integer: i64,
    pub uniform_variables: bool,
}

impl LeafGenerator {
    fn variable<R: Rng>(&self, scope: Scope, state: &mut GeneratorState<R>) -> Option<Symbol> {
        let env = &state.environment;
        if self.uniform_variables {
            let n = state.rng.random_range(0..env.len(scope));
            env.nth(scope, n)
        } else {
            env.first(scope)
        }
    }
}

impl DatumGenerator for LeafGenerator {
    fn generate<R: Rng>(&self, scope: Scope, state: &mut GeneratorState<R>) -> Datum {
        let r: f64 = state.rng.random();
        // An empty scope falls through to the integer test with the same draw.
        if r < self.p_variable && !scope.is_empty() {
            if let Some(sym) = self.variable(scope, state) {
                return Datum::Variable(sym);
            }
        }
        if r < self.integer_threshold {
            Datum::Int(state.rng.random_range(self.min_integer..=self.max_integer))
        } else {
            Datum::Bool(state.rng.random::<f64>() < self.p_true)
        }
    }
}
