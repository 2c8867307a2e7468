use log::{debug, trace};
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ProgramConfig;
use crate::emit::{Emit, Emitter};
use crate::environment::{Environment, Scope};
use crate::error::GenerateError;
use crate::generator::{
    DatumGenerator, GeneratorState, LeafGenerator, LetterNumberGenerator, SymbolGenerator,
};
use crate::grammar::Form;
use crate::symbol::Symbol;

/// Builds whole programs by randomized recursive descent over the grammar.
///
/// Output is streamed into an [`Emitter`] in the same order the random
/// stream is consumed, so a seeded generator always produces the same text.
pub struct ProgramGenerator<R: Rng, S: SymbolGenerator = LetterNumberGenerator> {
    config: ProgramConfig,
    forms: WeightedIndex<u32>,
    symbol_generator: S,
    leaf_generator: LeafGenerator,
    state: GeneratorState<R>,
}

impl ProgramGenerator<StdRng> {
    /// Seed from `config.seed`, falling back to OS entropy.
    pub fn from_config(config: ProgramConfig) -> Result<Self, GenerateError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> ProgramGenerator<R> {
    pub fn new(config: ProgramConfig, rng: R) -> Result<Self, GenerateError> {
        Self::with_symbols(config, rng, LetterNumberGenerator)
    }
}

impl<R: Rng, S: SymbolGenerator> ProgramGenerator<R, S> {
    pub fn with_symbols(
        config: ProgramConfig,
        rng: R,
        symbol_generator: S,
    ) -> Result<Self, GenerateError> {
        config.validate()?;
        let forms = WeightedIndex::new(Form::ALL.map(|f| config.weights.get(f)))
            .map_err(|e| GenerateError::InvalidConfig(format!("form weights: {e}")))?;
        let leaf_generator = LeafGenerator {
            p_variable: config.p_variable,
            integer_threshold: config.integer_threshold(),
            p_true: config.p_true,
            min_integer: config.min_integer,
            max_integer: config.max_integer,
            uniform_variables: config.uniform_variables,
        };
        Ok(Self {
            config,
            forms,
            symbol_generator,
            leaf_generator,
            state: GeneratorState::new(rng),
        })
    }

    /// Generate one program, starting at depth 0 with nothing bound.
    pub fn generate(&mut self) -> Result<String, GenerateError> {
        self.state.environment = Environment::new();
        let mut e = Emitter::new();
        self.produce(0, Scope::EMPTY, &mut e)?;
        debug!(
            "generated program of {} bytes using {} scope frames",
            e.len(),
            self.state.environment.frame_count()
        );
        Ok(e.emit())
    }

    fn produce(&mut self, depth: usize, scope: Scope, e: &mut Emitter) -> Result<(), GenerateError> {
        if depth > self.config.max_depth {
            self.leaf(scope, e);
            return Ok(());
        }

        let form = Form::from_index(self.state.rng.sample(&self.forms));
        match form {
            Form::If => {
                e.open(form.keyword());
                for _ in 0..3 {
                    e.space();
                    self.produce(depth + 1, scope, e)?;
                }
                e.close();
            }
            Form::Begin => {
                let n = self
                    .state
                    .rng
                    .random_range(self.config.min_sequence..=self.config.max_sequence);
                e.open(form.keyword());
                for _ in 0..n {
                    e.space();
                    self.produce(depth + 1, scope, e)?;
                }
                e.close();
            }
            Form::Let | Form::Letrec => self.produce_binding(form, depth, scope, e)?,
        }
        Ok(())
    }

    /// `let` and `letrec` share one shape: every initializer is drawn against
    /// the enclosing scope, and only the body sees the new names.
    fn produce_binding(
        &mut self,
        form: Form,
        depth: usize,
        scope: Scope,
        e: &mut Emitter,
    ) -> Result<(), GenerateError> {
        let size = self
            .state
            .rng
            .random_range(self.config.min_bindings..=self.config.max_bindings);

        e.open(form.keyword());
        e.emit_inline(" (");
        let mut names: Vec<Symbol> = Vec::with_capacity(size);
        let mut attempts = 0;
        while names.len() < size {
            if attempts == self.config.max_name_attempts {
                return Err(GenerateError::NamesExhausted { attempts });
            }
            attempts += 1;

            let name = self.symbol_generator.generate(&mut self.state);
            if self.state.environment.contains(scope, name) || names.contains(&name) {
                trace!("rejected {} as already bound", self.state.symbols.from_sym(name));
                continue;
            }

            if !names.is_empty() {
                e.space();
            }
            e.emit_inline("[");
            e.emit_inline(self.state.symbols.from_sym(name));
            e.emit_inline(" (quote ");
            self.leaf(scope, e);
            e.emit_inline(")]");
            names.push(name);
        }
        e.emit_inline(")");

        let body_scope = self.state.environment.extend(scope, names);
        e.space();
        self.produce(depth + 1, body_scope, e)?;
        e.close();
        Ok(())
    }

    fn leaf(&mut self, scope: Scope, e: &mut Emitter) {
        let datum = self.leaf_generator.generate(scope, &mut self.state);
        datum.emit(e, &self.state.symbols);
    }
}
