use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::grammar::Form;

/// Relative weights of the compound forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormWeights {
    #[serde(rename = "if")]
    pub if_: u32,
    pub begin: u32,
    #[serde(rename = "let")]
    pub let_: u32,
    pub letrec: u32,
}

impl FormWeights {
    pub fn get(&self, form: Form) -> u32 {
        match form {
            Form::If => self.if_,
            Form::Begin => self.begin,
            Form::Let => self.let_,
            Form::Letrec => self.letrec,
        }
    }

    /// Weight everything but `form` at zero.
    pub fn only(form: Form) -> Self {
        let mut w = Self {
            if_: 0,
            begin: 0,
            let_: 0,
            letrec: 0,
        };
        match form {
            Form::If => w.if_ = 1,
            Form::Begin => w.begin = 1,
            Form::Let => w.let_ = 1,
            Form::Letrec => w.letrec = 1,
        }
        w
    }
}

impl Default for FormWeights {
    fn default() -> Self {
        Self {
            if_: 1,
            begin: 1,
            let_: 1,
            letrec: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Nesting level past which only leaves are produced.
    pub max_depth: usize,
    /// Seed for the random stream. Without one, the OS supplies entropy.
    pub seed: Option<u64>,
    pub min_sequence: usize,
    pub max_sequence: usize,
    pub min_bindings: usize,
    pub max_bindings: usize,
    pub min_integer: i64,
    pub max_integer: i64,
    /// A leaf draw below this is a variable reference (when any are bound).
    pub p_variable: f64,
    /// Width of the integer band that follows the variable band.
    pub p_integer: f64,
    pub p_true: f64,
    /// Pick referenced variables uniformly instead of taking the first bound name.
    pub uniform_variables: bool,
    pub max_name_attempts: usize,
    pub weights: FormWeights,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            seed: None,
            min_sequence: 2,
            max_sequence: 4,
            min_bindings: 2,
            max_bindings: 4,
            min_integer: -100,
            max_integer: 100,
            p_variable: 0.3,
            p_integer: 0.3,
            p_true: 0.5,
            uniform_variables: false,
            max_name_attempts: 10_000,
            weights: FormWeights::default(),
        }
    }
}

impl ProgramConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Upper threshold of the integer band.
    pub fn integer_threshold(&self) -> f64 {
        self.p_variable + self.p_integer
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |msg: String| Err(GenerateError::InvalidConfig(msg));

        if self.min_sequence == 0 || self.min_sequence > self.max_sequence {
            return invalid(format!(
                "sequence length range {}..={} must be non-empty and start at 1 or more",
                self.min_sequence, self.max_sequence
            ));
        }
        if self.min_bindings == 0 || self.min_bindings > self.max_bindings {
            return invalid(format!(
                "binding group range {}..={} must be non-empty and start at 1 or more",
                self.min_bindings, self.max_bindings
            ));
        }
        if self.min_integer > self.max_integer {
            return invalid(format!(
                "integer range {}..={} is empty",
                self.min_integer, self.max_integer
            ));
        }
        for (name, p) in [
            ("p_variable", self.p_variable),
            ("p_integer", self.p_integer),
            ("p_true", self.p_true),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} = {p} is not a probability"));
            }
        }
        if Form::ALL.iter().all(|f| self.weights.get(*f) == 0) {
            return invalid("every form weight is zero".to_string());
        }
        if self.max_name_attempts == 0 {
            return invalid("max_name_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl FromStr for ProgramConfig {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ProgramConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = ProgramConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.max_depth, 10);
        assert_eq!(c.integer_threshold(), 0.6);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: ProgramConfig = "max_depth = 3\nseed = 7\n[weights]\nletrec = 0\n"
            .parse()
            .unwrap();
        assert_eq!(c.max_depth, 3);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.max_bindings, 4);
        assert_eq!(c.weights.letrec, 0);
        assert_eq!(c.weights.if_, 1);
    }

    #[test]
    fn empty_ranges_are_rejected() {
        let c = ProgramConfig {
            min_bindings: 3,
            max_bindings: 2,
            ..ProgramConfig::default()
        };
        assert!(matches!(c.validate(), Err(GenerateError::InvalidConfig(_))));

        let c = ProgramConfig {
            min_integer: 1,
            max_integer: 0,
            ..ProgramConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_weights_are_rejected() {
        let mut c = ProgramConfig::default();
        c.weights = FormWeights {
            if_: 0,
            begin: 0,
            let_: 0,
            letrec: 0,
        };
        assert!(c.validate().is_err());
        c.weights = FormWeights::only(Form::Begin);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn probabilities_are_bounded() {
        let c = ProgramConfig {
            p_true: 1.5,
            ..ProgramConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = "max_depth = \"deep\"".parse::<ProgramConfig>().unwrap_err();
        assert!(matches!(err, GenerateError::Toml(_)));
    }

    #[test]
    fn config_survives_serialization() {
        let c = ProgramConfig {
            seed: Some(99),
            ..ProgramConfig::default()
        };
        let text = toml::to_string(&c).unwrap();
        assert_eq!(text.parse::<ProgramConfig>().unwrap(), c);
    }
}
