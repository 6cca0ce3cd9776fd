mod loader;

use std::collections::HashMap;
use std::fmt;

use crate::error::EcgError;

pub use loader::{load_builtin_v1, load_heads_tsv, merge_specs, parse_heads_tsv};

pub const BUILTIN_VERSION: &str = "v1";

/// What a head's output vector means. Survival heads additionally carry the
/// number of days their curve spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    Categorical,
    Continuous,
    SurvivalCurve { days_window: u32 },
}

impl HeadKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Continuous => "continuous",
            Self::SurvivalCurve { .. } => "survival_curve",
        }
    }

    /// Resolves a textual kind tag. `days_window` is required for
    /// `survival_curve` and rejected for every other kind.
    pub fn parse(name: &str, tag: &str, days_window: Option<u32>) -> Result<Self, EcgError> {
        let kind = match (tag, days_window) {
            ("categorical", None) => Self::Categorical,
            ("continuous", None) => Self::Continuous,
            ("survival_curve", Some(days_window)) => Self::SurvivalCurve { days_window },
            ("survival_curve", None) => {
                return Err(EcgError::InvalidHeadSpec {
                    name: name.to_string(),
                    reason: "survival_curve head requires days_window".to_string(),
                });
            }
            ("categorical" | "continuous", Some(_)) => {
                return Err(EcgError::InvalidHeadSpec {
                    name: name.to_string(),
                    reason: format!("days_window is only valid for survival_curve, not {}", tag),
                });
            }
            (other, _) => return Err(EcgError::UnknownHeadKind(other.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for HeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputHeadSpec {
    pub name: String,
    pub kind: HeadKind,
    pub width: usize,
}

impl OutputHeadSpec {
    pub fn categorical(name: &str, width: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: HeadKind::Categorical,
            width,
        }
    }

    pub fn continuous(name: &str, width: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: HeadKind::Continuous,
            width,
        }
    }

    pub fn survival_curve(name: &str, width: usize, days_window: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: HeadKind::SurvivalCurve { days_window },
            width,
        }
    }

    /// Name the model reports for this head's output tensor.
    pub fn output_name(&self) -> String {
        format!("output_{}_{}", self.name, self.kind.tag())
    }

    pub fn is_survival_curve(&self) -> bool {
        matches!(self.kind, HeadKind::SurvivalCurve { .. })
    }

    fn validate(&self) -> Result<(), EcgError> {
        if self.name.is_empty() {
            return Err(EcgError::InvalidHeadSpec {
                name: self.name.clone(),
                reason: "empty name".to_string(),
            });
        }
        if self.width == 0 {
            return Err(EcgError::shape(
                format!("head {}", self.name),
                "width > 0",
                self.width,
            ));
        }
        if let HeadKind::SurvivalCurve { days_window } = self.kind {
            // hazard bins + auxiliary bins, one of each per interval
            if self.width % 2 != 0 {
                return Err(EcgError::shape(
                    format!("survival head {}", self.name),
                    "even width",
                    self.width,
                ));
            }
            if days_window == 0 {
                return Err(EcgError::InvalidHeadSpec {
                    name: self.name.clone(),
                    reason: "days_window must be positive".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Immutable lookup from head name (or reported output name) to its spec.
#[derive(Debug, Clone)]
pub struct HeadRegistry {
    specs: Vec<OutputHeadSpec>,
    by_name: HashMap<String, usize>,
    by_output: HashMap<String, usize>,
}

impl HeadRegistry {
    pub fn build(specs: Vec<OutputHeadSpec>) -> Result<Self, EcgError> {
        let mut by_name = HashMap::with_capacity(specs.len());
        let mut by_output = HashMap::with_capacity(specs.len());
        let mut survival = Vec::new();

        for (i, spec) in specs.iter().enumerate() {
            spec.validate()?;
            if by_name.insert(spec.name.clone(), i).is_some() {
                return Err(EcgError::DuplicateHeadName(spec.name.clone()));
            }
            if let Some(prev) = by_output.insert(spec.output_name(), i) {
                return Err(output_collision(spec, &specs[prev]));
            }
            if spec.is_survival_curve() {
                survival.push(spec.name.clone());
            }
        }
        // An output name may not shadow a different head's plain name.
        for (i, spec) in specs.iter().enumerate() {
            if let Some(&j) = by_name.get(&spec.output_name()) {
                if i != j {
                    return Err(output_collision(spec, &specs[j]));
                }
            }
        }
        if survival.len() > 1 {
            return Err(EcgError::AmbiguousSurvivalHeads(survival));
        }

        Ok(Self {
            specs,
            by_name,
            by_output,
        })
    }

    pub fn get(&self, name: &str) -> Option<&OutputHeadSpec> {
        self.by_name
            .get(name)
            .or_else(|| self.by_output.get(name))
            .map(|&i| &self.specs[i])
    }

    pub fn survival_head(&self) -> Option<&OutputHeadSpec> {
        self.specs.iter().find(|s| s.is_survival_curve())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputHeadSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }
}

fn output_collision(spec: &OutputHeadSpec, other: &OutputHeadSpec) -> EcgError {
    EcgError::InvalidHeadSpec {
        name: spec.name.clone(),
        reason: format!(
            "output name '{}' collides with head '{}'",
            spec.output_name(),
            other.name
        ),
    }
}

pub fn builtin_registry() -> anyhow::Result<HeadRegistry> {
    let specs = load_builtin_v1()?;
    Ok(HeadRegistry::build(specs)?)
}

pub const SEX_HEAD: &str = "sex_from_wide";
pub const AGE_HEAD: &str = "age_from_wide_csv";
pub const AF_IN_READ_HEAD: &str = "af_in_read";
