use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::error::EcgError;

pub const DEFAULT_ROOT_GROUP: &str = "ukb_ecg_rest";
pub const DEFAULT_SAMPLES: usize = 5000;
const INSTANCE: &str = "instance_0";

const REST_12_LEADS: [&str; 12] = [
    "strip_I", "strip_II", "strip_III", "strip_V1", "strip_V2", "strip_V3", "strip_V4",
    "strip_V5", "strip_V6", "strip_aVF", "strip_aVL", "strip_aVR",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSlot {
    pub name: String,
    pub column: usize,
}

/// Which leads to read, where they live in the container and which tensor
/// column each one lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadLayout {
    pub root_group: String,
    pub samples: usize,
    pub leads: Vec<LeadSlot>,
}

impl LeadLayout {
    /// Standard 12-lead resting layout, 5000 samples per lead.
    pub fn rest_12() -> Self {
        let leads = REST_12_LEADS
            .iter()
            .enumerate()
            .map(|(column, name)| LeadSlot {
                name: (*name).to_string(),
                column,
            })
            .collect();
        Self {
            root_group: DEFAULT_ROOT_GROUP.to_string(),
            samples: DEFAULT_SAMPLES,
            leads,
        }
    }

    pub fn new(root_group: &str, samples: usize, leads: Vec<LeadSlot>) -> Result<Self, EcgError> {
        let layout = Self {
            root_group: root_group.to_string(),
            samples,
            leads,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    pub fn dataset_path(&self, lead: &str) -> String {
        format!("{}/{}/{}", self.root_group, lead, INSTANCE)
    }

    /// Column indices must form a permutation of `0..leads` and names must be unique.
    pub fn validate(&self) -> Result<(), EcgError> {
        if self.leads.is_empty() {
            return Err(EcgError::InvalidLayout("no leads configured".to_string()));
        }
        if self.samples == 0 {
            return Err(EcgError::InvalidLayout("sample count must be positive".to_string()));
        }
        let n = self.leads.len();
        let mut names = HashSet::new();
        let mut seen = vec![false; n];
        for slot in &self.leads {
            if !names.insert(slot.name.as_str()) {
                return Err(EcgError::InvalidLayout(format!(
                    "lead '{}' listed twice",
                    slot.name
                )));
            }
            if slot.column >= n {
                return Err(EcgError::InvalidLayout(format!(
                    "lead '{}' column {} out of range for {} leads",
                    slot.name, slot.column, n
                )));
            }
            if seen[slot.column] {
                return Err(EcgError::InvalidLayout(format!(
                    "column {} assigned to more than one lead",
                    slot.column
                )));
            }
            seen[slot.column] = true;
        }
        Ok(())
    }
}

impl Default for LeadLayout {
    fn default() -> Self {
        Self::rest_12()
    }
}

pub fn load_layout_tsv(path: &Path) -> Result<LeadLayout> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lead layout TSV {}", path.display()))?;
    parse_layout_tsv(&content, &path.display().to_string())
}

/// Parses `lead<TAB>column` rows. Optional `#!samples=N` and `#!root=NAME`
/// directives override the default sample count and root group.
pub fn parse_layout_tsv(content: &str, source: &str) -> Result<LeadLayout> {
    let mut root_group = DEFAULT_ROOT_GROUP.to_string();
    let mut samples = DEFAULT_SAMPLES;
    let mut leads = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if let Some(directive) = trimmed.strip_prefix("#!") {
            let (key, value) = directive
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("{}:{} malformed directive", source, line_no))?;
            match key.trim() {
                "samples" => {
                    samples = value.trim().parse().with_context(|| {
                        format!("{}:{} invalid sample count", source, line_no)
                    })?;
                }
                "root" => root_group = value.trim().to_string(),
                other => bail!("{}:{} unknown directive '{}'", source, line_no, other),
            }
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').collect();
        if parts.len() != 2 {
            bail!("{}:{} malformed TSV (expected 2 columns)", source, line_no);
        }
        let name = parts[0].trim();
        if name.is_empty() {
            bail!("{}:{} empty lead name", source, line_no);
        }
        let column: usize = parts[1]
            .trim()
            .parse()
            .with_context(|| format!("{}:{} invalid column index", source, line_no))?;
        leads.push(LeadSlot {
            name: name.to_string(),
            column,
        });
    }

    let layout = LeadLayout::new(&root_group, samples, leads)
        .with_context(|| format!("{} does not describe a usable lead layout", source))?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_12_is_valid() {
        let layout = LeadLayout::rest_12();
        assert_eq!(layout.lead_count(), 12);
        assert!(layout.validate().is_ok());
        assert_eq!(layout.dataset_path("strip_V1"), "ukb_ecg_rest/strip_V1/instance_0");
    }

    #[test]
    fn duplicate_column_rejected() {
        let leads = vec![
            LeadSlot {
                name: "a".to_string(),
                column: 0,
            },
            LeadSlot {
                name: "b".to_string(),
                column: 0,
            },
        ];
        assert!(matches!(
            LeadLayout::new("root", 4, leads),
            Err(EcgError::InvalidLayout(_))
        ));
    }

    #[test]
    fn tsv_with_directives() {
        let layout = parse_layout_tsv("#!samples=8\n#!root=ecg\nx\t1\ny\t0\n", "test").unwrap();
        assert_eq!(layout.samples, 8);
        assert_eq!(layout.root_group, "ecg");
        assert_eq!(layout.leads[0].column, 1);
    }
}
