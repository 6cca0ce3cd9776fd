use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::heads::{HeadKind, OutputHeadSpec};

pub fn load_builtin_v1() -> Result<Vec<OutputHeadSpec>> {
    let content = include_str!("../../assets/heads/ecg2af_v1.tsv");
    parse_heads_tsv(content, "built-in v1")
}

pub fn load_heads_tsv(path: &Path) -> Result<Vec<OutputHeadSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read head TSV {}", path.display()))?;
    parse_heads_tsv(&content, &path.display().to_string())
}

/// User heads replace built-in heads of the same name in place; new names are appended.
pub fn merge_specs(mut builtin: Vec<OutputHeadSpec>, user: Vec<OutputHeadSpec>) -> Vec<OutputHeadSpec> {
    if user.is_empty() {
        return builtin;
    }
    let mut order = Vec::with_capacity(user.len());
    let mut user_map: HashMap<String, OutputHeadSpec> = HashMap::new();
    for spec in user {
        if !user_map.contains_key(&spec.name) {
            order.push(spec.name.clone());
        }
        user_map.insert(spec.name.clone(), spec);
    }

    let mut merged = Vec::with_capacity(builtin.len() + user_map.len());
    for spec in builtin.drain(..) {
        if let Some(user_spec) = user_map.remove(&spec.name) {
            merged.push(user_spec);
        } else {
            merged.push(spec);
        }
    }
    for name in order {
        if let Some(spec) = user_map.remove(&name) {
            merged.push(spec);
        }
    }
    merged
}

pub fn parse_heads_tsv(content: &str, source: &str) -> Result<Vec<OutputHeadSpec>> {
    let mut specs = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            bail!("{}:{} malformed TSV (expected 3 or 4 columns)", source, line_no);
        }
        let name = parts[0];
        if name.is_empty() || parts[1].is_empty() || parts[2].is_empty() {
            bail!("{}:{} empty field in TSV", source, line_no);
        }
        let width: usize = parts[2]
            .parse()
            .with_context(|| format!("{}:{} invalid width '{}'", source, line_no, parts[2]))?;
        let days_window = match parts.get(3) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<u32>().with_context(|| {
                format!("{}:{} invalid days_window '{}'", source, line_no, raw)
            })?),
            _ => None,
        };
        let kind = HeadKind::parse(name, parts[1], days_window)
            .with_context(|| format!("{}:{} invalid head kind", source, line_no))?;

        specs.push(OutputHeadSpec {
            name: name.to_string(),
            kind,
            width,
        });
    }

    Ok(specs)
}
