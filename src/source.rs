use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::{RawLinkRow, RawNodeRow};

pub fn load_node_rows(path: &Path) -> Result<Vec<RawNodeRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read node rows from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid node rows in {}", path.display()))
}

pub fn load_link_rows(path: &Path) -> Result<Vec<RawLinkRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read link rows from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid link rows in {}", path.display()))
}

#[derive(Debug, Default)]
pub struct UpdateChecker {
    last_stamp: Option<String>,
}

impl UpdateChecker {
    pub fn observe(&mut self, stamp: &str) -> bool {
        match self.last_stamp.as_deref() {
            None => {
                self.last_stamp = Some(stamp.to_string());
                false
            }
            Some(last) if last == stamp => false,
            Some(_) => {
                self.last_stamp = Some(stamp.to_string());
                true
            }
        }
    }
}
