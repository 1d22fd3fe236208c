use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::store::{GraphStore, Node};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LayoutSnapshot {
    positions: BTreeMap<String, [f32; 3]>,
}

impl LayoutSnapshot {
    pub fn capture(store: &GraphStore) -> Self {
        let positions = store
            .nodes()
            .iter()
            .map(|node| (node.id.clone(), node.pos.to_array()))
            .collect();
        Self { positions }
    }

    pub fn overlay(&self, nodes: &mut [Node]) {
        for node in nodes {
            if let Some(&[x, y, z]) = self.positions.get(&node.id) {
                node.pos = Vec3::new(x, y, z);
                node.vel = Vec3::ZERO;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn load(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable layout snapshot");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let encoded = serde_json::to_string(self).context("failed to encode layout snapshot")?;
        fs::write(path, encoded)
            .with_context(|| format!("failed to write layout snapshot to {}", path.display()))
    }
}
