use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDateTime};
use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

use crate::util::stable_triple;

use super::snapshot::LayoutSnapshot;
use super::store::{GraphStore, Link, Node, NodeMeta};

const SPAWN_EXTENT: Vec3 = Vec3::new(10.0, 6.0, 10.0);

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNodeRow {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, alias = "nodeId", alias = "node_id")]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub strength: Value,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawLinkRow {
    #[serde(default, alias = "fromId", alias = "from_node_id")]
    pub from: String,
    #[serde(default, alias = "toId", alias = "to_node_id")]
    pub to: String,
    #[serde(default, alias = "strength")]
    pub weight: Value,
}

pub fn clean_id(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-' | '_'))
        .collect()
}

pub fn parse_timestamp(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.timestamp_millis();
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|parsed| parsed.and_utc().timestamp_millis())
        .unwrap_or(0)
}

fn unit_weight(value: &Value) -> Option<f32> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| number.clamp(0.0, 1.0) as f32)
}

pub fn merge_node_rows(rows: &[RawNodeRow]) -> Vec<Node> {
    let mut order = Vec::new();
    let mut winners: HashMap<String, (Node, i64)> = HashMap::new();

    for row in rows {
        let id = clean_id(&row.id);
        if id.is_empty() {
            continue;
        }

        let stamp = parse_timestamp(&row.timestamp);
        let node = node_from_row(id, row);

        match winners.entry(node.id.clone()) {
            Entry::Occupied(mut entry) => {
                if stamp >= entry.get().1 {
                    entry.insert((node, stamp));
                }
            }
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert((node, stamp));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| winners.remove(&id))
        .map(|(node, _)| node)
        .collect()
}

fn node_from_row(id: String, row: &RawNodeRow) -> Node {
    let (jx, jy, jz) = stable_triple(&id);
    let pos = Vec3::new(
        row.x.unwrap_or(jx * SPAWN_EXTENT.x),
        row.y.unwrap_or(jy * SPAWN_EXTENT.y),
        row.z.unwrap_or(jz * SPAWN_EXTENT.z),
    );

    Node {
        id,
        label: row.label.trim().to_string(),
        strength: unit_weight(&row.strength),
        meta: NodeMeta {
            definition: row.definition.trim().to_string(),
        },
        pos,
        vel: Vec3::ZERO,
    }
}

pub fn merge_link_rows(rows: &[RawLinkRow]) -> Vec<Link> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut links = Vec::new();

    for row in rows {
        let a = clean_id(&row.from);
        let b = clean_id(&row.to);
        let Some(w) = unit_weight(&row.weight) else {
            continue;
        };
        if a.is_empty() || b.is_empty() || a == b {
            continue;
        }

        if seen.insert((a.clone(), b.clone())) {
            links.push(Link {
                a: a.clone(),
                b: b.clone(),
                w,
            });
        }
        if seen.insert((b.clone(), a.clone())) {
            links.push(Link { a: b, b: a, w });
        }
    }

    links
}

pub fn ingest(
    store: &mut GraphStore,
    node_rows: &[RawNodeRow],
    link_rows: &[RawLinkRow],
    saved: &LayoutSnapshot,
) {
    let mut nodes = merge_node_rows(node_rows);
    saved.overlay(&mut nodes);
    store.replace_nodes(nodes);
    store.replace_links(merge_link_rows(link_rows));
}

pub fn submitted_node_row(label: &str, definition: &str) -> Option<RawNodeRow> {
    let label = label.trim();
    let id = clean_id(label);
    if id.is_empty() {
        return None;
    }

    Some(RawNodeRow {
        id,
        label: label.to_string(),
        strength: Value::from(0.5),
        definition: definition.trim().to_string(),
        ..RawNodeRow::default()
    })
}
