use std::collections::HashSet;

use crate::graph::GraphStore;

#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    node_id: Option<String>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    pub fn select(&mut self, store: &GraphStore, target: Option<&str>) {
        match target {
            None => self.node_id = None,
            Some(id) if store.contains(id) => self.node_id = Some(id.to_string()),
            Some(_) => {}
        }
    }
}

pub fn neighbor_set(store: &GraphStore, center: &str) -> HashSet<String> {
    let mut neighbors = HashSet::from([center.to_string()]);
    for link in store.links() {
        if link.a == center {
            neighbors.insert(link.b.clone());
        }
        if link.b == center {
            neighbors.insert(link.a.clone());
        }
    }
    neighbors
}

pub fn neighbor_list(store: &GraphStore, center: &str) -> Vec<String> {
    let mut ids = neighbor_set(store, center)
        .into_iter()
        .filter(|id| id != center)
        .collect::<Vec<_>>();
    ids.sort();
    ids
}
