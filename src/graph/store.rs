use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::Vec3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMeta {
    pub definition: String,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub strength: Option<f32>,
    pub meta: NodeMeta,
    pub pos: Vec3,
    pub vel: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub a: String,
    pub b: String,
    pub w: f32,
}

#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index_by_id: HashMap<String, usize>,
}

impl GraphStore {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes.clear();
        self.index_by_id.clear();
        self.nodes.reserve(nodes.len());
        self.index_by_id.reserve(nodes.len());

        for node in nodes {
            if node.id.is_empty() {
                continue;
            }
            if let Entry::Vacant(entry) = self.index_by_id.entry(node.id.clone()) {
                entry.insert(self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    pub fn replace_links(&mut self, links: Vec<Link>) {
        self.links = links.into_iter().filter(|link| link.a != link.b).collect();
    }

    pub(crate) fn kinematics_mut(&mut self) -> (&mut [Node], &[Link], &HashMap<String, usize>) {
        (&mut self.nodes, &self.links, &self.index_by_id)
    }
}

#[cfg(test)]
pub(crate) fn test_node(id: &str, pos: Vec3) -> Node {
    Node {
        id: id.to_string(),
        label: id.to_string(),
        strength: None,
        meta: NodeMeta::default(),
        pos,
        vel: Vec3::ZERO,
    }
}

#[cfg(test)]
pub(crate) fn test_link(a: &str, b: &str, w: f32) -> Link {
    Link {
        a: a.to_string(),
        b: b.to_string(),
        w,
    }
}
