use glam::Vec3;

use crate::graph::GraphStore;
use crate::selection::{SelectionState, neighbor_set};

#[derive(Clone, Debug)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub pos: Vec3,
    pub emphasized: bool,
}

#[derive(Clone, Debug)]
pub struct LinkView {
    pub a: String,
    pub b: String,
    pub w: f32,
    pub from: Vec3,
    pub to: Vec3,
    pub emphasized: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RenderView {
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

pub fn render_view(store: &GraphStore, selection: &SelectionState) -> RenderView {
    let focus = selection.selected();
    let highlight = focus.map(|id| neighbor_set(store, id));

    let nodes = store
        .nodes()
        .iter()
        .map(|node| NodeView {
            id: node.id.clone(),
            label: node.label.clone(),
            pos: node.pos,
            emphasized: highlight
                .as_ref()
                .is_none_or(|neighbors| neighbors.contains(&node.id)),
        })
        .collect();

    let links = store
        .links()
        .iter()
        .filter_map(|link| {
            let from = store.node(&link.a)?.pos;
            let to = store.node(&link.b)?.pos;
            Some(LinkView {
                a: link.a.clone(),
                b: link.b.clone(),
                w: link.w,
                from,
                to,
                emphasized: focus.is_none_or(|id| link.a == id || link.b == id),
            })
        })
        .collect();

    RenderView { nodes, links }
}
