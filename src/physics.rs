use glam::Vec3;

use crate::graph::GraphStore;

pub const TIME_STEP: f32 = 0.02;

const MIN_REPULSION_DISTANCE: f32 = 0.6;
const MIN_SPRING_DISTANCE: f32 = 0.001;

#[derive(Clone, Copy, Debug)]
pub struct PhysicsParams {
    pub repulsion: f32,
    pub damping: f32,
    pub link_k: f32,
    pub base_rest: f32,
    pub center_pull: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            repulsion: 60.0,
            damping: 0.88,
            link_k: 0.06,
            base_rest: 10.0,
            center_pull: 0.002,
        }
    }
}

pub fn step_layout(store: &mut GraphStore, params: PhysicsParams, global_cohesion: f32) {
    let (nodes, links, index_by_id) = store.kinematics_mut();
    let node_count = nodes.len();
    if node_count == 0 {
        return;
    }

    let mut forces = vec![Vec3::ZERO; node_count];

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = nodes[i].pos - nodes[j].pos;
            let distance = delta.length().max(MIN_REPULSION_DISTANCE);
            let push = delta.normalize_or_zero() * (params.repulsion / (distance * distance));
            forces[i] += push;
            forces[j] -= push;
        }
    }

    for link in links {
        let (Some(a), Some(b)) = (
            index_by_id.get(&link.a).copied(),
            index_by_id.get(&link.b).copied(),
        ) else {
            continue;
        };

        let delta = nodes[b].pos - nodes[a].pos;
        let distance = delta.length().max(MIN_SPRING_DISTANCE);
        let weight = (link.w * 0.7 + global_cohesion * 0.3).clamp(0.0, 1.0);
        let rest = params.base_rest * (1.2 - weight);
        let stiffness = params.link_k * (0.5 + weight);
        let spring = delta.normalize_or_zero() * (stiffness * (distance - rest));
        forces[a] += spring;
        forces[b] -= spring;
    }

    for (node, force) in nodes.iter_mut().zip(forces) {
        node.vel += force - node.pos * params.center_pull;
        node.vel *= params.damping;
        node.pos += node.vel * TIME_STEP;
    }
}

pub fn recenter(store: &mut GraphStore) {
    let (nodes, _, _) = store.kinematics_mut();
    if nodes.is_empty() {
        return;
    }

    let centroid = nodes.iter().map(|node| node.pos).sum::<Vec3>() / nodes.len() as f32;
    for node in nodes {
        node.pos -= centroid;
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{test_link, test_node};

    use super::*;

    fn free_params() -> PhysicsParams {
        PhysicsParams {
            repulsion: 60.0,
            damping: 1.0,
            link_k: 0.06,
            base_rest: 10.0,
            center_pull: 0.0,
        }
    }

    fn two_node_store(a: Vec3, b: Vec3) -> GraphStore {
        let mut store = GraphStore::default();
        store.replace_nodes(vec![test_node("a", a), test_node("b", b)]);
        store
    }

    #[test]
    fn tick_on_empty_store_is_a_no_op() {
        let mut store = GraphStore::default();
        step_layout(&mut store, PhysicsParams::default(), 0.5);
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn repulsion_pushes_nodes_apart_symmetrically() {
        let mut store = two_node_store(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        step_layout(&mut store, free_params(), 0.0);

        let a = store.node("a").unwrap();
        let b = store.node("b").unwrap();
        assert_eq!(a.vel, Vec3::new(-15.0, 0.0, 0.0));
        assert_eq!(b.vel, Vec3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn repulsion_conserves_momentum_across_many_nodes() {
        let mut store = GraphStore::default();
        store.replace_nodes(vec![
            test_node("a", Vec3::new(0.3, -1.2, 0.8)),
            test_node("b", Vec3::new(-2.1, 0.4, 1.5)),
            test_node("c", Vec3::new(1.7, 2.2, -0.6)),
            test_node("d", Vec3::new(-0.9, -0.3, -1.8)),
        ]);

        step_layout(&mut store, free_params(), 0.0);

        let total = store
            .nodes()
            .iter()
            .fold(Vec3::ZERO, |sum, node| sum + node.vel);
        assert!(total.length() < 1e-4, "net momentum {total}");
    }

    #[test]
    fn coincident_nodes_do_not_explode() {
        let mut store = two_node_store(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
        step_layout(&mut store, PhysicsParams::default(), 0.5);

        for node in store.nodes() {
            assert!(node.pos.is_finite());
            assert!(node.vel.is_finite());
        }
    }

    #[test]
    fn close_nodes_use_the_clamped_repulsion_distance() {
        let mut store = two_node_store(Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0));
        step_layout(&mut store, free_params(), 0.0);

        let expected = 60.0 / (0.6 * 0.6);
        assert!((store.node("b").unwrap().vel.x - expected).abs() < 1e-3);
        assert!((store.node("a").unwrap().vel.x + expected).abs() < 1e-3);
    }

    #[test]
    fn spring_is_silent_at_exact_rest_length() {
        let mut params = free_params();
        params.repulsion = 0.0;

        let weight = (1.0_f32 * 0.7 + 1.0 * 0.3).clamp(0.0, 1.0);
        let rest = params.base_rest * (1.2 - weight);

        let mut store = two_node_store(Vec3::ZERO, Vec3::new(rest, 0.0, 0.0));
        store.replace_links(vec![test_link("a", "b", 1.0), test_link("b", "a", 1.0)]);

        step_layout(&mut store, params, 1.0);

        assert!(store.node("a").unwrap().vel.length() < 1e-6);
        assert!(store.node("b").unwrap().vel.length() < 1e-6);
    }

    #[test]
    fn doubled_links_double_the_spring_force() {
        let mut params = free_params();
        params.repulsion = 0.0;

        let mut single = two_node_store(Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0));
        single.replace_links(vec![test_link("a", "b", 0.5)]);
        step_layout(&mut single, params, 0.0);

        let mut doubled = two_node_store(Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0));
        doubled.replace_links(vec![test_link("a", "b", 0.5), test_link("b", "a", 0.5)]);
        step_layout(&mut doubled, params, 0.0);

        let single_pull = single.node("a").unwrap().vel.x;
        let doubled_pull = doubled.node("a").unwrap().vel.x;
        assert!(single_pull.abs() > 0.0);
        assert!((doubled_pull - 2.0 * single_pull).abs() < 1e-5);
    }

    #[test]
    fn dangling_links_exert_no_force() {
        let mut store = GraphStore::default();
        store.replace_nodes(vec![test_node("a", Vec3::new(1.0, 0.0, 0.0))]);
        store.replace_links(vec![test_link("a", "ghost", 1.0), test_link("ghost", "a", 1.0)]);

        step_layout(&mut store, PhysicsParams::default(), 0.5);

        let node = store.node("a").unwrap();
        let expected = -0.002 * 1.0 * 0.88;
        assert!((node.vel.x - expected).abs() < 1e-6);
    }

    #[test]
    fn integration_uses_the_fixed_time_step() {
        let mut store = GraphStore::default();
        let mut node = test_node("a", Vec3::ZERO);
        node.vel = Vec3::new(1.0, 0.0, 0.0);
        store.replace_nodes(vec![node]);

        step_layout(&mut store, free_params(), 0.0);

        let moved = store.node("a").unwrap();
        assert_eq!(moved.vel, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(moved.pos, Vec3::new(TIME_STEP, 0.0, 0.0));
    }

    #[test]
    fn damping_drives_an_isolated_node_to_rest() {
        let mut store = GraphStore::default();
        let mut node = test_node("a", Vec3::new(0.01, 0.02, 0.005));
        node.vel = Vec3::new(0.5, -0.3, 0.1);
        store.replace_nodes(vec![node]);

        let params = PhysicsParams::default();
        let mut previous_speed = f32::MAX;
        for tick in 0..400 {
            step_layout(&mut store, params, 0.5);
            let speed = store.node("a").unwrap().vel.length();
            if tick > 10 {
                assert!(speed <= previous_speed + 1e-4, "speed rose at tick {tick}");
            }
            previous_speed = speed;
        }

        let node = store.node("a").unwrap();
        assert!(node.vel.length() < 5e-3);
        assert!(node.pos.length() < 1.0);
    }

    #[test]
    fn recenter_moves_the_centroid_to_the_origin() {
        let mut store = GraphStore::default();
        store.replace_nodes(vec![
            test_node("a", Vec3::new(2.0, 0.0, 0.0)),
            test_node("b", Vec3::new(4.0, 2.0, -2.0)),
        ]);

        recenter(&mut store);

        let centroid = store
            .nodes()
            .iter()
            .fold(Vec3::ZERO, |sum, node| sum + node.pos)
            / store.node_count() as f32;
        assert!(centroid.length() < 1e-6);
        assert_eq!(store.node("a").unwrap().pos, Vec3::new(-1.0, -1.0, 1.0));
    }
}
