use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_triple(id: &str) -> (f32, f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let axis = |bits: u64| ((bits & 0x1f_ffff) as f64 / 0x1f_ffff as f64) as f32 * 2.0 - 1.0;
    (axis(hash), axis(hash >> 21), axis(hash >> 42))
}
