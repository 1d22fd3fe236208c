pub mod graph;
pub mod physics;
pub mod search;
pub mod selection;
pub mod source;
pub mod util;
pub mod view;

pub use graph::{GraphStore, LayoutSnapshot, Link, Node, NodeMeta, RawLinkRow, RawNodeRow};
pub use physics::{PhysicsParams, TIME_STEP, recenter, step_layout};
pub use selection::SelectionState;
pub use view::{RenderView, render_view};
