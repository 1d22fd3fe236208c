mod ingest;
mod snapshot;
mod store;

pub use ingest::{
    RawLinkRow, RawNodeRow, clean_id, ingest, merge_link_rows, merge_node_rows, parse_timestamp,
    submitted_node_row,
};
pub use snapshot::LayoutSnapshot;
pub use store::{GraphStore, Link, Node, NodeMeta};

#[cfg(test)]
pub(crate) use store::{test_link, test_node};
