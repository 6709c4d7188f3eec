//! Algorithms over sets of edges in a SUMO network, used to carve a road network into the pieces
//! the VCI flow analysis works with:
//!
//! - closures that grow a set of cut edges until isolating them leaves nothing inconsistent
//! - partitioning a whole network into disjoint weakly connected "detector systems"
//! - extending a seed set outwards, with a traversal budget per edge type
//! - matching edge names against human-supplied aliases
//! - finding the entries, exits, and route choices of a network

#[macro_use]
extern crate log;

use std::collections::BTreeSet;

use sumo::EdgeID;

pub use self::boundaries::{
    choice_edges, connection_edges, network_connections, write_connections, ConnectionKind,
    ConnectionRecord,
};
pub use self::closure::{
    continuous_edges, deducible_edges, expand, ClosureRule, Continuity, Deducibility,
};
pub use self::components::{largest_component, weakly_connected_components};
pub use self::edge_list::{check_edges, read_edge_list, read_lines, write_edge_list};
pub use self::extend::{expand_by_types, extend_by_type_depth, seed_edges, Depth, DepthMap, Seed};
pub use self::partition::{
    partition_network, EdgeRemoval, InProcessRemoval, NetconvertRemoval, DEFAULT_MAX_SYSTEMS_WARNING,
};
pub use self::similarity::{
    levenshtein_distance, named_edges, normalize, similarity, NameMatcher, DEFAULT_ALIASES,
    DEFAULT_SIMILARITY_THRESHOLD,
};

mod boundaries;
mod closure;
mod components;
mod edge_list;
mod extend;
mod partition;
mod similarity;

/// A set of edges, ordered by ID so that anything derived from it is deterministic.
pub type EdgeSet = BTreeSet<EdgeID>;
