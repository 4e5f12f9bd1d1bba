//! Shortest-path search over the version graph
//!
//! Breadth-first from the starting version. Every registered edge is a
//! candidate regardless of whether it upgrades or downgrades, so a route
//! may climb past the target and come back down if that takes fewer hops.
//! Among equally short routes the one through the earliest registered
//! edges wins.

use crate::converter::{ConverterRef, Hop};
use crate::graph::VersionGraph;
use crate::version::Version;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Find the edge-count-minimal route from `current` to `target`
///
/// Returns hops in execution order, or `None` if `target` is unreachable.
/// When `current == target` the search still runs and yields the shortest
/// round trip, if any; callers wanting identity should check first.
pub fn find_path<T>(
    graph: &VersionGraph<T>,
    current: &Version,
    target: &Version,
) -> Option<Vec<Hop<T>>> {
    let mut visited: HashSet<&Version> = HashSet::from([current]);
    // node -> (predecessor, edge used to reach it)
    let mut parents: HashMap<&Version, (&Version, &ConverterRef<T>)> = HashMap::new();
    let mut queue: VecDeque<&Version> = VecDeque::from([current]);

    while let Some(node) = queue.pop_front() {
        for (next, converter) in graph.outgoing(node) {
            if next == target {
                return Some(unwind(&parents, node, next, converter));
            }
            if visited.insert(next) {
                parents.insert(next, (node, converter));
                queue.push_back(next);
            }
        }
    }

    None
}

/// Rebuild the route ending in `last -> target`, tail first, then reverse it
fn unwind<T>(
    parents: &HashMap<&Version, (&Version, &ConverterRef<T>)>,
    last: &Version,
    target: &Version,
    converter: &ConverterRef<T>,
) -> Vec<Hop<T>> {
    let mut hops = vec![Hop::new(last.clone(), target.clone(), Arc::clone(converter))];
    let mut node = last;
    while let Some(&(prev, conv)) = parents.get(node) {
        hops.push(Hop::new(prev.clone(), node.clone(), Arc::clone(conv)));
        node = prev;
    }
    hops.reverse();
    hops
}
