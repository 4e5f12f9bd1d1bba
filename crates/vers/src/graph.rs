//! Version graph
//!
//! Registered converters are directed edges between version nodes. At most
//! one edge exists per ordered pair; registering the same pair again
//! replaces the converter on that edge.

use crate::converter::ConverterRef;
use crate::version::Version;
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;
use std::fmt;

/// Directed graph of converters keyed by version
pub struct VersionGraph<T> {
    inner: DiGraph<Version, ConverterRef<T>>,
    nodes: IndexMap<Version, NodeIndex>,
    latest: Option<Version>,
    latest_fixed: bool,
}

impl<T> VersionGraph<T> {
    /// Create an empty graph that discovers its latest version
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DiGraph::new(),
            nodes: IndexMap::new(),
            latest: None,
            latest_fixed: false,
        }
    }

    /// Create an empty graph whose latest version never changes
    #[inline]
    #[must_use]
    pub fn with_latest(latest: Version) -> Self {
        Self {
            latest: Some(latest),
            latest_fixed: true,
            ..Self::new()
        }
    }

    /// Register `from -> to`, and `to -> from` when `back` is given
    ///
    /// An existing edge for the same ordered pair is overwritten.
    pub fn add_converter(
        &mut self,
        from: Version,
        to: Version,
        forward: ConverterRef<T>,
        back: Option<ConverterRef<T>>,
    ) {
        let a = self.node(&from);
        let b = self.node(&to);
        self.inner.update_edge(a, b, forward);
        if let Some(back) = back {
            self.inner.update_edge(b, a, back);
        }

        self.raise_latest(&from);
        self.raise_latest(&to);
    }

    /// Outgoing edges of `version` in registration order, empty if it has none
    ///
    /// petgraph lists a node's edges newest first; edge indices grow with
    /// each new pair and survive `update_edge`, so sorting by index yields
    /// first-registration order.
    pub fn outgoing<'a>(
        &'a self,
        version: &Version,
    ) -> impl Iterator<Item = (&'a Version, &'a ConverterRef<T>)> + 'a {
        self.nodes.get(version).into_iter().flat_map(move |&idx| {
            let mut edges: Vec<_> = self.inner.edges(idx).collect();
            edges.sort_unstable_by_key(EdgeRef::id);
            edges
                .into_iter()
                .map(move |edge| (&self.inner[edge.target()], edge.weight()))
        })
    }

    /// Converter registered for exactly `from -> to`
    #[must_use]
    pub fn edge(&self, from: &Version, to: &Version) -> Option<&ConverterRef<T>> {
        let a = *self.nodes.get(from)?;
        let b = *self.nodes.get(to)?;
        self.inner.find_edge(a, b).map(|e| &self.inner[e])
    }

    /// Check if any converter mentions `version`
    #[inline]
    #[must_use]
    pub fn contains(&self, version: &Version) -> bool {
        self.nodes.contains_key(version)
    }

    /// Versions in registration order
    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.nodes.keys()
    }

    /// Number of known versions
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of registered converters
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Latest known version, explicit or discovered
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.latest.as_ref()
    }

    /// Drop every edge while keeping nodes and the latest version
    #[cfg(test)]
    pub(crate) fn clear_edges(&mut self) {
        self.inner.clear_edges();
    }

    fn node(&mut self, version: &Version) -> NodeIndex {
        if let Some(idx) = self.nodes.get(version) {
            return *idx;
        }
        let idx = self.inner.add_node(version.clone());
        self.nodes.insert(version.clone(), idx);
        idx
    }

    fn raise_latest(&mut self, candidate: &Version) {
        if self.latest_fixed {
            return;
        }
        let Some(current) = &self.latest else {
            self.latest = Some(candidate.clone());
            return;
        };
        match candidate.compare_latest(current) {
            Some(Ordering::Greater) => self.latest = Some(candidate.clone()),
            Some(_) => {}
            None => tracing::warn!(
                %current,
                %candidate,
                "versions of different families are incomparable; latest version unchanged"
            ),
        }
    }
}

impl<T> Default for VersionGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for VersionGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionGraph")
            .field("versions", &self.nodes.keys().collect::<Vec<_>>())
            .field("edges", &self.inner.edge_count())
            .field("latest", &self.latest)
            .finish()
    }
}
