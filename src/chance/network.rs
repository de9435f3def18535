use super::draw::{pick_weighted, WeightedDraw};
use crate::error::{ConfigError, ConfigResult, LogicError};

/*
Event Networks
==============

A network is a first-order Markov chain authored by ear. Each node is a
musical state ("dense play", "light rest") carrying a scalar value that the
caller acts on, usually 1 for play and 0 for rest. Each link is a directed
edge with an integer weight:

    dense_play ──40──→ dense_play
         │ ╲
         1  2
         ↓    ╲
    light_play  dense_rest

From `dense_play` the walk stays put 40 times out of 43. Weights are
integers so that a composer can write "40 vs 1 vs 2" and the draw is exact:
a uniform integer in [0, total) falls into exactly one half-open interval of
the accumulated weights, in link insertion order.

    links:   [ dense_play: 40 | light_play: 1 | dense_rest: 2 ]
    bounds:  [0 ............ 40)[40 ... 41)[41 ......... 43)

The random source is always passed in, never ambient, so a seeded walk
replays exactly.
*/

/// Handle to a node inside one [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One musical state with its outgoing links.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    value: i64,
    links: Vec<(NodeId, u32)>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Outgoing links in insertion order.
    pub fn links(&self) -> &[(NodeId, u32)] {
        &self.links
    }

    pub fn total_weight(&self) -> u64 {
        self.links.iter().map(|&(_, weight)| u64::from(weight)).sum()
    }

    pub fn is_terminal(&self) -> bool {
        self.links.is_empty()
    }
}

/// A weighted directed graph of nodes plus the walk's current position.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    current: Option<NodeId>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. The first node inserted becomes the current node.
    pub fn add_node(&mut self, name: impl Into<String>, value: i64) -> ConfigResult<NodeId> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(ConfigError::DuplicateNode(name));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            value,
            links: Vec::new(),
        });
        if self.current.is_none() {
            self.current = Some(id);
        }
        Ok(id)
    }

    /// Insert several nodes, stopping at the first duplicate.
    pub fn add_nodes<I, S>(&mut self, nodes: I) -> ConfigResult<Vec<NodeId>>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        nodes
            .into_iter()
            .map(|(name, value)| self.add_node(name, value))
            .collect()
    }

    /// Add a directed link, or add `weight` to an existing one.
    pub fn add_link(&mut self, source: NodeId, target: NodeId, weight: u32) -> ConfigResult<()> {
        self.check_member(target)?;
        let source_name = self.check_member(source)?.name.clone();
        if weight == 0 {
            return Err(ConfigError::NonPositiveWeight {
                source_node: source_name,
                target: self.nodes[target.0].name.clone(),
            });
        }

        // Draws are u32, so the whole node must fit in one.
        if self.nodes[source.0].total_weight() + u64::from(weight) > u64::from(u32::MAX) {
            return Err(ConfigError::WeightOverflow {
                source_node: source_name,
            });
        }

        let links = &mut self.nodes[source.0].links;
        match links.iter_mut().find(|(existing, _)| *existing == target) {
            Some((_, existing_weight)) => *existing_weight += weight,
            None => links.push((target, weight)),
        }
        Ok(())
    }

    /// Move to the next node by a weighted draw over the current node's links.
    ///
    /// Returns the value of the node moved to.
    pub fn advance<D: WeightedDraw + ?Sized>(&mut self, draws: &mut D) -> Result<i64, LogicError> {
        let current = self.current.ok_or(LogicError::NoCurrentNode)?;
        let node = &self.nodes[current.0];

        let picked = pick_weighted(draws, node.links.iter().map(|&(_, weight)| weight))
            .ok_or_else(|| LogicError::NoOutgoingLinks(node.name.clone()))?;
        let next = node.links[picked].0;

        self.current = Some(next);
        Ok(self.nodes[next.0].value)
    }

    /// Advance `steps` times, collecting each value.
    pub fn walk<D: WeightedDraw + ?Sized>(
        &mut self,
        draws: &mut D,
        steps: usize,
    ) -> Result<Vec<i64>, LogicError> {
        (0..steps).map(|_| self.advance(draws)).collect()
    }

    /// Force the walk's position.
    pub fn reset(&mut self, node: NodeId) -> ConfigResult<()> {
        self.check_member(node)?;
        self.current = Some(node);
        Ok(())
    }

    /// Check that every node can be advanced from.
    pub fn validate(&self) -> ConfigResult<()> {
        match self.nodes.iter().find(|node| node.is_terminal()) {
            Some(node) => Err(ConfigError::TerminalNode(node.name.clone())),
            None => Ok(()),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.current.map(|id| &self.nodes[id.0])
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check_member(&self, id: NodeId) -> ConfigResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ConfigError::UnknownNode(format!("#{}", id.0)))
    }
}
