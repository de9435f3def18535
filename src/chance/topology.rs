//! Plain-data description of a network, for loading topologies from
//! configuration instead of code.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::network::Network;
use crate::error::{ConfigError, ConfigResult};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub target: String,
    pub weight: u32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: String,
    pub value: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<LinkSpec>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkSpec {
    pub nodes: Vec<NodeSpec>,
    /// Starting node; the first node when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<String>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            links: Vec::new(),
        }
    }

    pub fn link(mut self, target: impl Into<String>, weight: u32) -> Self {
        self.links.push(LinkSpec {
            target: target.into(),
            weight,
        });
        self
    }
}

impl NetworkSpec {
    /// Build the network: every node first, then every link, so links may
    /// point forward to nodes declared later.
    pub fn build(&self) -> ConfigResult<Network> {
        let mut network = Network::new();
        let ids = network.add_nodes(self.nodes.iter().map(|node| (node.name.as_str(), node.value)))?;

        for (node, &source) in self.nodes.iter().zip(&ids) {
            for link in &node.links {
                let target = network
                    .find(&link.target)
                    .ok_or_else(|| ConfigError::UnknownNode(link.target.clone()))?;
                network.add_link(source, target, link.weight)?;
            }
        }

        if let Some(start) = &self.start {
            let start = network
                .find(start)
                .ok_or_else(|| ConfigError::UnknownNode(start.clone()))?;
            network.reset(start)?;
        }

        Ok(network)
    }
}

impl Network {
    /// Describe this network as data. The current node becomes `start`.
    pub fn to_spec(&self) -> NetworkSpec {
        let nodes = self
            .nodes()
            .map(|(_, node)| NodeSpec {
                name: node.name().to_owned(),
                value: node.value(),
                links: node
                    .links()
                    .iter()
                    .filter_map(|&(target, weight)| {
                        self.node(target).map(|target| LinkSpec {
                            target: target.name().to_owned(),
                            weight,
                        })
                    })
                    .collect(),
            })
            .collect();

        NetworkSpec {
            nodes,
            start: self.current_node().map(|node| node.name().to_owned()),
        }
    }
}
