//! Ready-made play/rest networks for the ensemble parts.
//!
//! Each has six states: three playing (value 1) and three resting (value 0),
//! from dense to light. The walk starts at `dense_play`.

use super::topology::{NetworkSpec, NodeSpec};
use super::network::Network;
use crate::error::ConfigResult;

/// Self-weights that differ between parts; the rest of the graph is shared.
struct PartWeights {
    dense_play_stay: u32,
    play_to_dense_play: u32,
    rest_stay: u32,
    rest_to_dense_rest: u32,
    dense_rest_stay: u32,
}

fn events_spec(weights: PartWeights) -> NetworkSpec {
    NetworkSpec {
        nodes: vec![
            NodeSpec::new("dense_play", 1)
                .link("dense_play", weights.dense_play_stay)
                .link("light_play", 1)
                .link("dense_rest", 2),
            NodeSpec::new("play", 1)
                .link("dense_play", weights.play_to_dense_play)
                .link("play", 10)
                .link("light_play", 4)
                .link("light_rest", 5)
                .link("rest", 4),
            NodeSpec::new("light_play", 1)
                .link("play", 2)
                .link("light_rest", 4),
            NodeSpec::new("light_rest", 0)
                .link("rest", 3)
                .link("dense_rest", 1)
                .link("light_rest", 2)
                .link("light_play", 2),
            NodeSpec::new("rest", 0)
                .link("rest", weights.rest_stay)
                .link("dense_rest", weights.rest_to_dense_rest)
                .link("light_play", 1),
            NodeSpec::new("dense_rest", 0)
                .link("dense_rest", weights.dense_rest_stay)
                .link("rest", 2)
                .link("light_play", 1),
        ],
        start: None,
    }
}

pub fn piano_events_network() -> ConfigResult<Network> {
    events_spec(PartWeights {
        dense_play_stay: 40,
        play_to_dense_play: 2,
        rest_stay: 4,
        rest_to_dense_rest: 3,
        dense_rest_stay: 100,
    })
    .build()
}

pub fn viola_1_events_network() -> ConfigResult<Network> {
    events_spec(PartWeights {
        dense_play_stay: 5,
        play_to_dense_play: 1,
        rest_stay: 6,
        rest_to_dense_rest: 4,
        dense_rest_stay: 500,
    })
    .build()
}

pub fn speaker_1_events_network() -> ConfigResult<Network> {
    events_spec(PartWeights {
        dense_play_stay: 5,
        play_to_dense_play: 2,
        rest_stay: 4,
        rest_to_dense_rest: 3,
        dense_rest_stay: 400,
    })
    .build()
}

/// Names accepted by [`events_network_by_name`].
pub const PREBUILT_NAMES: &[&str] = &["piano", "viola_1", "speaker_1"];

pub fn events_network_by_name(name: &str) -> Option<ConfigResult<Network>> {
    match name {
        "piano" => Some(piano_events_network()),
        "viola_1" => Some(viola_1_events_network()),
        "speaker_1" => Some(speaker_1_events_network()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_part_validates() {
        for name in PREBUILT_NAMES {
            let network = events_network_by_name(name).unwrap().unwrap();
            assert_eq!(network.len(), 6, "{name}");
            network.validate().unwrap();
            assert_eq!(network.current_node().unwrap().name(), "dense_play");
        }
    }

    #[test]
    fn piano_keeps_its_long_dense_rest() {
        let network = piano_events_network().unwrap();
        let dense_rest = network.find("dense_rest").unwrap();
        let node = network.node(dense_rest).unwrap();
        assert_eq!(node.value(), 0);
        assert_eq!(node.links()[0], (dense_rest, 100));
        assert_eq!(node.total_weight(), 103);
    }

    #[test]
    fn unknown_part_is_none() {
        assert!(events_network_by_name("tuba").is_none());
    }
}
