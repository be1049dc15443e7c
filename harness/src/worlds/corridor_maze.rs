//! `CorridorMaze`: a hand-laid corridor maze of 87 junctions.
//!
//! Corners and junctions sit on a 2D canvas (pixel-like coordinates), so
//! edge costs are corridor lengths. A few edges are one-way: node 14 leads
//! to 15 but 15 has no exits, and 64 is entered from 63 without leading
//! back. The start is node 0 in the top-left corner and the goal is node
//! 86 at the right edge.

use std::collections::BTreeMap;

use stepwise_kernel::carrier::graph::{GraphBuildError, GraphStore};
use stepwise_kernel::carrier::position::Position;

use crate::contract::MazeWorldV1;

const POSITIONS: [(i64, i64); 87] = [
    (53, 72), (152, 72), (190, 72), (152, 160),
    (53, 160), (53, 250), (152, 250), (152, 348),
    (53, 348), (53, 440), (53, 528), (53, 630),
    (152, 630), (220, 630), (220, 533), (290, 533),
    (220, 440), (120, 440), (120, 528), (155, 528),
    (220, 348), (290, 348), (290, 440), (390, 440),
    (390, 533), (358, 533), (358, 630), (290, 630),
    (320, 348), (390, 348), (390, 250), (320, 250),
    (223, 250), (223, 160), (390, 160), (287, 160),
    (287, 72), (390, 72), (255, 72), (458, 533),
    (458, 440), (458, 348), (525, 348), (525, 250),
    (525, 213), (598, 213), (598, 160), (525, 72),
    (458, 72), (458, 160), (525, 400), (525, 495),
    (525, 585), (525, 630), (435, 630), (598, 585),
    (598, 630), (668, 72), (668, 115), (598, 400),
    (598, 495), (598, 305), (665, 305), (703, 305),
    (703, 260), (703, 210), (668, 210), (773, 260),
    (773, 210), (810, 210), (848, 210), (810, 72),
    (738, 72), (738, 115), (773, 400), (848, 400),
    (848, 305), (848, 535), (848, 630), (738, 630),
    (738, 585), (665, 630), (665, 495), (773, 495),
    (665, 400), (703, 400), (880, 535),
];

/// Outgoing edges per node. Nodes absent here have none.
const CONNECTIONS: &[(usize, &[usize])] = &[
    (0, &[1]),
    (1, &[0, 2, 3]),
    (2, &[1]),
    (3, &[4, 1, 33]),
    (4, &[3, 5]),
    (5, &[4, 6]),
    (6, &[5, 7]),
    (7, &[6, 8]),
    (8, &[7, 9]),
    (9, &[8, 10]),
    (10, &[9, 11]),
    (11, &[10, 12]),
    (12, &[11, 13]),
    (13, &[12, 14]),
    (14, &[13, 15, 16]),
    (16, &[14, 17, 20]),
    (17, &[16, 18]),
    (18, &[17, 19]),
    (19, &[18]),
    (20, &[16, 21]),
    (21, &[20, 22, 28]),
    (22, &[21, 23]),
    (23, &[22, 24]),
    (24, &[23, 25, 39]),
    (25, &[26, 24]),
    (26, &[25, 27]),
    (27, &[26]),
    (28, &[21, 29, 31]),
    (29, &[28, 30]),
    (30, &[29, 34, 43]),
    (31, &[28, 32]),
    (32, &[31, 33]),
    (33, &[3, 32, 35]),
    (34, &[30, 35]),
    (35, &[33, 34, 36]),
    (36, &[35, 38, 37]),
    (37, &[36]),
    (38, &[36]),
    (39, &[24, 40]),
    (40, &[39, 41]),
    (41, &[40, 42]),
    (42, &[41, 43, 50]),
    (43, &[30, 42, 44]),
    (44, &[43, 45, 47]),
    (45, &[44, 46]),
    (46, &[45]),
    (47, &[44, 48, 57]),
    (48, &[47, 49]),
    (49, &[48]),
    (50, &[42, 51, 59]),
    (51, &[50, 52, 60]),
    (52, &[51, 53, 55]),
    (53, &[52, 54]),
    (54, &[53]),
    (55, &[52, 56]),
    (56, &[55]),
    (57, &[47, 58]),
    (58, &[57]),
    (59, &[50, 61]),
    (60, &[51, 82]),
    (61, &[59, 62]),
    (62, &[61, 63, 84]),
    (63, &[62, 64]),
    (64, &[65, 67]),
    (65, &[64, 66]),
    (66, &[65]),
    (67, &[64, 68, 74]),
    (68, &[67, 69]),
    (69, &[68, 70, 71]),
    (70, &[69]),
    (71, &[69, 72]),
    (72, &[71, 73]),
    (73, &[72]),
    (74, &[67, 75]),
    (75, &[74, 76, 77]),
    (76, &[75]),
    (77, &[78, 86]),
    (78, &[77, 79]),
    (79, &[78, 80, 81]),
    (80, &[79]),
    (81, &[79, 82]),
    (82, &[60, 81, 83, 84]),
    (83, &[82]),
    (84, &[62, 82, 85]),
    (85, &[84]),
    (86, &[77]),
];

const START: usize = 0;
const GOAL: usize = 86;

pub struct CorridorMaze;

impl CorridorMaze {
    /// Positions in node-index order.
    #[must_use]
    pub fn positions() -> Vec<Position> {
        POSITIONS.iter().copied().map(Position::from).collect()
    }
}

impl MazeWorldV1 for CorridorMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "corridor_maze"
    }

    fn build_graph(&self) -> Result<GraphStore, GraphBuildError> {
        let adjacency: BTreeMap<usize, Vec<usize>> = CONNECTIONS
            .iter()
            .map(|(from, to)| (*from, to.to_vec()))
            .collect();
        GraphStore::new(Self::positions(), &adjacency)
    }

    fn start(&self) -> Position {
        Position::from(POSITIONS[START])
    }

    fn goal(&self) -> Position {
        Position::from(POSITIONS[GOAL])
    }
}
