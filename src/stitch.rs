// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line graph stitching
//!
//! Merges nearby segment endpoints, builds an adjacency graph and extracts
//! maximal connected paths. All state is scoped to a single call; hash maps
//! are only indexed by key, every ordering decision walks input order, so
//! output is reproducible for identical input sequences.

use crate::clip::Segment;
use nalgebra::Point3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Ordered sequence of connected boundary points
#[derive(Debug, Clone)]
pub struct Path {
    /// Points in traversal order; closed paths do not repeat the first point
    pub points: Vec<Point3<f64>>,
    /// True when the path's endpoints coincided within tolerance
    pub closed: bool,
}

impl Path {
    /// Number of points in the path
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Paths always carry at least 2 points, but keep clippy satisfied
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the path forms a closed loop
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

type CellKey = (i64, i64, i64);

#[inline]
fn cell_key(point: &Point3<f64>, epsilon: f64) -> CellKey {
    (
        (point.x / epsilon).round() as i64,
        (point.y / epsilon).round() as i64,
        (point.z / epsilon).round() as i64,
    )
}

/// Run-local point deduplication table.
///
/// Points are quantized to tolerance-sized grid cells; the first point seen
/// in a cell becomes the canonical representative for every later point in
/// the same cell. Canonical points are identified by index so equality
/// checks stay exact after merging.
struct PointPool {
    epsilon: f64,
    points: Vec<Point3<f64>>,
    cells: FxHashMap<CellKey, u32>,
}

impl PointPool {
    fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            points: Vec::new(),
            cells: FxHashMap::default(),
        }
    }

    fn canonical(&mut self, point: &Point3<f64>) -> u32 {
        let key = cell_key(point, self.epsilon);
        if let Some(&index) = self.cells.get(&key) {
            return index;
        }
        let index = self.points.len() as u32;
        self.points.push(*point);
        self.cells.insert(key, index);
        index
    }
}

/// Stitch an unordered set of segments into maximal paths and loops.
///
/// Each segment is consumed exactly once. At branch points (more than two
/// segments meeting) the walk takes the first unvisited neighbor in
/// insertion order, so path identity follows input order. A path whose
/// endpoints merge to the same canonical point is returned closed, with
/// the duplicate terminal point dropped. Segments collapsing to a single
/// canonical point are discarded.
pub fn stitch_segments(segments: &[Segment], epsilon: f64) -> Vec<Path> {
    let mut pool = PointPool::new(epsilon);

    // Rebuild segments on canonical endpoints, in input order
    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(segments.len());
    for segment in segments {
        let start = pool.canonical(&segment.start);
        let end = pool.canonical(&segment.end);
        if start != end {
            edges.push((start, end));
        }
    }

    // Undirected adjacency: (neighbor point, edge index), both directions
    let mut adjacency: FxHashMap<u32, SmallVec<[(u32, u32); 4]>> = FxHashMap::default();
    for (edge, &(start, end)) in edges.iter().enumerate() {
        adjacency.entry(start).or_default().push((end, edge as u32));
        adjacency.entry(end).or_default().push((start, edge as u32));
    }

    let mut visited = vec![false; edges.len()];
    let mut paths = Vec::new();

    for (edge, &(start, end)) in edges.iter().enumerate() {
        if visited[edge] {
            continue;
        }
        visited[edge] = true;

        let mut path: VecDeque<u32> = VecDeque::new();
        path.push_back(start);
        path.push_back(end);

        // Extend from the head, first unvisited neighbor wins
        let mut head = start;
        while let Some((next, through)) = next_unvisited(&adjacency, &visited, head) {
            visited[through as usize] = true;
            head = next;
            path.push_front(next);
        }

        // Then from the tail
        let mut tail = end;
        while let Some((next, through)) = next_unvisited(&adjacency, &visited, tail) {
            visited[through as usize] = true;
            tail = next;
            path.push_back(next);
        }

        let mut indices: Vec<u32> = path.into();
        let mut closed = false;
        if indices.len() > 2 && indices.first() == indices.last() {
            indices.pop();
            closed = true;
        }

        paths.push(Path {
            points: indices
                .iter()
                .map(|&index| pool.points[index as usize])
                .collect(),
            closed,
        });
    }

    paths
}

#[inline]
fn next_unvisited(
    adjacency: &FxHashMap<u32, SmallVec<[(u32, u32); 4]>>,
    visited: &[bool],
    point: u32,
) -> Option<(u32, u32)> {
    adjacency
        .get(&point)?
        .iter()
        .find(|&&(_, edge)| !visited[edge as usize])
        .copied()
}
