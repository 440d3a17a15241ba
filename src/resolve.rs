use {
    crate::*,
    glam::IVec3,
    rayon::iter::{IntoParallelRefIterator, ParallelIterator},
    std::collections::{HashSet, VecDeque},
};

/// A verified rigid relation between two scanners: applying `alignment.transformation` to a
/// beacon in `to`'s local frame expresses it in `from`'s frame. Immutable once discovered; the
/// reverse relation is derived on demand rather than stored.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy)]
pub struct OverlapEdge {
    pub from: u16,
    pub to: u16,
    pub alignment: Alignment,
}

/// All verified pairwise relations for one survey, discovered by exhaustively aligning every
/// unordered scanner pair.
pub struct OverlapGraph {
    edges: Vec<OverlapEdge>,
}

impl OverlapGraph {
    /// Aligns all unordered scanner pairs across a thread pool. Collecting preserves pair order,
    /// so the edge list is identical to a sequential scan.
    pub fn build(scanners: &[Scanner], minimum_overlapping_beacons: usize) -> Self {
        let scanners_len: usize = scanners.len();
        let pairs: Vec<(u16, u16)> = (0_usize..scanners_len.saturating_sub(1_usize))
            .flat_map(|from: usize| {
                (from + 1_usize..scanners_len).map(move |to: usize| (from as u16, to as u16))
            })
            .collect();
        let edges: Vec<OverlapEdge> = pairs
            .par_iter()
            .filter_map(|&(from, to)| {
                try_align(
                    scanners[from as usize].beacons(),
                    scanners[to as usize].beacons(),
                    minimum_overlapping_beacons,
                )
                .map(|alignment: Alignment| OverlapEdge {
                    from,
                    to,
                    alignment,
                })
            })
            .collect();

        Self { edges }
    }

    #[inline]
    pub fn edges(&self) -> &[OverlapEdge] {
        &self.edges
    }

    /// Relations incident to `scanner`: stored edges walked forwards, inverted edges walked
    /// backwards.
    fn relations(&self, scanner: u16) -> impl Iterator<Item = (u16, Transformation)> + '_ {
        self.edges.iter().filter_map(move |edge: &OverlapEdge| {
            if edge.from == scanner {
                Some((edge.to, edge.alignment.transformation))
            } else if edge.to == scanner {
                Some((edge.from, edge.alignment.transformation.inverse()))
            } else {
                None
            }
        })
    }
}

/// Fatal: traversal from the root scanner could not reach every scanner, so no global frame
/// exists. Carries the sorted ids of the scanners left unresolved.
#[derive(Debug, PartialEq)]
pub struct DisconnectedGraphError {
    pub unresolved_scanners: Vec<u16>,
}

/// One scanner's data re-expressed in the root scanner's frame, written exactly once during
/// resolution.
#[cfg_attr(test, derive(Debug))]
pub struct ResolvedScanner {
    pub id: u16,
    pub transformation: Transformation,
    pub beacons: Vec<IVec3>,
}

impl ResolvedScanner {
    /// The scanner's own position in the global frame, the image of its local origin.
    #[inline]
    pub fn position(&self) -> IVec3 {
        self.transformation.translation
    }
}

/// Every scanner resolved into the frame of the root scanner, plus the query surface over the
/// merged result.
pub struct GlobalFrame {
    scanners: Vec<ResolvedScanner>,
}

impl GlobalFrame {
    /// Propagates transformations breadth-first from the root scanner (index 0, identity
    /// transformation). A scanner resolves the first time a resolved neighbor reaches it; every
    /// spanning path composes to the same transformation, so later paths are skipped.
    pub fn try_from_scanners_and_graph(
        scanners: &[Scanner],
        graph: &OverlapGraph,
    ) -> Result<Self, DisconnectedGraphError> {
        let mut transformations: Vec<Option<Transformation>> = vec![None; scanners.len()];
        let mut queue: VecDeque<(u16, Transformation)> = VecDeque::new();

        if !scanners.is_empty() {
            transformations[0_usize] = Some(Transformation::IDENTITY);
            queue.push_back((0_u16, Transformation::IDENTITY));
        }

        while let Some((resolved, resolved_transformation)) = queue.pop_front() {
            for (neighbor, relation) in graph.relations(resolved) {
                if transformations[neighbor as usize].is_none() {
                    let neighbor_transformation: Transformation =
                        resolved_transformation.mul(&relation);

                    transformations[neighbor as usize] = Some(neighbor_transformation);
                    queue.push_back((neighbor, neighbor_transformation));
                }
            }
        }

        let mut unresolved_scanners: Vec<u16> = scanners
            .iter()
            .zip(transformations.iter())
            .filter_map(|(scanner, transformation)| {
                transformation.is_none().then_some(scanner.id())
            })
            .collect();

        if !unresolved_scanners.is_empty() {
            unresolved_scanners.sort_unstable();

            Err(DisconnectedGraphError {
                unresolved_scanners,
            })
        } else {
            Ok(Self {
                scanners: scanners
                    .iter()
                    .zip(transformations)
                    .map(|(scanner, transformation)| {
                        // Resolution is complete, every entry is occupied
                        let transformation: Transformation = transformation.unwrap();

                        ResolvedScanner {
                            id: scanner.id(),
                            beacons: scanner
                                .beacons()
                                .iter()
                                .map(|beacon: &IVec3| transformation.transform(*beacon))
                                .collect(),
                            transformation,
                        }
                    })
                    .collect(),
            })
        }
    }

    #[inline]
    pub fn scanners(&self) -> &[ResolvedScanner] {
        &self.scanners
    }

    /// Total count of distinct beacons across all resolved scanners.
    pub fn distinct_beacon_count(&self) -> usize {
        self.present_beacons().len()
    }

    /// The deduplicated global beacon set, sorted for deterministic output.
    pub fn distinct_beacons(&self) -> Vec<IVec3> {
        sort_ivec3s(self.present_beacons().into_iter().collect())
    }

    /// Maximum Manhattan distance between any two resolved scanner positions.
    pub fn largest_manhattan_distance(&self) -> i32 {
        (0_usize..self.scanners.len().saturating_sub(1_usize))
            .flat_map(|scanner_a: usize| {
                let position_a: IVec3 = self.scanners[scanner_a].position();

                (scanner_a + 1_usize..self.scanners.len()).map(move |scanner_b: usize| {
                    manhattan_distance(position_a, self.scanners[scanner_b].position())
                })
            })
            .max()
            .unwrap_or_default()
    }

    fn present_beacons(&self) -> HashSet<IVec3> {
        let mut present_beacons: HashSet<IVec3> = HashSet::new();

        for scanner in &self.scanners {
            present_beacons.extend(scanner.beacons.iter().copied());
        }

        present_beacons
    }
}
