use {crate::*, glam::IVec3, std::collections::HashMap};

/// Minimum count of exactly coinciding beacons for two scanners to count as observing a shared
/// region. Spurious translations produce at most a handful of accidental coincidences at this
/// puzzle's beacon densities, so reaching this tally identifies the true relative offset.
pub const MINIMUM_OVERLAPPING_BEACONS: usize = 12_usize;

/// A rigid motion: rotate, then translate.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq)]
pub struct Transformation {
    pub orientation: IMat3,
    pub translation: IVec3,
}

impl Transformation {
    pub const IDENTITY: Self = Self {
        orientation: IMat3::IDENTITY,
        translation: IVec3::ZERO,
    };

    pub fn transform(&self, position: IVec3) -> IVec3 {
        (self.orientation * position) + self.translation
    }

    /// Composes two rigid motions, with `rhs` applied first.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self {
            orientation: self.orientation * rhs.orientation,
            translation: (self.orientation * rhs.translation) + self.translation,
        }
    }

    pub fn inverse(&self) -> Self {
        let orientation: IMat3 = self.orientation.inverse();

        Self {
            orientation,
            translation: -(orientation * self.translation),
        }
    }
}

/// The explicit result of a successful pairwise alignment: the transformation mapping the
/// candidate frame into the reference frame, and the coincidence tally that justified it.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq)]
pub struct Alignment {
    pub transformation: Transformation,
    pub match_count: usize,
}

/// Searches all 24 rotations for a rigid transformation under which at least
/// `minimum_overlapping_beacons` candidate beacons coincide exactly with reference beacons.
///
/// For each rotation, every (reference, rotated candidate) pair votes for the translation that
/// would superimpose them; the true relative offset recurs once per genuinely shared beacon,
/// while every other vector stays far below the threshold. The first translation whose tally
/// reaches the threshold is returned. `None` means no overlap, which is an expected negative and
/// not an error.
pub fn try_align(
    reference: &[IVec3],
    candidate: &[IVec3],
    minimum_overlapping_beacons: usize,
) -> Option<Alignment> {
    if reference.len().min(candidate.len()) < minimum_overlapping_beacons {
        return None;
    }

    let mut tallies: HashMap<IVec3, usize> = HashMap::new();
    let mut rotated_candidate: Vec<IVec3> = Vec::with_capacity(candidate.len());

    rotations().iter().find_map(|rotation: &IMat3| {
        rotated_candidate.clear();
        rotated_candidate.extend(
            candidate
                .iter()
                .map(|beacon: &IVec3| *rotation * *beacon),
        );
        tallies.clear();

        reference.iter().find_map(|reference_beacon: &IVec3| {
            rotated_candidate.iter().find_map(|rotated_beacon: &IVec3| {
                let translation: IVec3 = *reference_beacon - *rotated_beacon;
                let tally: &mut usize = tallies.entry(translation).or_insert(0_usize);

                *tally += 1_usize;

                (*tally >= minimum_overlapping_beacons).then(|| Alignment {
                    transformation: Transformation {
                        orientation: *rotation,
                        translation,
                    },
                    match_count: *tally,
                })
            })
        })
    })
}
