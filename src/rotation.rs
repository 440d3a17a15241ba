use {
    crate::*,
    glam::IVec3,
    static_assertions::const_assert,
    std::{collections::HashSet, sync::OnceLock},
    strum::{EnumCount, EnumIter, IntoEnumIterator},
};

pub const ROTATION_COUNT: usize = Facing::COUNT * ROLL_COUNT;

const ROLL_COUNT: usize = 4_usize;

const ROTATE_ABOUT_X_TAU_OVER_4: IMat3 = IMat3::from_cols(IVec3::X, IVec3::Z, IVec3::NEG_Y);
const ROTATE_ABOUT_X_TAU_OVER_2: IMat3 =
    ROTATE_ABOUT_X_TAU_OVER_4.const_mul(&ROTATE_ABOUT_X_TAU_OVER_4);
const ROTATE_ABOUT_X_3_TAU_OVER_4: IMat3 =
    ROTATE_ABOUT_X_TAU_OVER_4.const_mul(&ROTATE_ABOUT_X_TAU_OVER_2);

const ROTATE_ABOUT_Y_TAU_OVER_4: IMat3 = IMat3::from_cols(IVec3::NEG_Z, IVec3::Y, IVec3::X);
const ROTATE_ABOUT_Y_TAU_OVER_2: IMat3 =
    ROTATE_ABOUT_Y_TAU_OVER_4.const_mul(&ROTATE_ABOUT_Y_TAU_OVER_4);
const ROTATE_ABOUT_Y_3_TAU_OVER_4: IMat3 =
    ROTATE_ABOUT_Y_TAU_OVER_4.const_mul(&ROTATE_ABOUT_Y_TAU_OVER_2);

const ROTATE_ABOUT_Z_TAU_OVER_4: IMat3 = IMat3::from_cols(IVec3::Y, IVec3::NEG_X, IVec3::Z);
const ROTATE_ABOUT_Z_TAU_OVER_2: IMat3 =
    ROTATE_ABOUT_Z_TAU_OVER_4.const_mul(&ROTATE_ABOUT_Z_TAU_OVER_4);
const ROTATE_ABOUT_Z_3_TAU_OVER_4: IMat3 =
    ROTATE_ABOUT_Z_TAU_OVER_4.const_mul(&ROTATE_ABOUT_Z_TAU_OVER_2);

/// Quarter-turn rolls about the local X axis, applied before the facing rotation.
const ROLLS: [IMat3; ROLL_COUNT] = [
    IMat3::IDENTITY,
    ROTATE_ABOUT_X_TAU_OVER_4,
    ROTATE_ABOUT_X_TAU_OVER_2,
    ROTATE_ABOUT_X_3_TAU_OVER_4,
];

/// The signed axis direction a rotation maps the local +X axis onto.
#[derive(Clone, Copy, Debug, EnumCount, EnumIter, PartialEq)]
#[repr(u8)]
pub enum Facing {
    PosX,
    PosY,
    PosZ,
    NegX,
    NegY,
    NegZ,
}

impl Facing {
    const fn imat3(self) -> IMat3 {
        match self {
            Self::PosX => IMat3::IDENTITY,
            Self::PosY => ROTATE_ABOUT_Z_TAU_OVER_4,
            Self::PosZ => ROTATE_ABOUT_Y_3_TAU_OVER_4,
            Self::NegX => ROTATE_ABOUT_Z_TAU_OVER_2,
            Self::NegY => ROTATE_ABOUT_Z_3_TAU_OVER_4,
            Self::NegZ => ROTATE_ABOUT_Y_TAU_OVER_4,
        }
    }
}

// 6 facings with 4 rolls each enumerates the full proper symmetry group of the cube
const_assert!(ROTATION_COUNT == 24_usize);

/// The 24 distinct proper rotations keeping coordinate axes axis-aligned, built on first use and
/// cached for the process lifetime. Enumeration order is fixed but carries no meaning.
pub fn rotations() -> &'static [IMat3; ROTATION_COUNT] {
    static ROTATIONS: OnceLock<[IMat3; ROTATION_COUNT]> = OnceLock::new();

    ROTATIONS.get_or_init(|| {
        let mut rotations: [IMat3; ROTATION_COUNT] = [IMat3::IDENTITY; ROTATION_COUNT];

        for (index, rotation) in Facing::iter()
            .flat_map(|facing: Facing| {
                ROLLS
                    .iter()
                    .map(move |roll: &IMat3| facing.imat3().const_mul(roll))
            })
            .enumerate()
        {
            rotations[index] = rotation;
        }

        debug_assert_eq!(distinct_probe_images(&rotations), ROTATION_COUNT);

        rotations
    })
}

/// How many distinct images the rotations produce for an asymmetric probe vector. Anything less
/// than the full count means two entries collapsed into the same rotation.
fn distinct_probe_images(rotations: &[IMat3]) -> usize {
    const PROBE: IVec3 = IVec3::new(1_i32, 2_i32, 3_i32);

    rotations
        .iter()
        .map(|rotation: &IMat3| *rotation * PROBE)
        .collect::<HashSet<IVec3>>()
        .len()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        rand::prelude::*,
        std::{collections::HashMap, ops::RangeInclusive},
    };

    const RANGE: RangeInclusive<i32> = -1000_i32..=1000_i32;

    fn random_ivec3(rng: &mut ThreadRng) -> IVec3 {
        IVec3::new(
            rng.gen_range(RANGE),
            rng.gen_range(RANGE),
            rng.gen_range(RANGE),
        )
    }

    #[test]
    fn test_rotations_are_distinct() {
        assert_eq!(distinct_probe_images(rotations()), ROTATION_COUNT);
    }

    #[test]
    fn test_rotations_are_closed_under_composition() {
        for rotation_a in rotations() {
            for rotation_b in rotations() {
                let composition: IMat3 = *rotation_a * *rotation_b;

                assert!(
                    rotations()
                        .iter()
                        .any(|rotation: &IMat3| *rotation == composition),
                    "composition {composition:#?} is not a catalog member"
                );
            }
        }
    }

    #[test]
    fn test_rotations_contain_inverses() {
        for rotation in rotations() {
            let inverse: IMat3 = rotation.inverse();

            assert_eq!(inverse, rotation.transpose());
            assert!(rotations()
                .iter()
                .any(|rotation: &IMat3| *rotation == inverse));
        }
    }

    #[test]
    fn test_rotations_preserve_squared_norm() {
        const ITERATIONS: usize = 100_usize;

        let mut rng: ThreadRng = rand::thread_rng();

        for _ in 0_usize..ITERATIONS {
            let ivec3: IVec3 = random_ivec3(&mut rng);

            for rotation in rotations() {
                assert_eq!(
                    (*rotation * ivec3).length_squared(),
                    ivec3.length_squared(),
                    "\nrotation: {rotation:#?},\nivec3: {ivec3}"
                );
            }
        }
    }

    #[test]
    fn test_rotations_preserve_pairwise_squared_distance_multiset() {
        const POINTS: usize = 8_usize;

        fn squared_distance_counts(points: &[IVec3]) -> HashMap<i32, usize> {
            let mut counts: HashMap<i32, usize> = HashMap::new();

            for start in 0_usize..points.len().saturating_sub(1_usize) {
                for end in start + 1_usize..points.len() {
                    *counts
                        .entry((points[end] - points[start]).length_squared())
                        .or_insert(0_usize) += 1_usize;
                }
            }

            counts
        }

        let mut rng: ThreadRng = rand::thread_rng();
        let points: Vec<IVec3> = (0_usize..POINTS)
            .map(|_| random_ivec3(&mut rng))
            .collect();
        let counts: HashMap<i32, usize> = squared_distance_counts(&points);

        for rotation in rotations() {
            let rotated_points: Vec<IVec3> = points
                .iter()
                .map(|point: &IVec3| *rotation * *point)
                .collect();

            assert_eq!(squared_distance_counts(&rotated_points), counts);
        }
    }
}
