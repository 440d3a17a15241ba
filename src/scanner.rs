use {
    crate::*,
    glam::IVec3,
    nom::{
        bytes::complete::tag,
        character::complete::{digit1, line_ending},
        combinator::{map, map_res, opt},
        multi::many1,
        sequence::{delimited, terminated, tuple},
        IResult,
    },
    std::str::FromStr,
};

/// One sensor report: the scanner's id and the beacons it sees, as exact integer coordinates in
/// the scanner's own unknown frame.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Scanner {
    id: u16,
    beacons: Vec<IVec3>,
}

impl Scanner {
    pub fn new(id: u16, beacons: Vec<IVec3>) -> Self {
        Self { id, beacons }
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn beacons(&self) -> &[IVec3] {
        &self.beacons
    }
}

pub fn parse_ivec3<'i>(input: &'i str) -> IResult<&'i str, IVec3> {
    map(
        tuple((
            terminated(parse_integer::<i32>, tag(",")),
            terminated(parse_integer::<i32>, tag(",")),
            parse_integer::<i32>,
        )),
        |(x, y, z)| IVec3 { x, y, z },
    )(input)
}

impl Parse for Scanner {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                delimited(
                    tag("--- scanner "),
                    map_res(digit1, u16::from_str),
                    tuple((tag(" ---"), line_ending)),
                ),
                many1(terminated(parse_ivec3, opt(line_ending))),
            )),
            |(id, beacons)| Self { id, beacons },
        )(input)
    }
}
