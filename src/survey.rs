use {
    crate::*,
    nom::{
        character::complete::line_ending,
        combinator::{map_opt, opt},
        error::Error,
        multi::separated_list1,
        sequence::terminated,
        Err, IResult,
    },
};

/// A full set of scanner reports for one region, in input order. Scanner ids are sequential from
/// 0, so a scanner's id doubles as its index; scanner 0 anchors the global frame.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Survey {
    scanners: Vec<Scanner>,

    #[cfg(test)]
    minimum_overlapping_beacons: usize,
}

impl Survey {
    #[inline]
    pub fn scanners(&self) -> &[Scanner] {
        &self.scanners
    }

    pub fn overlap_graph(&self) -> OverlapGraph {
        OverlapGraph::build(&self.scanners, self.minimum_overlapping_beacons())
    }

    pub fn try_global_frame(&self) -> Result<GlobalFrame, DisconnectedGraphError> {
        GlobalFrame::try_from_scanners_and_graph(&self.scanners, &self.overlap_graph())
    }

    #[inline(always)]
    fn minimum_overlapping_beacons(&self) -> usize {
        #[cfg(test)]
        let minimum_overlapping_beacons: usize = self.minimum_overlapping_beacons;

        #[cfg(not(test))]
        let minimum_overlapping_beacons: usize = MINIMUM_OVERLAPPING_BEACONS;

        minimum_overlapping_beacons
    }
}

impl Parse for Survey {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map_opt(
            terminated(
                separated_list1(line_ending, Scanner::parse),
                opt(line_ending),
            ),
            |scanners: Vec<Scanner>| {
                scanners
                    .iter()
                    .enumerate()
                    .all(|(index, scanner)| scanner.id() as usize == index)
                    .then(|| Self {
                        scanners,

                        #[cfg(test)]
                        minimum_overlapping_beacons: MINIMUM_OVERLAPPING_BEACONS,
                    })
            },
        )(input)
    }
}

impl<'i> TryFrom<&'i str> for Survey {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}
