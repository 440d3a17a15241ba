use beacon_map::*;

const SCANNERS_INPUT_FILE_PATH: &str = "input/scanners.txt";

fn run(survey: &Survey, verbose: bool) {
    match survey.try_global_frame() {
        Ok(global_frame) => {
            if verbose {
                for beacon in global_frame.distinct_beacons() {
                    println!("{},{},{}", beacon.x, beacon.y, beacon.z);
                }
            }

            println!(
                "distinct beacons: {}",
                global_frame.distinct_beacon_count()
            );
            println!(
                "largest manhattan distance between scanners: {}",
                global_frame.largest_manhattan_distance()
            );
        }
        Err(DisconnectedGraphError {
            unresolved_scanners,
        }) => {
            eprintln!(
                "Overlap graph is disconnected from scanner 0; unreached scanner ids: \
                {unresolved_scanners:?}"
            );
        }
    }
}

fn main() {
    let args: Args = Args::parse();

    // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're done
    // parsing it
    unsafe {
        open_utf8_file(
            args.input_file_path(SCANNERS_INPUT_FILE_PATH),
            |input: &str| match Survey::try_from(input) {
                Ok(survey) => run(&survey, args.verbose),
                Err(error) => eprintln!("Failed to parse scanner survey:\n{error:#?}"),
            },
        )
    }
    .unwrap_or_else(|error| {
        eprintln!("Failed to open UTF-8 file:\n{error}");
    });
}
