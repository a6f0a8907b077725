use clap::*;
use trdump::libs::command::{alignment_dump, path_dump, tr_dump, Handles};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("command")
        .about("Show the dump tool calls for a read range")
        .after_help(
            r###"
Prints the three external calls `reads` and `paths` issue, one per line:
the tandem repeat dump, the self alignment dump and, for each read, the
alignment path dump.

Examples:
1. A range of reads:
   trdump command reads.db TAN.reads.las --start 1 --end 100

2. A single read, TRs from the `dust` track:
   trdump command reads.db TAN.reads.las --read 42 --track dust

"###,
        )
        .arg(
            Arg::new("db")
                .required(true)
                .index(1)
                .help("DAZZ_DB .db file of the reads"),
        )
        .arg(
            Arg::new("las")
                .required(true)
                .index(2)
                .help("TAN.*.las file produced by datander"),
        )
        .arg(
            Arg::new("track")
                .long("track")
                .num_args(1)
                .default_value("tan")
                .help("Mask track holding the tandem repeat intervals"),
        )
        .args(super::range_args())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let db = args.get_one::<String>("db").unwrap();
    let las = args.get_one::<String>("las").unwrap();
    let track = args.get_one::<String>("track").unwrap();
    let range = super::read_range(args, false)?;

    let handles = Handles::new(db, las).with_track(track);

    //----------------------------
    // Output
    //----------------------------
    println!("{}", tr_dump(&handles, range));
    println!("{}", alignment_dump(&handles, range));
    println!("{}", path_dump(&handles, range.start));
    if range.start != range.end {
        println!("# ... one path dump per read through {}", range.end);
    }

    Ok(())
}
