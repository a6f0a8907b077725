//! Subcommand modules for the `trdump` binary.

pub mod command;
pub mod paths;
pub mod reads;

use clap::{value_parser, Arg, ArgMatches};
use trdump::libs::command::{DumpSource, FileSource, Handles, ProcessSource, ReadRange};

/// Arguments naming where the dumps come from, shared by `reads` and `paths`
pub fn source_args() -> Vec<Arg> {
    vec![
        Arg::new("db")
            .long("db")
            .num_args(1)
            .help("DAZZ_DB .db file of the reads"),
        Arg::new("las")
            .long("las")
            .num_args(1)
            .help("TAN.*.las file produced by datander"),
        Arg::new("track")
            .long("track")
            .num_args(1)
            .default_value("tan")
            .help("Mask track holding the tandem repeat intervals"),
        Arg::new("tr_dump")
            .long("tr-dump")
            .num_args(1)
            .help("Saved `DBdump -r -h -mtan` output, instead of running DBdump"),
        Arg::new("aln_dump")
            .long("aln-dump")
            .num_args(1)
            .help("Saved `LAdump -c` output, instead of running LAdump"),
        Arg::new("path_dump")
            .long("path-dump")
            .num_args(1)
            .help("Saved `LAshow4pathplot -a` output, instead of running LAshow4pathplot"),
    ]
}

/// Arguments selecting reads
pub fn range_args() -> Vec<Arg> {
    vec![
        Arg::new("start")
            .long("start")
            .num_args(1)
            .default_value("1")
            .value_parser(value_parser!(u64))
            .help("First read ID"),
        Arg::new("end")
            .long("end")
            .num_args(1)
            .value_parser(value_parser!(u64))
            .help("Last read ID, inclusive. Required when running the tools"),
        Arg::new("read")
            .long("read")
            .num_args(1)
            .value_parser(value_parser!(u64))
            .conflicts_with_all(["start", "end"])
            .help("A single read ID"),
    ]
}

/// Handles and the source the dumps are read from.
///
/// Any saved dump switches to files; otherwise both `--db` and `--las` are needed.
pub fn make_source(args: &ArgMatches) -> anyhow::Result<(Handles, Box<dyn DumpSource>)> {
    let db = args.get_one::<String>("db");
    let las = args.get_one::<String>("las");
    let track = args.get_one::<String>("track").unwrap();

    let files = FileSource {
        tr_dump: args.get_one::<String>("tr_dump").cloned(),
        alignment_dump: args.get_one::<String>("aln_dump").cloned(),
        path_dump: args.get_one::<String>("path_dump").cloned(),
    };
    let use_files =
        files.tr_dump.is_some() || files.alignment_dump.is_some() || files.path_dump.is_some();

    if use_files {
        let handles = Handles::new(
            db.map(|s| s.as_str()).unwrap_or("-"),
            las.map(|s| s.as_str()).unwrap_or("-"),
        )
        .with_track(track);
        let source: Box<dyn DumpSource> = Box::new(files);
        return Ok((handles, source));
    }

    match (db, las) {
        (Some(db), Some(las)) => {
            let source: Box<dyn DumpSource> = Box::new(ProcessSource);
            Ok((Handles::new(db, las).with_track(track), source))
        }
        _ => anyhow::bail!("Give --db and --las, or saved dumps with --tr-dump/--aln-dump/--path-dump"),
    }
}

/// The read range from `--read`, or `--start`/`--end`.
///
/// Saved dumps may leave `--end` open.
pub fn read_range(args: &ArgMatches, open_end: bool) -> anyhow::Result<ReadRange> {
    if let Some(read) = args.get_one::<u64>("read") {
        return Ok(ReadRange::single(*read));
    }

    let start = *args.get_one::<u64>("start").unwrap();
    let end = match args.get_one::<u64>("end") {
        Some(end) => *end,
        None if open_end => u64::MAX,
        None => anyhow::bail!("--end is required when running the dump tools"),
    };

    Ok(ReadRange::new(start, end)?)
}
