use clap::*;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::io::{BufRead, Write};
use trdump::libs::command::ReadRange;
use trdump::libs::dump::{load_range, load_single};
use trdump::libs::error::DumpError;
use trdump::libs::model::{sort_canonical, ReadDump, SelfAlignment};
use trdump::libs::path::{extract_paths, PathGlyphs};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("paths")
        .about("Trimmed edit paths of self alignments")
        .after_help(
            r###"
Extracts the alignment path of selected self alignments, trims the part of
the bands outside the alignment and encodes each column as one of

    =  match       I  insertion (gap in A)
    D  deletion (gap in B)      X  mismatch

Output, one line per alignment with a path:

    <read_id>  <ab>  <ae>  <bb>  <be>  <cigar>  <identity>  [<aseq>  <bseq>]

Which alignments get a path:
* default: all self alignments of each read
* --slope-tolerance T: only those with |slope - 1| <= T
* --cover FILE: the alignments listed in FILE, TSV `read_id ab ae bb be`

Alignments the path dump does not show are left out.

Examples:
1. All alignments of reads 1 to 200, 8 reads at a time:
   trdump paths --db reads.db --las TAN.reads.las --end 200 --parallel 8

2. Saved dumps, clean alignments only, with the aligned sequences:
   trdump paths --aln-dump ladump.txt --path-dump lashow.txt --read 42 \
       --slope-tolerance 0.05 --seq

"###,
        )
        .args(super::source_args())
        .args(super::range_args())
        .arg(
            Arg::new("cover")
                .long("cover")
                .num_args(1)
                .help("Alignments to extract, TSV `read_id ab ae bb be`"),
        )
        .arg(
            Arg::new("slope_tolerance")
                .long("slope-tolerance")
                .num_args(1)
                .value_parser(value_parser!(f64))
                .conflicts_with("cover")
                .help("Only alignments with |slope - 1| within this bound"),
        )
        .arg(
            Arg::new("filler")
                .long("filler")
                .num_args(1)
                .default_value(".")
                .value_parser(value_parser!(char))
                .help("Glyph padding the bands beyond the read ends"),
        )
        .arg(
            Arg::new("match")
                .long("match")
                .num_args(1)
                .default_value("|")
                .value_parser(value_parser!(char))
                .help("Glyph of an exact match in the symbol band"),
        )
        .arg(
            Arg::new("gap")
                .long("gap")
                .num_args(1)
                .default_value("-")
                .value_parser(value_parser!(char))
                .help("Gap glyph in the sequence bands"),
        )
        .arg(
            Arg::new("seq")
                .long("seq")
                .action(ArgAction::SetTrue)
                .help("Also write the trimmed A and B sequences"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of reads processed at once"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let (handles, source) = super::make_source(args)?;
    let open_end = args.contains_id("tr_dump")
        || args.contains_id("aln_dump")
        || args.contains_id("path_dump");
    let range = super::read_range(args, open_end)?;

    let glyphs = PathGlyphs {
        filler: ascii_glyph(args, "filler")?,
        matched: ascii_glyph(args, "match")?,
        gap: ascii_glyph(args, "gap")?,
        ..Default::default()
    };
    let slope_tolerance = args.get_one::<f64>("slope_tolerance").copied();
    let is_seq = args.get_flag("seq");
    let parallel = *args.get_one::<usize>("parallel").unwrap();
    let mut writer = trdump::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Cover sets
    //----------------------------
    let covers: BTreeMap<u64, Vec<SelfAlignment>> = match args.get_one::<String>("cover") {
        Some(file) => read_cover(file, &range)?,
        None => {
            let dumps = if range.start == range.end {
                vec![load_single(range.start, &handles, source.as_ref())?]
            } else {
                load_range(range.start, range.end, &handles, source.as_ref())?
            };
            covers_from_dumps(&dumps, slope_tolerance)
        }
    };
    log::info!(
        "{} alignments in the cover sets of {} reads",
        covers.values().map(|c| c.len()).sum::<usize>(),
        covers.len()
    );

    //----------------------------
    // Ops
    //----------------------------
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()?;

    let source = source.as_ref();
    let results = pool.install(|| {
        covers
            .par_iter()
            .map(|(read_id, cover)| -> Result<_, DumpError> {
                let keys: HashSet<SelfAlignment> = cover.iter().copied().collect();
                let mut paths = extract_paths(*read_id, &keys, &handles, source, &glyphs)?;
                // Canonical order, alignments without a path dropped
                let found: Vec<_> = cover
                    .iter()
                    .filter_map(|aln| paths.remove(aln).map(|path| (*aln, path)))
                    .collect();
                Ok((*read_id, found))
            })
            .collect::<Result<Vec<_>, DumpError>>()
    })?;

    //----------------------------
    // Output
    //----------------------------
    for (read_id, found) in &results {
        for (aln, path) in found {
            writer.write_fmt(format_args!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{:.4}",
                read_id,
                aln.ab,
                aln.ae,
                aln.bb,
                aln.be,
                path.cigar(),
                path.identity()
            ))?;
            if is_seq {
                writer.write_fmt(format_args!("\t{}\t{}", path.aseq, path.bseq))?;
            }
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;

    Ok(())
}

fn ascii_glyph(args: &ArgMatches, name: &str) -> anyhow::Result<u8> {
    let glyph = *args.get_one::<char>(name).unwrap();
    if !glyph.is_ascii() {
        anyhow::bail!("--{} must be an ASCII character, got `{}`", name, glyph);
    }
    Ok(glyph as u8)
}

/// Every alignment of each read, or only the clean ones.
fn covers_from_dumps(
    dumps: &[ReadDump],
    slope_tolerance: Option<f64>,
) -> BTreeMap<u64, Vec<SelfAlignment>> {
    let mut covers = BTreeMap::new();
    for dump in dumps {
        let cover: Vec<SelfAlignment> = dump
            .alignments
            .iter()
            .filter(|aln| match slope_tolerance {
                None => true,
                Some(tolerance) => match aln.is_slope_normal(tolerance) {
                    Ok(normal) => normal,
                    Err(e) => {
                        log::warn!("Read {}: {}", dump.id, e);
                        false
                    }
                },
            })
            .copied()
            .collect();
        if !cover.is_empty() {
            covers.insert(dump.id, cover);
        }
    }
    covers
}

/// Reads `read_id ab ae bb be` lines; other columns are ignored.
fn read_cover(file: &str, range: &ReadRange) -> anyhow::Result<BTreeMap<u64, Vec<SelfAlignment>>> {
    let mut covers: BTreeMap<u64, Vec<SelfAlignment>> = BTreeMap::new();

    for line in trdump::reader(file)?.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            anyhow::bail!("Invalid cover line (expected >= 5 fields): {}", line);
        }
        let read_id: u64 = fields[0]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid read ID in cover line: {}", line))?;
        let mut v = [0i64; 4];
        for (slot, field) in v.iter_mut().zip(&fields[1..5]) {
            *slot = field
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid coordinate in cover line: {}", line))?;
        }

        if range.contains(read_id) {
            covers
                .entry(read_id)
                .or_default()
                .push(SelfAlignment::new(v[0], v[1], v[2], v[3]));
        }
    }

    for cover in covers.values_mut() {
        sort_canonical(cover);
        cover.dedup();
    }
    Ok(covers)
}
