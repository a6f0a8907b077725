use clap::*;
use std::io::Write;
use trdump::libs::dump::{load_range, load_single};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("reads")
        .about("Tandem repeat intervals and self alignments per read")
        .after_help(
            r###"
Reads the tandem repeat track and the datander self alignments of a range of
reads and writes one line per record, reads in ascending order:

    <read_id>  TR   <start>  <end>
    <read_id>  ALN  <ab>  <ae>  <bb>  <be>  <distance>  <slope>

Alignments of a read are grouped by distance (ab - bb), then ordered by ab.
A degenerate alignment (be == bb) has slope NA.

Examples:
1. Run DBdump and LAdump for reads 1 to 1000:
   trdump reads --db reads.db --las TAN.reads.las --start 1 --end 1000

2. Parse saved dumps, only read 42:
   trdump reads --tr-dump dbdump.txt --aln-dump ladump.txt.gz --read 42

"###,
        )
        .args(super::source_args())
        .args(super::range_args())
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
    let open_end = args.contains_id("tr_dump") || args.contains_id("aln_dump");
    let range = super::read_range(args, open_end)?;
    let mut writer = trdump::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    let dumps = if range.start == range.end {
        let dump = load_single(range.start, &handles, source.as_ref())?;
        if dump.trs.is_empty() && dump.alignments.is_empty() {
            vec![]
        } else {
            vec![dump]
        }
    } else {
        load_range(range.start, range.end, &handles, source.as_ref())?
    };
    log::info!("{} reads with tandem repeats or self alignments", dumps.len());

    //----------------------------
    // Output
    //----------------------------
    for dump in &dumps {
        for tr in &dump.trs {
            writer.write_fmt(format_args!("{}\tTR\t{}\t{}\n", dump.id, tr.start, tr.end))?;
        }
        for aln in &dump.alignments {
            let slope = match aln.slope() {
                Ok(slope) => format!("{:.3}", slope),
                Err(e) => {
                    log::warn!("{}", e);
                    "NA".to_string()
                }
            };
            writer.write_fmt(format_args!(
                "{}\tALN\t{}\t{}\t{}\t{}\t{}\t{}\n",
                dump.id,
                aln.ab,
                aln.ae,
                aln.bb,
                aln.be,
                aln.distance(),
                slope
            ))?;
        }
    }
    writer.flush()?;

    Ok(())
}
