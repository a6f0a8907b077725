extern crate clap;
use clap::*;

mod cmd_trdump;

fn main() -> anyhow::Result<()> {
    let app = Command::new("trdump")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`trdump` - Tandem repeats and self alignments from Dazzler dumps")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v info, -vv debug)"),
        )
        .subcommand(cmd_trdump::command::make_subcommand())
        .subcommand(cmd_trdump::reads::make_subcommand())
        .subcommand(cmd_trdump::paths::make_subcommand())
        .after_help(
            r###"Subcommands:

* command - Show the DBdump / LAdump / LAshow4pathplot calls for a read range
* reads   - Tandem repeat intervals and self alignments per read
* paths   - Trimmed edit paths of self alignments

Dumps are taken by running the Dazzler tools on --db/--las, or from saved
dump files given with --tr-dump, --aln-dump and --path-dump.

"###,
        );

    let matches = app.get_matches();

    env_logger::Builder::new()
        .filter_level(match matches.get_count("verbose") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("command", sub_matches)) => cmd_trdump::command::execute(sub_matches),
        Some(("reads", sub_matches)) => cmd_trdump::reads::execute(sub_matches),
        Some(("paths", sub_matches)) => cmd_trdump::paths::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
