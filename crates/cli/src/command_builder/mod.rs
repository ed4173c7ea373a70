use clap::builder::{OsStringValueParser, PossibleValuesParser};
use clap::{Arg, ArgAction, Command as ClapCommand};

pub(crate) const ALGORITHMS: [&str; 3] = ["sha1", "sha256", "sha512"];
pub(crate) const BACKENDS: [&str; 6] = ["auto", "avx512", "avx2", "sse2", "neon", "scalar"];

fn algorithm_arg() -> Arg {
    Arg::new("algorithm")
        .long("algorithm")
        .short('a')
        .value_name("ALGO")
        .help("Hash algorithm.")
        .value_parser(PossibleValuesParser::new(ALGORITHMS))
        .default_value("sha256")
}

pub(crate) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("SHA-1/256/512 hashing with lane-parallel SIMD batching")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more detail.")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .value_name("NAME")
                .help("Pin the vector backend instead of detecting the widest one.")
                .value_parser(PossibleValuesParser::new(BACKENDS))
                .default_value("auto")
                .global(true),
        )
        .subcommand(
            ClapCommand::new("digest")
                .about("Print the digest of each FILE, or of standard input.")
                .arg(algorithm_arg())
                .arg(
                    Arg::new("double")
                        .long("double")
                        .short('d')
                        .help("Hash each digest once more (SHA-256 and SHA-512 only).")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("files")
                        .value_name("FILE")
                        .help("Files to hash; '-' reads standard input.")
                        .value_parser(OsStringValueParser::new())
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            ClapCommand::new("merkle")
                .about("Compute the Merkle root of hex leaves, one per line.")
                .arg(algorithm_arg())
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Leaf file; standard input when omitted.")
                        .value_parser(OsStringValueParser::new()),
                ),
        )
        .subcommand(
            ClapCommand::new("backend").about("Show the active vector backend and lane counts."),
        )
}
