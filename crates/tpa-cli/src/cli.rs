use clap::{Arg, ArgAction, Command};

pub fn build() -> Command {
    Command::new("tpa")
        .about("Transfer path analysis: response, path contributions, SVD conditioning and KPIs")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .help("Emit logs as JSON lines on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .global(true)
                .help("Pretty-print the JSON written to stdout")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("compute")
                .about("Run the full analysis and print the result record")
                .arg(
                    Arg::new("request")
                        .long("request")
                        .value_name("FILE")
                        .help("JSON request body ({\"frequencyBand\", \"target\", ...})"),
                )
                .arg(
                    Arg::new("band")
                        .long("band")
                        .value_name("LABEL")
                        .help("Frequency band label, echoed in the result"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .value_name("LABEL")
                        .help("Target position label, echoed in the result"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("TOML configuration file"),
                )
                .arg(seed_arg("transfer-seed", "Seed for the transfer-function matrix"))
                .arg(seed_arg("force-seed", "Seed for the operational-force matrix"))
                .arg(seed_arg("measurement-seed", "Seed for the reference response"))
                .arg(
                    Arg::new("metrics")
                        .long("metrics")
                        .help("Print Prometheus text exposition of the result to stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("svd")
                .about("Analyze the conditioning of a caller-supplied matrix")
                .arg(
                    Arg::new("matrix")
                        .long("matrix")
                        .value_name("FILE")
                        .required(true)
                        .help("JSON file of the form {\"matrix\": [[...], ...]}"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("TOML configuration file"),
                ),
        )
        .subcommand(Command::new("catalog").about("Print the path and frequency band catalogs"))
}

fn seed_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("SEED")
        .help(help)
        .value_parser(clap::value_parser!(u64))
}
