use clap::Parser;

/// The `Cli` struct provides the command-line interface for the `gazetteer` library.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The `catalog` field specifies the path to the location catalog CSV, with columns
    /// `location_id`, `street`, `city`, `state` and `postal_code`.
    #[arg(short = 'c', long, help = "Path to the location catalog.")]
    pub catalog: std::path::PathBuf,
    /// The `address` field holds a single free-text address to resolve.
    #[arg(short = 'a', long, help = "Address to resolve.")]
    pub address: Option<String>,
    /// The `stdin` flag instructs the program to resolve each line of standard input instead of
    /// a single address.
    #[arg(
        short = 'i',
        long,
        help = "Resolve each line of standard input.",
        default_value = "false",
        default_missing_value = "true"
    )]
    pub stdin: bool,
    /// The `pretty` flag switches output to indented JSON.
    #[arg(
        short = 'p',
        long,
        help = "Pretty-print the JSON output.",
        default_value = "false",
        default_missing_value = "true"
    )]
    pub pretty: bool,
}
