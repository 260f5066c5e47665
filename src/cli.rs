use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the CNF grammar
    pub file: PathBuf,

    /// Start symbol (default: left-hand side of the first rule)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>
}
