mod cli;
mod engine;
mod error_handling;
mod grammar;
mod parser;

use std::io::BufRead;
use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let grammar = match parser::parse_file(&args.file, args.start) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    // Answer one query per line until the sentinel
    for line in std::io::stdin().lock().lines() {
        let Ok(query) = line else { break };
        if query == "q" {
            break;
        }
        println!("{}", engine::recognize(&grammar, &query));
    }

    ExitCode::SUCCESS
}
