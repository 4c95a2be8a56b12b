//! Command-line driver: read a source file, parse it, print the tree.

mod error;

use std::env;
use std::fs;

use error::{CliError, Result};

fn main() -> Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "main.tl".to_string());
    let source =
        fs::read_to_string(&path).map_err(|source| CliError::Open { path, source })?;

    println!("{source}");

    let tokens = tael::tokenize(&source)?;
    let program = tael::parse_tokens(tokens)?;
    print!("{program}");

    Ok(())
}
