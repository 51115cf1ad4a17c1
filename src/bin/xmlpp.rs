//! Command-line XML pretty-printer.
//!
//! Reads each input, parses it, and prints the re-serialized document:
//! entity escapes normalized, a declaration line added when missing, and
//! long tags wrapped at 80 columns.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use minixml::{serialize, Document};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// xmlpp -- parse and pretty-print XML files.
#[derive(Parser, Debug)]
#[command(name = "xmlpp", version, about, long_about = None)]
struct Cli {
    /// XML files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Print parser warnings to stderr.
    #[arg(long)]
    verbose: bool,

    /// Parse only; do not print the result.
    #[arg(long)]
    check: bool,

    /// Save output to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<String>,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_PARSE_ERROR: u8 = 1;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut worst_exit: u8 = EXIT_SUCCESS;

    for file in &cli.files {
        let exit = process_file(&cli, file);
        if exit > worst_exit {
            worst_exit = exit;
        }
    }

    ExitCode::from(worst_exit)
}

/// Processes a single input file and returns an exit code.
fn process_file(cli: &Cli, filename: &str) -> u8 {
    let input = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{filename}: failed to read: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    let doc = match Document::parse_bytes(&input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return EXIT_PARSE_ERROR;
        }
    };

    if cli.verbose {
        for diag in &doc.diagnostics {
            eprintln!("{filename}: {diag}");
        }
    }

    if !cli.check {
        let mut output = serialize(&doc);
        output.push('\n');
        write_output(cli, &output);
    }

    EXIT_SUCCESS
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Reads input bytes from a file or stdin (when filename is `-`).
fn read_input(filename: &str) -> io::Result<Vec<u8>> {
    if filename == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(filename)
    }
}

/// Writes output to stdout or to the file specified by --output.
fn write_output(cli: &Cli, content: &str) {
    if let Some(ref output_file) = cli.output {
        if let Err(e) = fs::write(output_file, content) {
            eprintln!("{output_file}: failed to write: {e}");
        }
    } else {
        print!("{content}");
        let _ = io::stdout().flush();
    }
}
