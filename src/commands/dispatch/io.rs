//! Input and output streams for a session

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::Path;

use tracing::debug;
use trains_core::error::{Result, TrainsError};

/// Banner shown when commands are typed at a terminal
const BANNER: &[&str] = &[
    "#",
    "# Enter your search command:",
    "#  * (type 'help' for help, 'exit' or Ctrl-D to quit)",
    "#",
];

/// Open the command source; `None` reads stdin
pub(super) fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "open_input");
            let file = File::open(path)
                .map_err(|e| TrainsError::io_operation("open input", path.display(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            if io::stdin().is_terminal() {
                print_banner();
            }
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Open the result sink; `None` writes to stdout
pub(super) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "open_output");
            let file = File::create(path)
                .map_err(|e| TrainsError::io_operation("create output", path.display(), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn print_banner() {
    eprintln!();
    for line in BANNER {
        eprintln!("{line}");
    }
    eprintln!();
}
