//! Binary entry point for the speechlet harness.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    speechlet_harness::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
