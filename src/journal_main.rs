use std::process::ExitCode;

use moodlog::journal::run_journal;

fn main() -> ExitCode {
    run_journal()
}
