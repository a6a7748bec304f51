//! Summarizer server binary.
//! Run with: cargo run --bin summarizer-server

use std::process::ExitCode;

use summarizer_service::start_summarizer;

fn main() -> ExitCode {
    start_summarizer::run()
}
