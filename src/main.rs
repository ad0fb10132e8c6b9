use argh::FromArgs;
use parsh::{Interpreter, report_error};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::exit;

#[derive(FromArgs)]
/// A line-oriented command interpreter. Reads commands from standard input
/// when no file is given, or from a batch file.
struct Args {
    #[argh(positional)]
    /// batch file to execute; interactive mode when omitted
    script: Option<PathBuf>,
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let rest: Vec<&str> = argv.iter().skip(1).map(String::as_str).collect();
    let name = argv.first().map(String::as_str).unwrap_or("parsh");

    // Parsed explicitly (not from_env) so a bad invocation produces the
    // interpreter's fixed diagnostic instead of argh usage text.
    let args = match Args::from_args(&[name], &rest) {
        Ok(args) => args,
        Err(_) => {
            report_error();
            exit(1);
        }
    };

    let mut interpreter = Interpreter::default();
    let outcome = match args.script {
        Some(path) => match File::open(&path) {
            Ok(file) => interpreter.run_batch(BufReader::new(file)),
            Err(_) => {
                report_error();
                exit(1);
            }
        },
        None => interpreter.repl(),
    };

    if outcome.is_err() {
        report_error();
        exit(1);
    }
}
