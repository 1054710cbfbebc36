use std::{env, process};

use budget_pulse::{cli, init};

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = cli::run_cli(&args) {
        cli::report_error(&err);
        process::exit(1);
    }
}
