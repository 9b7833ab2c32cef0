mod args;
mod pipeline;

use clap::Parser;
use log::{info, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let res = pipeline::settings_from_args(&args).and_then(|settings| {
        info!("settings: {:?}", settings);
        pipeline::run_batch(&settings)
    });
    match res {
        Ok(written) => {
            info!("Wrote {} index files", written.len());
        }
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut source = std::error::Error::source(e.as_ref());
            while let Some(s) = source {
                eprintln!("  caused by: {}", s);
                source = s.source();
            }
            if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
