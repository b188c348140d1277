/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dis8080::cli::Cli;
use dis8080::config::{Config, Sink, Source};

fn run(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let input: Box<dyn io::BufRead> = match config.source {
        Source::Stdin => Box::new(stdin.lock()),
        Source::File(ref path) => {
            info!("reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("cannot open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
    };

    // decode fully before creating the output so a failed run leaves nothing behind
    let mut dis = dis8080::decode_all(input, &config.data_ranges)?;

    match config.sink {
        Sink::Stdout => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            dis8080::write_listing(&mut dis, &mut out)?;
            out.flush()?;
        }
        Sink::File(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output {}", path.display()))?;
            let mut out = BufWriter::new(file);
            dis8080::write_listing(&mut dis, &mut out)
                .with_context(|| format!("cannot write {}", path.display()))?;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let result = cli
        .config()
        .map_err(anyhow::Error::from)
        .and_then(|config| run(&config));
    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
