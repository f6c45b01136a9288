// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use driverkit::cancellation::install_signal_handlers;
use driverkit::commands::resolve::ResolveCommand;
use driverkit::commands::script::ScriptCommand;
use driverkit::commands::targets::TargetsCommand;
use driverkit::commands::{BuildArgs, DriverArgs};
use driverkit::config::DriverkitConfig;
use driverkit::error::{Result, format_error_chain, get_exit_code};
use driverkit::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "driverkit")]
#[command(author, version, about = "Kernel driver build script generator", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the build script for a kernel release
    Script {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        driver: DriverArgs,

        /// Write the script to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Resolve kernel package download URLs
    Resolve {
        #[command(flatten)]
        build: BuildArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List supported targets
    Targets {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn main() {
    let cli = Cli::parse();

    setup_logger(&cli);

    let config = match DriverkitConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Script {
            build,
            driver,
            output,
        } => {
            let command =
                ScriptCommand::new(&config)?.with_cancellation(install_signal_handlers()?);
            command.execute(&build, &driver, output.as_deref())
        }
        Commands::Resolve { build, json } => {
            let command =
                ResolveCommand::new(&config)?.with_cancellation(install_signal_handlers()?);
            command.execute(&build, json)
        }
        Commands::Targets { json } => {
            let command = TargetsCommand::new(&config)?;
            command.execute(json)
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
