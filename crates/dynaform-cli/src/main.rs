//! Dynaform CLI
//!
//! Command-line tool for working with form definition files.
//!
//! ## Usage
//!
//! ```bash
//! dynaform check demos/signup.toml
//! dynaform schema demos/signup.toml
//! dynaform render demos/signup.toml --values demos/signup-values.json --page
//! dynaform validate demos/signup.toml demos/signup-values.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{Definition, Validation};
use dynaform_conf::DEFAULT_ENV_PREFIX;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dynaform")]
#[command(about = "Check, validate and render configuration-driven forms", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,

	/// Prefix of environment variables overriding definition keys
	#[arg(long, value_name = "PREFIX", default_value = DEFAULT_ENV_PREFIX, global = true)]
	env_prefix: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Load a form definition and list its fields
	Check {
		/// Form definition file (.toml or .json)
		#[arg(value_name = "CONFIG")]
		config: PathBuf,
	},

	/// Print the validation schema derived from a form definition
	Schema {
		#[arg(value_name = "CONFIG")]
		config: PathBuf,
	},

	/// Render a form definition as HTML
	Render {
		#[arg(value_name = "CONFIG")]
		config: PathBuf,

		/// JSON object of field values to apply before rendering
		#[arg(long, value_name = "FILE")]
		values: Option<PathBuf>,

		/// Wrap the form in a standalone HTML page
		#[arg(long)]
		page: bool,
	},

	/// Submit field values against a form definition
	Validate {
		#[arg(value_name = "CONFIG")]
		config: PathBuf,

		/// JSON object of field values
		#[arg(value_name = "VALUES")]
		values: PathBuf,
	},
}

fn setup_logging(verbosity: u8) {
	let filter = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
		)
		.init();
}

/// Run the command. `Ok(false)` means the command ran but the input failed
/// validation.
fn run(cli: Cli) -> anyhow::Result<bool> {
	match cli.command {
		Commands::Check { config } => {
			let definition = Definition::load(&config, &cli.env_prefix)?;
			for line in commands::check(&definition) {
				println!("  {}", line);
			}
			println!(
				"{} {} ({} fields)",
				"OK".green().bold(),
				config.display(),
				definition.fields.len()
			);
			Ok(true)
		}
		Commands::Schema { config } => {
			let definition = Definition::load(&config, &cli.env_prefix)?;
			println!("{}", commands::schema(&definition)?);
			Ok(true)
		}
		Commands::Render {
			config,
			values,
			page,
		} => {
			let definition = Definition::load(&config, &cli.env_prefix)?;
			let values = values.as_deref().map(commands::read_values).transpose()?;
			println!("{}", commands::render(definition, values, page)?);
			Ok(true)
		}
		Commands::Validate { config, values } => {
			let definition = Definition::load(&config, &cli.env_prefix)?;
			let values = commands::read_values(&values)?;
			match commands::validate(definition, values)? {
				Validation::Accepted(values) => {
					println!("{}", serde_json::to_string_pretty(&values)?);
					Ok(true)
				}
				Validation::Rejected(errors) => {
					for (name, message) in &errors {
						eprintln!("{} {}: {}", "Invalid".red().bold(), name.yellow(), message);
					}
					eprintln!(
						"{} {} field(s) failed validation",
						"Error".red(),
						errors.len().to_string().red()
					);
					Ok(false)
				}
			}
		}
	}
}

fn main() {
	let cli = Cli::parse();
	setup_logging(cli.verbosity);
	tracing::debug!(env_prefix = %cli.env_prefix, "dynaform starting");

	match run(cli) {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			eprintln!("{}: {:#}", "Error".red(), e);
			process::exit(1);
		}
	}
}
