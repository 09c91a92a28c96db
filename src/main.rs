use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use statelang_config::DataFlowDef;
use statelang_dataflow::DataFlow;

/// Statelang - state input/output processing for States-Language workflows
#[derive(Parser)]
#[command(name = "statelang")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log at debug level unless RUST_LOG says otherwise
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Compute a state's effective input (InputPath, then Parameters)
  Input {
    /// State definition to take InputPath and Parameters from
    #[arg(long)]
    state: Option<PathBuf>,

    /// InputPath, overriding the state definition ("" discards the input)
    #[arg(long)]
    input_path: Option<String>,

    /// File holding the Parameters template, overriding the state definition
    #[arg(long)]
    parameters: Option<PathBuf>,

    /// Raw state input (default: stdin)
    document: Option<PathBuf>,
  },

  /// Compute a state's effective output (ResultPath, then OutputPath)
  Output {
    /// State definition to take ResultPath and OutputPath from
    #[arg(long)]
    state: Option<PathBuf>,

    /// ResultPath, overriding the state definition ("" discards the result)
    #[arg(long)]
    result_path: Option<String>,

    /// OutputPath, overriding the state definition ("" discards the output)
    #[arg(long)]
    output_path: Option<String>,

    /// File holding the task result (default: no result)
    #[arg(long)]
    result: Option<PathBuf>,

    /// State input (default: stdin)
    document: Option<PathBuf>,
  },

  /// Merge a task result into the state input and print the whole document
  Merge {
    /// Where to place the result
    #[arg(long)]
    result_path: String,

    /// File holding the task result
    #[arg(long)]
    result: PathBuf,

    /// State input (default: stdin)
    document: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let flow = DataFlow::new();

  match cli.command {
    Some(Commands::Input {
      state,
      input_path,
      parameters,
      document,
    }) => {
      let def = load_definition(state.as_deref())?;
      let input_path = input_path.unwrap_or(def.input_path.clone());
      let parameters = match parameters {
        Some(path) => read_file(&path)?,
        None => def.parameters_text(),
      };
      let raw_input = read_document(document.as_deref())?;

      let input = flow
        .effective_input(&raw_input, &input_path, &parameters)
        .context("failed to compute effective input")?;
      println!("{}", input);
    }
    Some(Commands::Output {
      state,
      result_path,
      output_path,
      result,
      document,
    }) => {
      let def = load_definition(state.as_deref())?;
      let result_path = result_path.unwrap_or(def.result_path.clone());
      let output_path = output_path.unwrap_or(def.output_path.clone());
      let state_result = match result {
        Some(path) => read_file(&path)?,
        None => String::new(),
      };
      let state_input = read_document(document.as_deref())?;

      let output = flow
        .effective_output(&state_input, &state_result, &result_path, &output_path)
        .context("failed to compute effective output")?;
      println!("{}", output);
    }
    Some(Commands::Merge {
      result_path,
      result,
      document,
    }) => {
      let state_result = read_file(&result)?;
      let state_input = read_document(document.as_deref())?;

      let merged = flow
        .merge_result(&state_input, &state_result, &result_path)
        .context("failed to merge state result")?;
      println!("{}", merged);
    }
    None => {
      println!("statelang - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn load_definition(path: Option<&Path>) -> Result<DataFlowDef> {
  let Some(path) = path else {
    return Ok(DataFlowDef::default());
  };

  let text = read_file(path)?;
  let def = DataFlowDef::from_json(&text)
    .with_context(|| format!("failed to parse state definition: {}", path.display()))?;
  def
    .validate()
    .with_context(|| format!("invalid state definition: {}", path.display()))?;

  debug!(
    path = %path.display(),
    input_path = %def.input_path,
    result_path = %def.result_path,
    output_path = %def.output_path,
    "loaded state definition"
  );
  Ok(def)
}

fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

fn read_document(path: Option<&Path>) -> Result<String> {
  use std::io::IsTerminal;

  if let Some(path) = path {
    return read_file(path);
  }

  if io::stdin().is_terminal() {
    // No stdin pipe, use empty object
    return Ok("{}".to_string());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read document from stdin")?;
  Ok(input)
}
