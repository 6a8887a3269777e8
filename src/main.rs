use clap::{Parser, Subcommand};
use dot_notation::{PathAccessor, Result};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Read and edit a JSON document with dot-notation paths.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON document (string). You can also pipe a file using shell quoting.
    json: String,
    /// Path delimiter
    #[arg(long, default_value = ".")]
    delimiter: String,
    /// Token that matches every key at its level
    #[arg(long, default_value = "*")]
    wildcard: String,
    /// What `get` does on a miss: default, found or exception
    #[arg(long, default_value = "default")]
    mode: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value at a path (an array for wildcard paths)
    Get {
        path: String,
        /// Fallback JSON for misses (optional)
        #[arg(long)]
        default: Option<String>,
    },
    /// Print whether a path exists
    Has { path: String },
    /// Assign a JSON value and print the document
    Set { path: String, value: String },
    /// Delete a path and print the document
    Remove { path: String },
    /// Deep-merge a JSON collection into a path and print the document
    Merge { path: String, value: String },
}

// Arguments that are not valid JSON are taken as plain strings.
fn json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn run(args: Args) -> Result<Value> {
    let mut accessor = PathAccessor::from_json(&args.json)?;
    accessor
        .set_delimiter(args.delimiter)
        .set_wildcard(args.wildcard)
        .set_get_mode_str(&args.mode)?;

    let out = match args.command {
        Command::Get { path, default } => {
            let default = default.as_deref().map(json_arg).unwrap_or(Value::Null);
            accessor.get_or(&path, default)?
        }
        Command::Has { path } => Value::Bool(accessor.has(&path)),
        Command::Set { path, value } => accessor.set(&path, json_arg(&value))?.data().clone(),
        Command::Remove { path } => accessor.remove(&path)?.data().clone(),
        Command::Merge { path, value } => accessor.merge(&path, json_arg(&value))?.data().clone(),
    };
    Ok(out)
}

fn main() {
    // Logs go to stderr so stdout stays valid JSON.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(out) => match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
