//! `jsonlogic`: evaluate a JsonLogic rule against JSON data.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use json_logic::{default_operators, evaluate, EvalCtx, DEFAULT_MAX_DEPTH};
use serde_json::Value;

/// Evaluate a JsonLogic rule against JSON data.
///
/// The result is written to stdout as compact JSON, so calls can be
/// chained together if desired.
#[derive(Parser)]
#[command(name = "jsonlogic", version, after_help = r#"EXAMPLES:
    jsonlogic '{"===": [{"var": "a"}, "foo"]}' '{"a": "foo"}'
    jsonlogic '{"===": [1, 1]}'
    echo '{"a": "foo"}' | jsonlogic '{"===": [{"var": "a"}, "foo"]}' -

Conformant with the original JsonLogic (jsonlogic.com)."#)]
struct Cli {
    /// A JsonLogic rule, as JSON
    logic: String,

    /// JSON data to evaluate the rule against; `-` reads stdin, absent
    /// means null
    data: Option<String>,

    /// Maximum rule nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print `log` operator diagnostics to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_ansi(false)
            .with_target(false)
            .init();
    }

    let rule: Value =
        serde_json::from_str(&cli.logic).context("Could not parse logic as JSON")?;

    let data: Value = match cli.data.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut buf)
                .context("Could not read data from stdin")?;
            serde_json::from_str(&buf).context("Could not parse data as JSON")?
        }
        Some(arg) => serde_json::from_str(arg).context("Could not parse data as JSON")?,
        None => Value::Null,
    };

    let ctx = EvalCtx::new(&data, default_operators()).with_max_depth(cli.max_depth);
    let result = evaluate(&rule, &ctx).context("Could not apply logic")?;

    println!("{}", result);
    Ok(())
}
