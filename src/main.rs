//! ucalc command line front end
//!
//! One-shot evaluation (`ucalc "3.5 ft/s -> km/h"`) or an interactive
//! REPL with a capped, caller-owned history and JSON/CSV export.

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use ucalc::{evaluate, History};

const HISTORY_CAPACITY: usize = 100;

#[derive(Parser)]
#[command(name = "ucalc", version, about = "Unit-aware expression calculator")]
struct Cli {
    /// Expression to evaluate, e.g. "500 kPa -> atm". Omit for a REPL.
    expression: Vec<String>,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    /// Show the intermediate evaluation steps.
    #[arg(long)]
    steps: bool,
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.expression.is_empty() {
        repl();
        return Ok(());
    }

    let expression = cli.expression.join(" ");
    let result = evaluate(&expression)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("result serializes")
        );
        return Ok(());
    }

    if cli.steps {
        for step in &result.steps {
            eprintln!("  {step}");
        }
    }
    println!("{}", render(&result.value, &result.unit));
    Ok(())
}

fn render(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

fn repl() {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("failed to start line editor: {err}");
            return;
        }
    };
    let mut history = History::new(HISTORY_CAPACITY);

    println!("ucalc — unit-aware calculator. `history`, `export json|csv`, `quit`.");
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                match line.as_str() {
                    "quit" | "exit" => break,
                    "history" => {
                        if history.is_empty() {
                            println!("(empty)");
                        }
                        for entry in history.entries() {
                            println!("{}  =  {}", entry.input, entry.output);
                        }
                    }
                    "export json" => match history.to_json() {
                        Ok(json) => println!("{json}"),
                        Err(err) => eprintln!("export failed: {err}"),
                    },
                    "export csv" => print!("{}", history.to_csv()),
                    _ => match evaluate(&line) {
                        Ok(result) => {
                            let output = render(&result.value, &result.unit);
                            println!("{output}");
                            history.push(&line, &output);
                        }
                        Err(err) => {
                            eprintln!("{:?}", miette::Report::new(err));
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }
    }
}
