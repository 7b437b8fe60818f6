use clap::Parser;
use shinsei::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Walk a certificate decision tree from the terminal
///
/// Set RUST_LOG=shinsei=debug to see every transition.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the tree configuration JSON file
    tree_path: Option<String>,

    /// Load a compiled tree artifact instead of a JSON configuration
    #[arg(long, value_name = "PATH", conflicts_with = "tree_path")]
    compiled: Option<String>,

    /// Write the validated tree as a compiled artifact to this path
    #[arg(long, value_name = "PATH")]
    compile: Option<String>,

    /// Option labels to choose, in order
    #[arg(short, long = "choose", value_name = "LABEL")]
    choices: Vec<String>,

    /// Field values for the outcome, as name=value
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Run in interactive mode to be prompted for answers and fields
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tree = Arc::new(load(&cli));
    info!(nodes = tree.len(), root = ?tree.root(), "Tree loaded");

    if let Some(path) = &cli.compile {
        CompiledTree::new(&tree)
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write compiled tree: {}", e)));
        println!("Wrote compiled tree to '{}'", path);
        if cli.choices.is_empty() && !cli.human {
            return;
        }
    }

    let mut flow = WorkflowController::new(tree);
    flow.start_flow()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to start flow: {}", e)));

    if cli.human {
        run_interactive(&mut flow);
    } else {
        run_scripted(&mut flow, &cli.choices, &cli.fields);
    }
}

fn load(cli: &Cli) -> DecisionTree {
    if let Some(path) = &cli.compiled {
        return CompiledTree::from_file(path)
            .and_then(CompiledTree::into_tree)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load compiled tree: {}", e)));
    }

    let path = cli
        .tree_path
        .as_deref()
        .unwrap_or_else(|| exit_with_error("A tree path or --compiled artifact is required."));
    let config = TreeConfig::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read tree '{}': {}", path, e)));
    DecisionTree::from_source(config)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid tree '{}': {}", path, e)))
}

/// Applies the choices and fields given on the command line, then reports where
/// the flow ended up.
fn run_scripted(flow: &mut WorkflowController, choices: &[String], fields: &[(String, String)]) {
    for label in choices {
        flow.answer_question(label).unwrap_or_else(|e| {
            exit_with_error(&format!("'{}': {} ({})", label, e.user_message(), e))
        });
    }

    let prompt = current_prompt(flow);
    print_prompt(&prompt);
    if !prompt.is_outcome() {
        return;
    }

    for (name, value) in fields {
        flow.supply_field(name, value)
            .unwrap_or_else(|e| exit_with_error(&e.user_message()));
    }
    finish(flow);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(flow: &mut WorkflowController) {
    println!("--- Shinsei Interactive Mode ---");
    println!("Enter the number of an option, or 'b' to go back.");

    loop {
        match current_prompt(flow) {
            PromptView::Question(question) => {
                println!("\n[{}] {}", question.step, question.prompt);
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}: {}", i + 1, option);
                }
                let input = prompt_for_input("Choice", None);
                let result = if input.eq_ignore_ascii_case("b") {
                    flow.back()
                } else {
                    let picked = input
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| question.options.get(n.wrapping_sub(1)));
                    match picked {
                        Some(label) => flow.answer_question(label),
                        None => {
                            println!(
                                "Invalid choice. Please enter a number between 1 and {}.",
                                question.options.len()
                            );
                            continue;
                        }
                    }
                };
                if let Err(e) = result {
                    if !e.is_recoverable() {
                        exit_with_error(&e.user_message());
                    }
                    println!("{}", e.user_message());
                }
            }
            PromptView::Outcome(outcome) => {
                print_prompt(&PromptView::Outcome(outcome.clone()));
                for field in &outcome.fields {
                    let current = field.value.as_deref().or(field.default.as_deref());
                    let value = prompt_for_input(&field.name, current);
                    if !value.is_empty() {
                        if let Err(e) = flow.supply_field(&field.name, &value) {
                            println!("{}", e.user_message());
                        }
                    }
                }
                if flow.submit_ready() {
                    break;
                }
                println!("Some fields are still missing.");
            }
        }
    }

    finish(flow);
}

fn finish(flow: &mut WorkflowController) {
    let trail = flow.trail().to_vec();
    let answers = TrailFormatter::format_answers(flow.tree(), &trail);
    let payload = flow
        .build_payload()
        .unwrap_or_else(|e| exit_with_error(&e.user_message()));

    println!("\nAnswers:\n{}", answers);
    println!("\nRequest payload:");
    match payload.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize payload: {}", e)),
    }
}

fn current_prompt(flow: &WorkflowController) -> PromptView {
    flow.current_prompt()
        .unwrap_or_else(|e| exit_with_error(&format!("{} ({})", e.user_message(), e)))
}

fn print_prompt(prompt: &PromptView) {
    match prompt {
        PromptView::Question(question) => {
            println!("Question {}: {}", question.step, question.prompt);
            println!("  Options: {}", question.options.join(" | "));
        }
        PromptView::Outcome(outcome) => {
            println!("Outcome: {}", outcome.action_type);
            if let Some(description) = &outcome.description {
                println!("  -> {}", description);
            }
            for field in &outcome.fields {
                let shown = field
                    .value
                    .as_deref()
                    .map(|v| format!("'{}'", v))
                    .or_else(|| field.default.as_deref().map(|d| format!("'{}' (default)", d)))
                    .unwrap_or_else(|| "<missing>".to_string());
                println!("  {}: {}", field.name, shown);
            }
        }
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if io::stdout().flush().is_err() || io::stdin().read_line(&mut line).is_err() {
        exit_with_error("Failed to read from the terminal");
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
