use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random decision tree configurations for load testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_tree.json")]
    output: String,

    /// Number of question levels below the root
    #[arg(long, default_value_t = 6)]
    depth: usize,

    /// The minimum number of options per question
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of options per question
    #[arg(long, default_value_t = 4)]
    max: usize,

    /// Probability that an option links to an existing deeper node instead of a new one
    #[arg(long, default_value_t = 0.2)]
    share: f64,
}

const ACTIONS: [&str; 4] = ["PUBLIC_CA", "INTERNAL_CA", "PUBLIC_WITH_JUSTIFICATION", "revoke"];
const FIELDS: [&str; 5] = ["commonName", "sanEntries", "caType", "forcePublicReason", "requestId"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min == 0 || cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) must be at least 1 and not greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.share) {
        eprintln!("Error: --share ({}) must be between 0 and 1", cli.share);
        std::process::exit(1);
    }

    println!(
        "Generating tree (depth {}, options per question: {} to {})...",
        cli.depth, cli.min, cli.max
    );

    let mut generator = TreeGenerator {
        rng: &mut rng,
        cli: &cli,
        nodes: Vec::new(),
        levels: vec![Vec::new(); cli.depth + 2],
        next_id: 0,
    };
    let root = generator.question(0);
    let tree = json!({ "root": root, "nodes": generator.nodes });

    fs::write(&cli.output, serde_json::to_string_pretty(&tree)?)?;

    let node_count = tree["nodes"].as_array().map_or(0, Vec::len);
    println!(
        "Successfully generated {} nodes and saved the tree to '{}'",
        node_count, cli.output
    );

    Ok(())
}

struct TreeGenerator<'a> {
    rng: &'a mut ThreadRng,
    cli: &'a Cli,
    nodes: Vec<Value>,
    /// Ids of the nodes created at each level, for shared links.
    levels: Vec<Vec<String>>,
    next_id: usize,
}

impl TreeGenerator<'_> {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}_{}", prefix, self.next_id)
    }

    /// Generates a question at `level` and everything below it; returns its id.
    fn question(&mut self, level: usize) -> String {
        let id = self.fresh_id("q");
        let count = self.rng.random_range(self.cli.min..=self.cli.max);

        let mut options = Vec::with_capacity(count);
        for i in 0..count {
            let next = self.child(level + 1);
            options.push(json!({ "label": format!("Option {}", i + 1), "next": next }));
        }

        self.levels[level].push(id.clone());
        self.nodes.push(json!({
            "id": id,
            "kind": "question",
            "prompt": format!("Generated question {} (level {})?", id, level),
            "options": options,
        }));
        id
    }

    /// Picks or creates the node an option at `level` points to. Links only ever
    /// point to deeper levels, so generated trees are acyclic.
    fn child(&mut self, level: usize) -> String {
        let deeper: Vec<String> = self.levels[level..].iter().flatten().cloned().collect();
        if !deeper.is_empty() && self.rng.random_bool(self.cli.share) {
            let pick = self.rng.random_range(0..deeper.len());
            return deeper[pick].clone();
        }

        if level > self.cli.depth || self.rng.random_bool(0.15) {
            self.outcome(level)
        } else {
            self.question(level)
        }
    }

    fn outcome(&mut self, level: usize) -> String {
        let id = self.fresh_id("o");
        let action = ACTIONS[self.rng.random_range(0..ACTIONS.len())];
        let required_count = self.rng.random_range(1..=FIELDS.len());
        let required: Vec<&str> = FIELDS[..required_count].to_vec();

        let mut outcome = json!({
            "id": id,
            "kind": "outcome",
            "actionType": action,
            "requiredFields": required,
        });
        if required.contains(&"caType") {
            let ca_type = if action == "INTERNAL_CA" { "INTERNAL" } else { "PUBLIC" };
            outcome["defaults"] = json!({ "caType": ca_type });
        }

        self.levels[level].push(id.clone());
        self.nodes.push(outcome);
        id
    }
}
