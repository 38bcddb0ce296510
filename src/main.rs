//! tablegate: evaluate replication inclusion rules from the command line.
//!
//! Reads a JSON request from stdin:
//!
//! ```json
//! {"options": [{"name": "include", "value": "{\"tables\": \"^pub_\"}"}],
//!  "relations": ["pub_users", "other"]}
//! ```
//!
//! Options from the configuration file come first, request options are
//! appended after them. Writes one decision per relation to stdout.
//!
//! Usage: `tablegate [--config <path>] < request.json`

use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tablegate::config::{Config, SlotOption};
use tablegate::{RuleSet, logging};

#[derive(Deserialize)]
struct Request {
    #[serde(default)]
    options: Vec<SlotOption>,
    #[serde(default)]
    relations: Vec<String>,
}

#[derive(Serialize)]
struct Decision<'a> {
    relation: &'a str,
    emit: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("tablegate: {msg}");
    std::process::exit(1);
}

fn config_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(p) => path = Some(PathBuf::from(p)),
                None => fail("--config requires a path"),
            },
            other => fail(format!("unexpected argument: {other}")),
        }
    }
    path
}

fn main() {
    let loaded = match config_path() {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => fail(e),
    };
    logging::init(&config.settings.log_level);

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        fail("failed to read stdin");
    }

    let request: Request = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => fail(format!("JSON parse error: {e}")),
    };

    let mut rules: RuleSet = match config.rule_set() {
        Ok(r) => r,
        Err(e) => fail(e),
    };
    for option in &request.options {
        if let Err(e) = rules.apply_option(&option.name, option.value.as_deref()) {
            fail(e);
        }
    }

    let mut decisions = Vec::with_capacity(request.relations.len());
    for relation in &request.relations {
        let emit = match rules.should_emit(relation) {
            Ok(v) => v,
            Err(e) => fail(e),
        };
        if config.settings.log_decisions {
            logging::log_decision(relation, emit);
        }
        decisions.push(Decision { relation, emit });
    }

    let output = serde_json::json!({ "decisions": decisions });
    match serde_json::to_string(&output) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}
