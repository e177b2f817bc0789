//! Command-line interface for rlgrammar
//! Runs strings through a right-linear grammar and draws the parse tree of every accepted one.
//!
//! Usage:
//!   rlgrammar demo                                              - Classroom grammar over the demo inputs
//!   rlgrammar check `<input>`... [--grammar `<file>`] [--format `<format>`] - Check inputs
//!   rlgrammar show-grammar [--grammar `<file>`] [--as `<syntax>`]    - Print a grammar
//!   rlgrammar list-formats                                      - List all tree formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use rlgrammar::config::{Loader, RlgrammarConfig};
use rlgrammar::driver::{self, InputReport};
use rlgrammar::formats::{default_registry, Formatter};
use rlgrammar::grammar::{builtin, load_file, GrammarDocument};
use rlgrammar::{Deriver, Grammar};

fn main() {
    let matches = Command::new("rlgrammar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Derive strings from right-linear grammars and draw their parse trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest nesting of non-final nonterminals (S → aSb) before a derivation gives up")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Echo the grammar and derivation options to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("demo").about("Run the classroom grammar over the demo inputs"))
        .subcommand(
            Command::new("check")
                .about("Check inputs against a grammar")
                .arg(
                    Arg::new("inputs")
                        .help("Strings to check (use '' for the empty string)")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(grammar_arg())
                .arg(
                    Arg::new("start")
                        .long("start")
                        .short('s')
                        .help("Start symbol (defaults to the grammar's own)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Tree format (e.g., 'diagonal', 'treeviz', 'json')"),
                ),
        )
        .subcommand(
            Command::new("show-grammar")
                .about("Print a grammar")
                .arg(grammar_arg())
                .arg(
                    Arg::new("as")
                        .long("as")
                        .help("Output syntax")
                        .value_parser(["notation", "yaml", "json"])
                        .default_value("notation"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available tree formats"))
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("demo", demo_matches)) => {
            handle_demo_command(demo_matches);
        }
        Some(("check", check_matches)) => {
            handle_check_command(check_matches);
        }
        Some(("show-grammar", show_matches)) => {
            handle_show_grammar_command(show_matches);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .short('g')
        .help("Grammar file (.yaml, .json, or textbook notation); defaults to the classroom grammar")
}

/// Build the configuration from the global flags
fn load_config(matches: &ArgMatches) -> RlgrammarConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(depth) = matches.get_one::<u64>("max-depth") {
        loader = loader
            .set_override("derivation.max_depth", *depth)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn load_grammar(matches: &ArgMatches) -> Grammar {
    match matches.get_one::<String>("grammar") {
        Some(path) => load_file(path).unwrap_or_else(|e| {
            eprintln!("Grammar error: {}", e);
            std::process::exit(1);
        }),
        None => builtin::classroom(),
    }
}

fn lookup_formatter(name: &str) -> &'static dyn Formatter {
    default_registry().require(name).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn run_inputs(
    grammar: &Grammar,
    start: &str,
    inputs: &[String],
    formatter: &dyn Formatter,
    config: &RlgrammarConfig,
    verbose: bool,
) {
    let options = config.derive_options();
    if verbose {
        eprintln!("Grammar (start {}):\n{}", start, grammar);
        eprintln!(
            "Derivation: max_depth={}, epsilon_label={}, format={}",
            options.max_depth,
            options.epsilon_label,
            formatter.name()
        );
    }

    let deriver = Deriver::with_options(grammar, options);
    let reports: Vec<InputReport> = driver::run(&deriver, start, inputs, formatter)
        .unwrap_or_else(|e| {
            eprintln!("Derivation error: {}", e);
            std::process::exit(1);
        });

    print!("{}", driver::format_reports(&reports));
}

/// Handle the demo command
fn handle_demo_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let grammar = builtin::classroom();
    let formatter = lookup_formatter(&config.render.format);

    run_inputs(
        &grammar,
        grammar.start_symbol(),
        &config.demo.inputs,
        formatter,
        &config,
        matches.get_flag("verbose"),
    );
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let grammar = load_grammar(matches);

    let start = matches
        .get_one::<String>("start")
        .map(String::as_str)
        .unwrap_or_else(|| grammar.start_symbol());
    if !grammar.contains(start) {
        eprintln!("Grammar error: start symbol '{}' has no rule", start);
        std::process::exit(1);
    }

    let format = matches
        .get_one::<String>("format")
        .unwrap_or(&config.render.format);
    let formatter = lookup_formatter(format);

    let inputs: Vec<String> = matches
        .get_many::<String>("inputs")
        .unwrap()
        .cloned()
        .collect();

    run_inputs(
        &grammar,
        start,
        &inputs,
        formatter,
        &config,
        matches.get_flag("verbose"),
    );
}

/// Handle the show-grammar command
fn handle_show_grammar_command(matches: &ArgMatches) {
    let grammar = load_grammar(matches);
    let syntax = matches.get_one::<String>("as").unwrap();

    let output = match syntax.as_str() {
        "yaml" => GrammarDocument::from_grammar(&grammar).to_yaml_string(),
        "json" => GrammarDocument::from_grammar(&grammar)
            .to_json_string()
            .map(|json| json + "\n"),
        _ => Ok(format!("{}\n", grammar)),
    }
    .unwrap_or_else(|e| {
        eprintln!("Grammar error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = default_registry();
    println!("Available tree formats:\n");
    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
        }
    }
}
