//! CLI wrapper for the fake-capable module loader.
//!
//! Usage:
//!   fakeload <specifier>                 # Load a module, print its exports
//!   fakeload --fake <spec> <specifier>   # Register fakes before loading
//!   fakeload --config <file> <specifier> # Apply fakes from a config file
//!   fakeload --tree <specifier>          # Print the module's token tree

use fakeload::loader::{
    synthesize, DefaultHost, FakeConfig, FakeSpecifier, Loader, ModuleHost, ResolveContext,
};
use fakeload::parser::parse_to_token_tree;
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut fakes: Vec<String> = vec![];
    let mut config_file: Option<String> = None;
    let mut tree = false;
    let mut specifier: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "--tree" => tree = true,
            "--fake" => {
                i += 1;
                match args.get(i) {
                    Some(spec) => fakes.push(spec.clone()),
                    None => {
                        eprintln!("--fake needs a fake specifier argument");
                        process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(file) => config_file = Some(file.clone()),
                    None => {
                        eprintln!("--config needs a file argument");
                        process::exit(1);
                    }
                }
            }
            other => {
                if specifier.is_some() {
                    eprintln!("Unexpected argument '{}'", other);
                    print_usage();
                    process::exit(1);
                }
                specifier = Some(other.to_string());
            }
        }
        i += 1;
    }

    let specifier = match specifier {
        Some(s) => s,
        None => {
            print_usage();
            process::exit(1);
        }
    };

    if tree {
        print_tree(&specifier);
        return;
    }

    let mut loader = Loader::new(DefaultHost::new());

    if let Some(file) = config_file {
        let config = match FakeConfig::load(Path::new(&file)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        for directive in &config.fakes {
            if let Err(e) = loader.import(&directive.to_specifier()) {
                eprintln!("Error applying fake for '{}': {}", directive.target, e);
                process::exit(1);
            }
        }
    }

    for spec in &fakes {
        if let Err(e) = loader.import(spec) {
            eprintln!("Error applying fake '{}': {}", spec, e);
            process::exit(1);
        }
    }

    match loader.import(&specifier) {
        Ok(instance) => {
            let mut names: Vec<&String> = instance.exports.keys().collect();
            names.sort();
            for name in names {
                println!("{} = {}", name, instance.exports[name]);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("fakeload - mock-anything module loader");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  fakeload <specifier>                 Load a module, print its exports");
    eprintln!("  fakeload --fake <spec> <specifier>   Register fakes before loading (repeatable)");
    eprintln!("  fakeload --config <file> <specifier> Apply fakes from a config file");
    eprintln!("  fakeload --tree <specifier>          Print the module's token tree");
}

/// Prints the token tree of the module source the specifier would load:
/// the synthesized replacement for a marked specifier, the host's source
/// text otherwise.
fn print_tree(specifier: &str) {
    let host = DefaultHost::new();
    let fake = FakeSpecifier::parse(specifier);
    let source = if fake.marked {
        match synthesize(&fake.argument, &ResolveContext::root(), &host) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        let identity = match host.resolve(&fake.target, &ResolveContext::root()) {
            Ok(identity) => identity,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        match host.source(&identity) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    };
    match parse_to_token_tree(&source) {
        Ok(tree) => println!("{}", tree),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
