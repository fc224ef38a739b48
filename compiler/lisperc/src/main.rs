//! Lisper CLI
//!
//! Thin driver around the Lisper lexer.

use lisper_lexer::LexerConfig;
use lisperc::commands::{check_file, lex_file, EXIT_FAILURE};

fn main() {
    lisperc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let code = match command.as_str() {
        "lex" => {
            let mut config = LexerConfig::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if arg == "--comments" || arg == "-c" {
                    config = config.with_comments(true);
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(EXIT_FAILURE);
                }
            }

            let Some(path) = file_path else {
                eprintln!("Usage: lisper lex <file.lisper> [--comments]");
                std::process::exit(EXIT_FAILURE);
            };

            lex_file(path, config)
        }
        "check" => {
            if args.len() != 3 {
                eprintln!("Usage: lisper check <file.lisper>");
                std::process::exit(EXIT_FAILURE);
            }
            check_file(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("lisper {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    println!("Lisper lexer");
    println!();
    println!("Usage: lisper <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.lisper>     Print the token stream, one token per line");
    println!("      --comments        Include comment tokens");
    println!("  check <file.lisper>   Report lexical errors only");
    println!("  help                  Show this message");
    println!("  version               Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lisper_lexer=trace) to trace the lexer.");
}
