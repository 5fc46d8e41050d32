// Command-line interface for md2bbcode
//
// This binary is the editor glue around bbcode-babel: it reads a buffer (a file or stdin),
// converts it and writes the result to stdout or a file. Editors pipe the current buffer
// through `md2bbcode -` and replace it with the output.
//
// The inspect command shows intermediate pipeline stages and exists to debug conversions.
//
// Usage:
//  md2bbcode <input> [--from <format>] [--to <format>] [--output <file>]  - Convert (default)
//  md2bbcode convert <input> ...                                         - Same as above (explicit)
//  md2bbcode -                                                           - Convert stdin to stdout
//  md2bbcode inspect <path> [<transform>]                                - Show a pipeline stage
//  md2bbcode --list-transforms                                           - List available transforms
//
// Extra Parameters:
//
// Conversion options can be passed using --extra-<option-name> [value].
// The CLI layer strips the "extra-" prefix and applies them on top of the configuration.
// Example:
//  md2bbcode post.md --extra-strikethrough false

use bbcode_cli::transforms;

use bbcode_babel::pipeline::Stage;
use bbcode_babel::{ConvertOptions, FormatError, FormatRegistry};
use bbcode_config::{BbcodeConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STDIN_PATH: &str = "-";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

/// Insert the implicit `convert` subcommand in front of a bare input path.
///
/// Leading global flags (`-v`, `--config PATH`) stay where they are, so
/// `md2bbcode -v post.md` becomes `md2bbcode -v convert post.md`. Returns
/// `None` when the first positional is a subcommand or there is none.
fn inject_convert(args: &[String]) -> Option<Vec<String>> {
    let mut idx = 1;
    while let Some(arg) = args.get(idx) {
        match arg.as_str() {
            "-v" | "--verbose" => idx += 1,
            "--config" => idx += 2,
            flag if flag.starts_with("--config=") => idx += 1,
            _ => break,
        }
    }

    let first = args.get(idx)?;
    let is_input = first == STDIN_PATH || !first.starts_with('-');
    if !is_input || matches!(first.as_str(), "inspect" | "convert" | "help") {
        return None;
    }

    let mut new_args = args[..idx].to_vec();
    new_args.push("convert".to_string());
    new_args.extend_from_slice(&args[idx..]);
    Some(new_args)
}

fn build_cli() -> Command {
    Command::new("md2bbcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to forum BBCode")
        .long_about(
            "md2bbcode converts the everyday subset of Markdown into the BBCode most forums accept.\n\n\
            Commands:\n  \
            - convert: Markdown to BBCode (default command)\n  \
            - inspect: View intermediate pipeline stages\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override conversion options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n  \
            Options: strikethrough, indented-code, intraword-underscore\n\n\
            Examples:\n  \
            md2bbcode post.md                             # Convert to stdout\n  \
            md2bbcode post.md -o post.bbcode              # Convert to a file\n  \
            cat post.md | md2bbcode -                     # Convert stdin\n  \
            md2bbcode post.md --extra-strikethrough false # Leave ~~text~~ alone\n  \
            md2bbcode inspect post.md regions             # Show protected regions"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a bbcode.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr (same as RUST_LOG=debug)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate pipeline stages")
                .long_about(
                    "View a document at different stages of the conversion pipeline.\n\n\
                    Transforms (stage[-json]):\n  \
                    - regions:   Protected regions (code, links, images, autolinks)\n  \
                    - emphasis:  Text after bold/italic/strikethrough resolution\n  \
                    - lines:     Line records with protected regions rendered\n  \
                    - blocks:    Line records after block classification (default)\n  \
                    - bbcode:    Final output\n\n\
                    Examples:\n  \
                    md2bbcode inspect post.md                  # Block table (default)\n  \
                    md2bbcode inspect post.md regions-json     # Regions as JSON"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage[-json]). Defaults to 'blocks'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert Markdown to BBCode (default command)")
                .long_about(
                    "Convert a document between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md, .markdown), input only\n  \
                    - bbcode:   Forum BBCode (.bbcode, .bb), output only\n\n\
                    The source format is auto-detected from the file extension; stdin is\n\
                    read as markdown. Output goes to stdout by default, or use -o.\n\n\
                    Examples:\n  \
                    md2bbcode convert post.md                    # BBCode on stdout\n  \
                    md2bbcode convert notes.txt --from markdown  # Override detection\n  \
                    md2bbcode post.md -o post.bbcode             # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path ('-' or omitted for stdin)")
                        .required(false)
                        .default_value(STDIN_PATH)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .default_value("bbcode")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // A bare input path (or '-') means "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match inject_convert(&cleaned_args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(matches.get_flag("verbose"), &config.logging.level);

    let options = convert_options(&config, &extra_params).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .map(|s| s.as_str())
                .unwrap_or(STDIN_PATH);
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &options);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(|s| s.as_str())
                .unwrap_or(STDIN_PATH);
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("bbcode");

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_source_format(input).unwrap_or_else(|| {
                    eprintln!("Error: Could not detect format from filename '{input}'");
                    eprintln!("Please specify --from explicitly");
                    std::process::exit(1);
                }),
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &options);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins, then `-v`, then the configured level.
fn init_logging(verbose: bool, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured_level };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read a file, or stdin when `path` is `-`
fn read_source(path: &str) -> String {
    if path == STDIN_PATH {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return source;
    }

    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn detect_source_format(input: &str) -> Option<String> {
    if input == STDIN_PATH {
        return Some("markdown".to_string());
    }
    FormatRegistry::default().detect_format_from_filename(input)
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, options: &ConvertOptions) {
    let source = read_source(path);

    let output = transforms::execute_transform(&source, transform, options).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    options: &ConvertOptions,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist before touching the input
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_source(input);
    tracing::debug!(input, from, to, bytes = source.len(), "converting");

    let result = registry
        .convert(&source, from, to, options)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    for stage in Stage::ALL {
        println!("  {:<10}  - {}", stage.name(), stage.description());
    }

    println!("\nFormats:");
    println!("  (none)      - Human-readable table or text");
    println!("  json        - JSON output (all stages but bbcode)\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nConversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> BbcodeConfig {
    let loader = Loader::new().with_optional_file("bbcode.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Configured options with any `--extra-*` overrides applied on top
fn convert_options(
    config: &BbcodeConfig,
    extra_params: &HashMap<String, String>,
) -> Result<ConvertOptions, FormatError> {
    let mut options = ConvertOptions::from(&config.convert.markdown);
    options.apply_params(extra_params)?;
    Ok(options)
}
