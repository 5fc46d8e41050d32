use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the CLI from src/main.rs and src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &[
    "regions",
    "regions-json",
    "emphasis",
    "emphasis-json",
    "lines",
    "lines-json",
    "blocks",
    "blocks-json",
    "bbcode",
];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let inspect = Command::new("inspect")
        .about("Inspect intermediate pipeline stages")
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
                    AVAILABLE_TRANSFORMS,
                ))
                .index(2)
                .value_hint(ValueHint::Other),
        );

    let convert = Command::new("convert")
        .about("Convert Markdown to BBCode (default command)")
        .arg(
            Arg::new("input")
                .help("Input file path ('-' or omitted for stdin)")
                .required(false)
                .default_value("-")
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
        );

    let mut cmd = Command::new("md2bbcode")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to forum BBCode")
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
        .subcommand(inspect)
        .subcommand(convert);

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "md2bbcode", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "md2bbcode", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "md2bbcode", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
