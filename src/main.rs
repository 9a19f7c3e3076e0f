//! Treeforge's main application entry point and orchestration logic.
//! Handles command-line argument parsing, input decoding, and wires the
//! parser, prompter and materializer together.

use std::io::Read;

use treeforge::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    journal::MaterializationLog,
    materializer::Materializer,
    parser::parse_tree_structure,
    prompt::{AutoConfirm, DialoguerPrompt, OverwritePrompt},
    structure::{decode_structure, prune_empty_keys, to_pretty_json, Structure},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Reads the raw structure text from a file or from stdin.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Decodes the input text into a structure.
///
/// A JSON object literal is accepted directly; anything that fails to
/// decode falls back to the tree-text parser.
fn decode_input(text: &str) -> Structure {
    match decode_structure(text) {
        Ok(structure) => structure,
        Err(_) => parse_tree_structure(text),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Reads the structure text from the input source
/// 2. Decodes it, preferring the JSON form over tree-text parsing
/// 3. Without an output directory, prints the structure and stops
/// 4. Otherwise materializes it under the output directory with root
///    handling, then prints every journal entry
fn run(args: Args) -> Result<()> {
    let text = read_input(&args.input)?;
    let structure = prune_empty_keys(decode_input(&text));

    if structure.is_empty() {
        return Err(Error::ParseError(
            "Failed to parse the project structure. Please check the input format".to_string(),
        ));
    }

    let output_dir = match args.output_dir {
        Some(output_dir) => output_dir,
        None => {
            println!("{}", to_pretty_json(&structure)?);
            return Ok(());
        }
    };

    if !output_dir.is_dir() {
        return Err(Error::OutputDirectoryMissing {
            output_dir: output_dir.display().to_string(),
        });
    }

    let auto_confirm = AutoConfirm(true);
    let dialoguer_prompt = DialoguerPrompt::new();
    let prompt: &dyn OverwritePrompt =
        if args.force { &auto_confirm } else { &dialoguer_prompt };

    let mut journal = MaterializationLog::new();
    Materializer::new(prompt).materialize_project(&output_dir, &structure, &mut journal);

    for entry in journal.entries() {
        println!("{}", entry);
    }

    Ok(())
}
