//! invoice-render – command-line invoice JSON → PDF renderer.
//!
//! Usage:
//!   invoice-render <invoice.json> [output.pdf] [--offline] [--layout-json <path>] [--title "..."]
//!
//! If `output.pdf` is omitted the PDF is written next to the input file
//! under the deterministic name derived from the invoice code.

use std::{env, fs, path::PathBuf, process};

use invoice_render::model::{RenderDefaults, RenderInput};
use invoice_render::pipeline::{document_file_name, render_invoice, RenderOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut layout_json_path: Option<PathBuf> = None;
    let mut offline = false;
    let mut title: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--offline" => offline = true,
            "--layout-json" => match iter.next() {
                Some(v) => layout_json_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--layout-json requires a path");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no input file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let render_input: RenderInput = match serde_json::from_str(&json) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    // Default output: same directory as the input, deterministic name.
    let output = output_path.unwrap_or_else(|| {
        let dir = input.parent().map(PathBuf::from).unwrap_or_default();
        dir.join(document_file_name(&render_input.invoice.code))
    });

    let options = RenderOptions {
        title,
        offline,
        fallback_font_url: None,
    };

    match render_invoice(&render_input, &RenderDefaults::default(), &options) {
        Ok((bytes, layout)) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            if let Some(path) = layout_json_path {
                if let Err(e) = fs::write(&path, layout.to_json()) {
                    eprintln!("Error writing '{}': {e}", path.display());
                    process::exit(1);
                }
            }
            eprintln!("Wrote '{}' ({} bytes)", output.display(), bytes.len());
        }
        Err(e) => {
            eprintln!("Error rendering invoice: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("invoice-render – invoice JSON to PDF renderer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <invoice.json> [output.pdf] [--offline] [--layout-json <path>] [--title \"...\"]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <invoice.json>  Render input (invoice, company, settings, client, items)");
    eprintln!("  [output.pdf]    Output path  (default: invoice-<code>.pdf next to the input)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --offline            Skip remote asset fetches (images omitted, ASCII currency)");
    eprintln!("  --layout-json PATH   Also dump the preview region tree as JSON");
    eprintln!("  --title, -t          Document title in PDF metadata (default: Invoice <code>)");
    eprintln!("  --help               Print this message");
}
