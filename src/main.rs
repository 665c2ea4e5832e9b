// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outlink CLI - External Link Annotation
//!
//! Example usage and demonstration of the outlink library.

use std::env;
use std::fs;
use std::process::ExitCode;

use outlink::{AnnotationPolicy, LinkAnnotator, Result};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("outlink=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "annotate" => {
            if args.len() < 4 {
                eprintln!("Usage: outlink annotate <file> <page-url>");
                return ExitCode::from(1);
            }
            annotate_file(&args[2], &args[3])
        }
        "scan" => {
            if args.len() < 4 {
                eprintln!("Usage: outlink scan <file> <page-url>");
                return ExitCode::from(1);
            }
            scan_file(&args[2], &args[3])
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("outlink {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Outlink - External Link Annotation for Rendered HTML

USAGE:
    outlink <COMMAND> [OPTIONS]

COMMANDS:
    annotate <file> <page-url>   Annotate external links, write HTML to stdout
    scan <file> <page-url>       Report external links without writing HTML
    help                         Show this help message
    version                      Show version information

EXAMPLES:
    outlink annotate site/index.html https://example.com/ > out.html
    outlink scan site/index.html https://example.com/
"#
    );
}

fn annotate_file(path: &str, page_url: &str) -> ExitCode {
    match run_annotate(path, page_url) {
        Ok(html) => {
            println!("{}", html);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run_annotate(path: &str, page_url: &str) -> Result<String> {
    let html = fs::read_to_string(path)?;
    outlink::annotate_html(&html, page_url, &AnnotationPolicy::default())
}

fn scan_file(path: &str, page_url: &str) -> ExitCode {
    match run_scan(path, page_url) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run_scan(path: &str, page_url: &str) -> Result<String> {
    let html = fs::read_to_string(path)?;
    let url = url::Url::parse(page_url)?;
    let doc = outlink::parse_html_with_url(&html, Some(url))?;

    let annotator = LinkAnnotator::default();
    let external = annotator.external_links(&doc);
    let report = annotator.annotate_document(&doc);

    let out = serde_json::json!({
        "page": page_url,
        "report": report,
        "external": external,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
