use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use log::LevelFilter;

use htmlmath::triage::find_candidates;
use htmlmath::{Fragment, FragmentToMathML, MathConfig, PrettyPrint};

mod annotate;
mod config_file;
mod dom;

use config_file::{ConfigError, load_config_file};

/// Converts math written as styled HTML to MathML
#[derive(Parser, Debug)]
#[command(version, about = "Converts math written as styled HTML to MathML", long_about = None)]
struct Args {
    /// The HTML file to process; "-" or nothing reads standard input
    #[arg(conflicts_with = "fragment", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specifies the HTML to process on the command line
    #[arg(short, long, conflicts_with = "file", value_name = "HTML")]
    fragment: Option<String>,

    /// Prints the MathML together with the original markup, ready to be put back into the page
    #[arg(short, long, conflicts_with = "tree")]
    annotate: bool,

    /// Prints the expression tree of each fragment instead of MathML
    #[arg(short, long)]
    tree: bool,

    /// Pretty-prints the MathML output
    #[arg(short, long)]
    pretty: bool,

    /// Reads converter options from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Logs more details; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let mut config = match args.config {
        Some(ref path) => load_config_file(path)
            .unwrap_or_else(|e| exit_config_error(e))
            .math,
        None => MathConfig::default(),
    };
    if args.pretty {
        config.pretty_print = PrettyPrint::Always;
    }
    let converter = FragmentToMathML::new(config);

    let html = match (args.fragment, args.file) {
        (Some(fragment), _) => fragment,
        (None, Some(path)) if path != Path::new("-") => {
            fs::read_to_string(&path).unwrap_or_else(|e| exit_io_error(e))
        }
        (None, _) => read_stdin(),
    };
    let dom = dom::parse_html(&html).unwrap_or_else(|e| exit_io_error(e));
    let Some(document) = dom::to_fragment(&dom.document) else {
        return ExitCode::SUCCESS;
    };

    let candidates = find_candidates(&document);
    log::info!("found {} candidate fragments", candidates.len());
    let mut failed = 0usize;
    for fragment in candidates {
        let output = if args.tree {
            converter
                .expression_tree(fragment)
                .map(|tree| ToString::to_string(&tree))
        } else {
            converter.convert(fragment).map(|mathml| match fragment {
                Fragment::Element(original) if args.annotate => {
                    annotate::annotate(&mathml, original)
                }
                _ => mathml,
            })
        };
        let output = output.map_err(|e| {
            let text = fragment.text_content();
            log::warn!("skipping fragment {:?}: {e}", text.trim());
            // Annotated output keeps the failed fragment visible as an error snippet.
            if args.annotate {
                println!("{}", e.to_html(text.trim(), None));
            }
        });
        match output {
            Ok(output) => println!("{}", output.trim_end()),
            Err(()) => failed += 1,
        }
    }

    if failed > 0 {
        eprintln!("{failed} fragment(s) could not be converted");
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(e);
    }
    buffer
}

fn exit_config_error(e: ConfigError) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn exit_io_error(e: std::io::Error) -> ! {
    eprintln!("IO Error: {}", e);
    std::process::exit(1);
}
