//! epistola - TEI letter transcription renderer

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "epistola")]
#[command(version, about = "Render TEI letter transcriptions", long_about = None)]
#[command(after_help = "EXAMPLES:
    epistola letter.xml           Render the letter as plain text
    epistola --json letter.xml    Dump the semantic model as JSON
    epistola -i letter.xml        Show a document summary")]
struct Cli {
    /// Input file (TEI XML)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Dump the semantic document model as JSON
    #[arg(long)]
    json: bool,

    /// Show a document summary without rendering
    #[arg(short, long)]
    info: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> epistola::Result<()> {
    let doc = epistola::read_letter(&cli.input)?;

    if cli.info {
        show_info(&cli.input, &doc);
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", epistola::render_text(&doc));
    }

    Ok(())
}

fn show_info(path: &str, doc: &epistola::SemanticDocument) {
    println!("File: {path}");
    let title = epistola::plain_text(&doc.title);
    if !title.is_empty() {
        println!("Title: {title}");
    }
    println!("Blocks: {}", doc.body.len());
    println!("Footnotes: {}", doc.footnotes.len());
}
