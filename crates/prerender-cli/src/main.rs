use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use prerender_tree::{StyleMap, Template, TreeError};

#[derive(Parser)]
#[command(name = "prerender")]
#[command(about = "Render JSON node templates to static HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template to HTML
    Render {
        /// Input template (.json)
        path: PathBuf,

        /// Style map resolving `{ "style": key }` attribute values
        #[arg(long)]
        styles: Option<PathBuf>,

        /// Write HTML to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a template for errors without writing output
    Check {
        /// Input template (.json)
        path: PathBuf,

        /// Style map resolving `{ "style": key }` attribute values
        #[arg(long)]
        styles: Option<PathBuf>,
    },
}

/// Failure in the template → HTML pipeline.
#[derive(Debug, thiserror::Error)]
enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] TreeError),

    #[error("Render error: {0}")]
    Html(#[from] prerender_html::SerializeError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            path,
            styles,
            output,
        } => cmd_render(&path, styles.as_deref(), output.as_deref()),
        Command::Check { path, styles } => cmd_check(&path, styles.as_deref()),
    }
}

fn read_source(path: &Path) -> String {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        std::process::exit(1);
    }
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Instantiate a template against an optional style map and serialize it.
fn render(template_source: &str, styles_source: Option<&str>) -> Result<String, RenderError> {
    let styles = match styles_source {
        Some(source) => StyleMap::from_json(source)?,
        None => StyleMap::new(),
    };
    log::debug!("loaded {} style identifier(s)", styles.len());

    let nodes = Template::from_json(template_source)?.instantiate(&styles)?;
    log::debug!("instantiated {} root node(s)", nodes.len());

    Ok(prerender_html::serialize_fragment(&nodes)?)
}

fn run(path: &Path, styles: Option<&Path>) -> String {
    let source = read_source(path);
    let styles_source = styles.map(read_source);

    log::info!("rendering {}", path.display());
    match render(&source, styles_source.as_deref()) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_render(path: &Path, styles: Option<&Path>, output: Option<&Path>) {
    let html = run(path, styles);

    match output {
        Some(out_path) => {
            if let Err(e) = std::fs::write(out_path, &html) {
                eprintln!("Error writing {}: {e}", out_path.display());
                std::process::exit(1);
            }
            eprintln!("Rendered: {}", out_path.display());
        }
        None => println!("{html}"),
    }
}

fn cmd_check(path: &Path, styles: Option<&Path>) {
    run(path, styles);
    eprintln!("OK: {}", path.display());
}
