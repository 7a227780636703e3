use chrono::Utc;
use clap::{Parser, Subcommand};
use folder_index::{cache, config, corpus, generate, listing, output, render};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Version string baked in by build.rs: the crate version on a release tag,
/// `dev@<hash>` otherwise.
const VERSION: &str = env!("FOLDER_INDEX_VERSION");

#[derive(Parser)]
#[command(name = "folder-index")]
#[command(about = "Folder index pages for static content sites")]
#[command(long_about = "\
Folder index pages for static content sites

Documents are addressed by slash-separated slugs. Folders are implied by
the slugs; a slug ending in the index segment is the folder's own page.

Corpus structure:

  site/
  ├── documents.json               # [{\"slug\": \"notes/rust/ownership\", ...}, ...]
  └── config.toml                  # Optional, see gen-config

Example slugs:

  notes/index                      # The notes/ folder's own document
  notes/rust/ownership             # A leaf inside the implicit notes/rust/ folder
  index                            # The root folder's own document

Run 'folder-index gen-config' to generate a documented config.toml.")]
#[command(version = VERSION)]
struct Cli {
    /// Corpus directory (documents.json + config.toml)
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log progress at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the folder tree implied by the document slugs
    Tree,
    /// Show the listing of one folder
    Render {
        /// Folder slug (`""` or `index` for the root)
        #[arg(default_value = "")]
        folder: String,
        /// Print the full page HTML instead of the summary
        #[arg(long)]
        html: bool,
    },
    /// Render every folder page into the output directory
    Build,
    /// Validate documents.json and config.toml without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Tree => {
            let corpus = corpus::load(&cli.source)?;
            let session = cache::RenderSession::new(
                corpus.documents.clone(),
                &corpus.config.paths.index_segment,
            );
            output::print_tree_output(session.trie(), &corpus.config.site.title);
        }
        Command::Render { folder, html } => {
            let corpus = corpus::load(&cli.source)?;
            let session = cache::RenderSession::new(
                corpus.documents.clone(),
                &corpus.config.paths.index_segment,
            );
            let trie = session.trie();
            let Some(listing) =
                listing::assemble_slug(trie, &folder, &corpus.config.listing, Utc::now())
            else {
                return Err(format!("folder not found: {folder:?}").into());
            };
            if html {
                println!(
                    "{}",
                    render::render_folder_page(trie, &listing, &corpus.config).into_string()
                );
            } else {
                output::print_listing_summary(trie, &listing, &corpus.config.site.title);
            }
        }
        Command::Build => {
            let corpus = corpus::load(&cli.source)?;
            init_thread_pool(&corpus.config.processing);
            println!(
                "==> Rendering {} documents \u{2192} {}",
                corpus.len(),
                cli.output.display()
            );
            let report = generate::generate_corpus(&corpus, &cli.output, Utc::now())?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let corpus = corpus::load(&cli.source)?;
            let session = cache::RenderSession::new(
                corpus.documents.clone(),
                &corpus.config.paths.index_segment,
            );
            output::print_check_output(&corpus, session.trie());
            println!("==> Corpus is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
