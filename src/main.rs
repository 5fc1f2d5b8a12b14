use clap::Parser;
use docsmith::{load_tutorials, publish, Doclet, PublishError, PublishOptions, Tutorial};
use docsmith_render::render_markdown;
use std::fs;
use std::path::PathBuf;

/// Generates a static HTML documentation site from a JSON doclet dump.
#[derive(Debug, Parser)]
#[command(name = "docsmith", version, about)]
struct Cli {
    /// Doclet dump produced by the documentation parser.
    doclets: PathBuf,

    /// Directory the generated site is written into.
    #[arg(short, long, default_value = "out")]
    destination: PathBuf,

    /// Directory with *.hbs files overriding the built-in templates.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory scanned for tutorial sources.
    #[arg(short = 'u', long)]
    tutorials: Option<PathBuf>,

    /// Readme file shown on the home page; .md files are rendered.
    #[arg(short = 'R', long)]
    readme: Option<PathBuf>,

    /// Configuration file; the templates section is read from it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// package.json-style metadata file shown in the home page header.
    #[arg(long)]
    package: Option<PathBuf>,

    /// Title given to the home page's main section.
    #[arg(long = "mainpagetitle")]
    main_page_title: Option<String>,

    /// Include doclets with private access.
    #[arg(short, long)]
    private: bool,
}

fn run(cli: Cli) -> Result<(), PublishError> {
    let doclets: Vec<Doclet> = serde_json::from_str(&fs::read_to_string(&cli.doclets)?)?;

    let settings = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => serde_json::Value::Null,
    };

    let readme = match &cli.readme {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let markdown = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("md") | Some("markdown")
            );
            Some(if markdown { render_markdown(&text) } else { text })
        }
        None => None,
    };

    let tutorials = match &cli.tutorials {
        Some(dir) => load_tutorials(dir)?,
        None => Tutorial::root(),
    };

    let options = PublishOptions {
        destination: cli.destination,
        template: cli.template,
        readme,
        main_page_title: cli.main_page_title,
        include_private: cli.private,
        tutorials: cli.tutorials,
        package: cli.package,
        settings,
        ..PublishOptions::default()
    };

    let report = publish(doclets, &options, tutorials)?;
    println!(
        "Wrote {} pages, {} source listings, {} tutorials and {} static files to {}",
        report.pages,
        report.source_files,
        report.tutorials,
        report.static_files,
        options.destination.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("docsmith: {}", err);
        std::process::exit(1);
    }
}
