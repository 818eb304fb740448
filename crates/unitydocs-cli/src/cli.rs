use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::batch::{BatchJob, Direction};

#[derive(Parser)]
#[command(name = "unitydocs", version)]
#[command(about = "Convert Unity documentation between HTML and Markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert exported HTML pages to Markdown
    #[command(name = "html2md")]
    Html2Md(ConvertArgs),
    /// Render Markdown pages back to HTML
    #[command(name = "md2html")]
    Md2Html(ConvertArgs),
}

impl Commands {
    pub fn args(&self) -> &ConvertArgs {
        match self {
            Commands::Html2Md(args) | Commands::Md2Html(args) => args,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Commands::Html2Md(_) => Direction::HtmlToMarkdown,
            Commands::Md2Html(_) => Direction::MarkdownToHtml,
        }
    }

    pub fn into_job(self) -> BatchJob {
        let direction = self.direction();
        let (Commands::Html2Md(args) | Commands::Md2Html(args)) = self;
        BatchJob {
            direction,
            input: args.input,
            output_dir: args.output_dir,
            clean: args.clean,
            recursive: args.recursive,
            ignored: args.ignore,
        }
    }
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// File or directory to convert
    pub input: PathBuf,

    /// Where to put the converted files
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// Remove the output directory before converting
    #[arg(short, long)]
    pub clean: bool,

    /// File names (without directory) to skip when converting a directory
    #[arg(short, long, value_name = "FILE_NAME")]
    pub ignore: Vec<String>,

    /// Scan the input directory recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of files converted in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,
}
