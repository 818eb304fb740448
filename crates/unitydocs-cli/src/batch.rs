//! Converting many files at once.
//!
//! Every file is converted independently on the rayon pool. A failing file
//! is recorded and the rest of the batch carries on; nothing is written for
//! a file that failed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use rayon::prelude::*;
use unitydocs::{markdown_to_html, UnityDocsConverter};
use walkdir::WalkDir;

/// Files skipped by default when converting an HTML directory
pub const DEFAULT_IGNORED: &[&str] = &["UnityIAPStoreGuides.html"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HtmlToMarkdown,
    MarkdownToHtml,
}

impl Direction {
    pub fn input_extension(self) -> &'static str {
        match self {
            Direction::HtmlToMarkdown => "html",
            Direction::MarkdownToHtml => "md",
        }
    }

    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::HtmlToMarkdown => "md",
            Direction::MarkdownToHtml => "html",
        }
    }

    fn convert(self, converter: &UnityDocsConverter, text: &str) -> unitydocs::Result<String> {
        match self {
            Direction::HtmlToMarkdown => converter
                .convert(text)
                .map(|markdown| format!("{}\n", markdown.trim())),
            Direction::MarkdownToHtml => markdown_to_html(text),
        }
    }
}

/// One invocation of the converter over a file or directory
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub direction: Direction,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub clean: bool,
    pub recursive: bool,
    pub ignored: Vec<String>,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: usize,
    /// Failed inputs, sorted by path
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Multi-line summary of every failure
    pub fn failure_summary(&self) -> String {
        let lines: Vec<String> = self
            .failures
            .iter()
            .map(|(path, err)| format!("{} => {:#}", path.display(), err))
            .collect();
        format!("Failed to convert file(s):\n{}", lines.join("\n"))
    }
}

/// A file to convert and where its output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Run a whole job: prepare the output directory, then convert every input
pub fn run(job: &BatchJob) -> Result<BatchReport> {
    let items = collect_work(job)?;
    if job.clean {
        ensure_outside_input(&job.input, &job.output_dir)?;
    }
    prepare_output_dir(&job.output_dir, job.clean)?;

    let total = items.len();
    info!("converting {} file(s) into {}", total, job.output_dir.display());

    let converter = UnityDocsConverter::new();
    let done = AtomicUsize::new(0);

    let results: Vec<(PathBuf, Result<()>)> = items
        .par_iter()
        .map(|item| {
            let result = convert_file(&converter, job.direction, item);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            match &result {
                Ok(()) => info!("[{}/{}] {}", n, total, item.input.display()),
                Err(err) => warn!("[{}/{}] {}: {:#}", n, total, item.input.display(), err),
            }
            (item.input.clone(), result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(()) => report.converted += 1,
            Err(err) => report.failures.push((path, err)),
        }
    }
    report.failures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(report)
}

/// Remove (with `clean`) and recreate the output directory
pub fn prepare_output_dir(dir: &Path, clean: bool) -> Result<()> {
    if clean && dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("failed to clean {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

/// Refuse to clean an output directory that holds the input
pub fn ensure_outside_input(input: &Path, output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        return Ok(());
    }
    let input = input
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", input.display()))?;
    let output_dir = output_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", output_dir.display()))?;
    if input.starts_with(&output_dir) {
        bail!(
            "refusing to clean {}: it contains the input {}",
            output_dir.display(),
            input.display()
        );
    }
    Ok(())
}

/// Resolve the inputs of a job and their output paths
pub fn collect_work(job: &BatchJob) -> Result<Vec<WorkItem>> {
    if job.input.is_file() {
        let name = job
            .input
            .file_name()
            .with_context(|| format!("{} has no file name", job.input.display()))?;
        return Ok(vec![WorkItem {
            input: job.input.clone(),
            output: output_path(&job.output_dir, Path::new(name), job.direction),
        }]);
    }
    if !job.input.is_dir() {
        bail!("{} is neither a file nor a directory", job.input.display());
    }

    let ignored: Vec<String> = if job.ignored.is_empty() && job.direction == Direction::HtmlToMarkdown {
        DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect()
    } else {
        job.ignored.clone()
    };

    let max_depth = if job.recursive { usize::MAX } else { 1 };
    let mut items = Vec::new();
    for entry in WalkDir::new(&job.input)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .follow_links(false)
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches_extension = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(job.direction.input_extension()));
        let is_ignored = ignored
            .iter()
            .any(|name| entry.file_name().to_str() == Some(name.as_str()));
        if !matches_extension || is_ignored {
            continue;
        }

        let relative = path.strip_prefix(&job.input).unwrap_or(path);
        items.push(WorkItem {
            input: path.to_path_buf(),
            output: output_path(&job.output_dir, relative, job.direction),
        });
    }
    Ok(items)
}

/// `output_dir/relative` with the extension swapped
pub fn output_path(output_dir: &Path, relative: &Path, direction: Direction) -> PathBuf {
    output_dir
        .join(relative)
        .with_extension(direction.output_extension())
}

fn convert_file(converter: &UnityDocsConverter, direction: Direction, item: &WorkItem) -> Result<()> {
    let text = fs::read_to_string(&item.input)
        .with_context(|| format!("failed to read {}", item.input.display()))?;
    let output = direction.convert(converter, &text)?;

    if let Some(parent) = item.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&item.output, output)
        .with_context(|| format!("failed to write {}", item.output.display()))
}
