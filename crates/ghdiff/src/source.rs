//! Where diff text comes from: stdin or `git diff` in a repository.

use anyhow::{Context, Result, bail};
use ghdiff_config::AppConfig;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

use crate::cli::DiffTarget;

/// Produces raw unified diff text.
pub trait DiffSource {
    /// Short human readable label, used in logs.
    fn describe(&self) -> String;

    fn diff_text(&self) -> Result<String>;
}

/// Reads the whole of stdin.
pub struct StdinSource;

impl DiffSource for StdinSource {
    fn describe(&self) -> String {
        "stdin".to_string()
    }

    fn diff_text(&self) -> Result<String> {
        read_diff(std::io::stdin().lock()).context("Failed to read diff from stdin")
    }
}

/// Read all of `reader`, replacing invalid UTF-8 like git output does.
fn read_diff(mut reader: impl Read) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A git working copy that commands run in.
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        log::debug!("Running git {} in {}", args.join(" "), self.dir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = [stderr.trim(), stdout.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("git {} failed ({}): {}", args.join(" "), output.status, detail);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// First of `candidates` that exists as a local branch.
    pub fn main_branch(&self, candidates: &[String]) -> Result<String> {
        for name in candidates {
            let refname = format!("refs/heads/{name}");
            if self
                .run_git(&["rev-parse", "--verify", "--quiet", &refname])
                .is_ok()
            {
                log::debug!("Using {} as main branch", name);
                return Ok(name.clone());
            }
            log::trace!("Branch {} not found", name);
        }
        bail!("could not find main branch (tried {})", candidates.join(", "))
    }

    pub fn merge_base(&self, a: &str, b: &str) -> Result<String> {
        validate_ref(a)?;
        validate_ref(b)?;
        let out = self
            .run_git(&["merge-base", a, b])
            .with_context(|| format!("Failed to find merge-base of {a} and {b}"))?;
        Ok(out.trim().to_string())
    }

    /// `git diff <base> [<target>]`, with external diff drivers disabled.
    pub fn diff(&self, base: &str, target: Option<&str>) -> Result<String> {
        validate_ref(base)?;
        let mut args = vec!["diff", "--no-ext-diff", base];
        if let Some(target) = target {
            validate_ref(target)?;
            args.push(target);
        }
        self.run_git(&args)
    }
}

/// Refuse refs git would read as options.
pub fn validate_ref(reference: &str) -> Result<()> {
    if reference.is_empty() {
        bail!("empty git ref");
    }
    if reference.starts_with('-') {
        bail!("invalid git ref {reference:?}: must not start with '-'");
    }
    Ok(())
}

/// `git diff` between a base and an optional target, in one repository.
pub struct GitDiff {
    repo: GitRepo,
    base: String,
    target: Option<String>,
}

impl GitDiff {
    pub fn new(repo: GitRepo, base: impl Into<String>, target: Option<String>) -> Self {
        Self {
            repo,
            base: base.into(),
            target,
        }
    }
}

impl DiffSource for GitDiff {
    fn describe(&self) -> String {
        match &self.target {
            Some(target) => format!("git diff {} {}", self.base, target),
            None => format!("git diff {}", self.base),
        }
    }

    fn diff_text(&self) -> Result<String> {
        self.repo.diff(&self.base, self.target.as_deref())
    }
}

/// Pick the source for `target`. Merge-base mode queries git right away.
pub fn for_target(
    target: DiffTarget,
    repo: GitRepo,
    config: &AppConfig,
) -> Result<Box<dyn DiffSource>> {
    let source: Box<dyn DiffSource> = match target {
        DiffTarget::Stdin => Box::new(StdinSource),
        DiffTarget::WorkingTree => Box::new(GitDiff::new(repo, "HEAD", None)),
        DiffTarget::Commit(base) => Box::new(GitDiff::new(repo, base, None)),
        DiffTarget::Compare(base, target) => Box::new(GitDiff::new(repo, base, Some(target))),
        DiffTarget::MergeBase => {
            let main = repo.main_branch(&config.main_branches)?;
            let base = repo.merge_base("HEAD", &main)?;
            log::info!("Merge-base of HEAD and {} is {}", main, base);
            Box::new(GitDiff::new(repo, base, None))
        }
    };
    Ok(source)
}
