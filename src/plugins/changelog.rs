use crate::domain::SemanticVersion;
use crate::error::{Result, VerbumpError};
use crate::plugins::ChangelogGenerator;
use git2::Repository;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Changelog generator that collects commit subjects from git history
///
/// Entries for the range `(previous_tag, HEAD]` are prepended to the
/// changelog file as a dated section for the new version. When no previous
/// tag exists the whole history is used.
pub struct GitChangelogGenerator {
    repo: Mutex<Repository>,
    changelog_path: PathBuf,
}

impl GitChangelogGenerator {
    pub fn new<P: Into<PathBuf>>(repo_dir: &std::path::Path, changelog_path: P) -> Result<Self> {
        let repo = Repository::discover(repo_dir)?;
        Ok(GitChangelogGenerator {
            repo: Mutex::new(repo),
            changelog_path: changelog_path.into(),
        })
    }

    /// Commit subjects from `(previous_tag, HEAD]`, oldest first
    fn collect_subjects(&self, previous_tag: Option<&str>) -> Result<Vec<String>> {
        let repo = self.repo.lock().unwrap();

        let head_oid = repo
            .head()?
            .target()
            .ok_or_else(|| VerbumpError::tag("HEAD is detached or invalid"))?;

        let stop_oid = match previous_tag {
            Some(tag) => repo
                .find_reference(&format!("refs/tags/{}", tag))
                .ok()
                .and_then(|r| r.peel(git2::ObjectType::Commit).ok())
                .map(|obj| obj.id()),
            None => None,
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.push(head_oid)?;

        let mut subjects = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if Some(oid) == stop_oid {
                break;
            }
            if let Ok(commit) = repo.find_commit(oid) {
                let subject = commit
                    .summary()
                    .unwrap_or("(empty message)")
                    .to_string();
                subjects.push(subject);
            }
        }

        subjects.reverse();
        Ok(subjects)
    }
}

impl ChangelogGenerator for GitChangelogGenerator {
    fn generate(&self, previous_tag: Option<&str>, next: &SemanticVersion) -> Result<()> {
        let subjects = self.collect_subjects(previous_tag)?;
        debug!(
            count = subjects.len(),
            from = previous_tag.unwrap_or("(start)"),
            "collected changelog entries"
        );

        let date = chrono::Local::now().format("%Y-%m-%d");
        let mut section = format!("## {} - {}\n\n", next, date);
        if subjects.is_empty() {
            section.push_str("- No changes recorded\n");
        } else {
            for subject in &subjects {
                section.push_str(&format!("- {}\n", subject));
            }
        }
        section.push('\n');

        let previous_contents = match fs::read_to_string(&self.changelog_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(VerbumpError::post_action(
                    "changelog",
                    format!("Cannot read '{}': {}", self.changelog_path.display(), e),
                ))
            }
        };

        fs::write(&self.changelog_path, format!("{}{}", section, previous_contents)).map_err(
            |e| {
                VerbumpError::post_action(
                    "changelog",
                    format!("Cannot write '{}': {}", self.changelog_path.display(), e),
                )
            },
        )?;

        Ok(())
    }
}
