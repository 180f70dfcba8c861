use crate::error::{Result, VerbumpError};
use crate::plugins::TagManager;
use git2::Repository;
use std::path::Path;
use std::sync::Mutex;

/// Tag manager backed by a git repository via the `git2` crate
///
/// The repository handle lives behind a mutex: libgit2 handles are not Sync
/// and the registry is shared across concurrently running pipelines.
pub struct GitTagManager {
    repo: Mutex<Repository>,
}

impl GitTagManager {
    /// Open or discover a git repository at the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitTagManager {
            repo: Mutex::new(repo),
        })
    }
}

impl TagManager for GitTagManager {
    fn tag_exists(&self, name: &str) -> Result<bool> {
        let repo = self.repo.lock().unwrap();
        let reference_name = format!("refs/tags/{}", name);

        let result = match repo.find_reference(&reference_name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(VerbumpError::tag(format!(
                "Cannot look up tag '{}': {}",
                name, e
            ))),
        };
        result
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let head = repo
            .head()?
            .peel_to_commit()
            .map_err(|e| VerbumpError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        repo.tag_lightweight(name, head.as_object(), false)
            .map_err(|e| VerbumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        repo.tag_delete(name)
            .map_err(|e| VerbumpError::tag(format!("Cannot delete tag '{}': {}", name, e)))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self.repo.lock().unwrap();
        let tags = repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let repo = self.repo.lock().unwrap();

        let head_oid = match repo.head().ok().and_then(|h| h.target()) {
            Some(oid) => oid,
            None => return Ok(None),
        };

        // Map every tag (lightweight or annotated) to the commit it points at
        let mut tag_oids = std::collections::HashMap::new();
        let tags = repo.tag_names(None)?;
        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                if let Ok(tag_obj) = tag_ref.peel(git2::ObjectType::Commit) {
                    tag_oids.insert(tag_obj.id(), tag_name.to_string());
                }
            }
        }

        if tag_oids.is_empty() {
            return Ok(None);
        }

        // Walk history from HEAD; the first tagged commit wins
        let mut revwalk = repo.revwalk()?;
        revwalk.push(head_oid)?;
        for oid in revwalk {
            let oid = oid?;
            if let Some(tag_name) = tag_oids.get(&oid) {
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let mut remote = repo
            .find_remote(remote)
            .map_err(|e| VerbumpError::tag(format!("Cannot find remote: {}", e)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }
            git2::Cred::default()
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| VerbumpError::tag(format!("Failed to push tag '{}': {}", name, e)))?;

        Ok(())
    }
}
