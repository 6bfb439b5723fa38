use crate::error::{ResolverError, Result};
use crate::git::CommitInfo;
use git2::{ObjectType, Oid, Repository as Git2Repo};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id())
    }

    fn tag_target(&self, tag_name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(reference) => Ok(Some(reference.peel(ObjectType::Commit)?.id())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }

    fn head_commit_id(&self) -> Result<String> {
        Ok(self.head_oid()?.to_string())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let mut tag_oids: HashMap<Oid, String> = HashMap::new();
        let tags = self.repo.tag_names(None)?;
        for tag_name in tags.iter().flatten() {
            if let Ok(Some(oid)) = self.tag_target(tag_name) {
                // keep the lexically greatest name when several tags share a commit
                let entry = tag_oids.entry(oid).or_insert_with(|| tag_name.to_string());
                if tag_name > entry.as_str() {
                    *entry = tag_name.to_string();
                }
            }
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;
        for oid in revwalk {
            if let Some(tag_name) = tag_oids.get(&oid?) {
                debug!(tag = %tag_name, "found latest reachable tag");
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;

        if let Some(tag_name) = tag {
            let oid = self.tag_target(tag_name)?.ok_or_else(|| {
                ResolverError::config(format!("Tag '{}' does not exist", tag_name))
            })?;
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(CommitInfo {
                hash: oid.to_string(),
                message: commit.message().unwrap_or_default().to_string(),
            });
        }

        // Reverse to get chronological order (oldest first)
        commits.reverse();
        Ok(commits)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tag_target(name)?.is_some())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }
}
