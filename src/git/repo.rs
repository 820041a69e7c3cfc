use crate::error::{ReportError, Result};
use gix::{discover, ObjectId, Repository};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(ReportError::MissingDirectory(path.to_path_buf()));
        }

        let repo = discover(path).map_err(|e| {
            debug!(error = %e, path = %path.display(), "repository discovery failed");
            ReportError::NotARepository(path.to_path_buf())
        })?;

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Name used in report titles and file names: the last component of the
    /// canonical project path.
    pub fn project_name(&self) -> String {
        let canonical = self
            .path
            .canonicalize()
            .unwrap_or_else(|_| self.path.clone());
        canonical
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }

    /// Distinct author names of every commit reachable from any reference,
    /// sorted. Commits that are not present locally, as in shallow clones,
    /// are skipped.
    pub fn authors(&self) -> Result<Vec<String>> {
        let mut authors = BTreeSet::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: Vec<ObjectId> = self.ref_tips()?;

        while let Some(commit_id) = stack.pop() {
            if !seen.insert(commit_id) {
                continue;
            }

            // Parents past a shallow boundary are absent from the object store.
            let commit = match self.repo.find_commit(commit_id) {
                Ok(commit) => commit,
                Err(e) => {
                    debug!(id = %commit_id, error = %e, "skipping commit missing from object store");
                    continue;
                }
            };
            let author = commit.author()?;
            authors.insert(author.name.to_string());

            stack.extend(commit.parent_ids().map(|id| id.detach()));
        }

        debug!(commits = seen.len(), authors = authors.len(), "walked all refs");
        Ok(authors.into_iter().collect())
    }

    /// Commit ids every reference finally points at. References to trees or
    /// blobs are ignored.
    fn ref_tips(&self) -> Result<Vec<ObjectId>> {
        let platform = self
            .repo
            .references()
            .map_err(|e| ReportError::GitRepo(e.to_string()))?;
        let refs = platform
            .all()
            .map_err(|e| ReportError::GitRepo(e.to_string()))?;

        let mut tips = Vec::new();
        for reference in refs {
            let mut reference = reference.map_err(|e| ReportError::GitRepo(e.to_string()))?;
            let id = match reference.peel_to_id_in_place() {
                Ok(id) => id.detach(),
                Err(e) => {
                    debug!(error = %e, "skipping unpeelable reference");
                    continue;
                }
            };
            let object = match self.repo.find_object(id) {
                Ok(object) => object,
                Err(e) => {
                    debug!(%id, error = %e, "skipping reference to missing object");
                    continue;
                }
            };
            if let Ok(commit) = object.try_into_commit() {
                tips.push(commit.id);
            }
        }

        if let Ok(head) = self.repo.head_id() {
            tips.push(head.detach());
        }
        Ok(tips)
    }
}
