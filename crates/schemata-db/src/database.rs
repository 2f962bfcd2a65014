use std::path::PathBuf;

use miette::Report;
use schemata_resolve::{RequeuePolicy, Resolution, ResolutionEngine, TypeEntry, TypeRegistry};
use schemata_source::{Project, RequeueMode};
use schemata_syntax::Schema;

use crate::error::{DatabaseError, DatabaseResult};
use crate::parser::AvroParser;

/// Entry point for resolving a project on disk.
#[derive(Debug, Clone)]
pub struct Compiler {
    root: PathBuf,
}

impl Compiler {
    pub fn new(root: PathBuf) -> Self {
        Compiler { root }
    }

    /// Reads the configuration and discovers the project's schema files.
    pub fn load_project(&self) -> DatabaseResult<Project> {
        Ok(Project::load(&self.root)?)
    }

    /// Loads the project and resolves every schema file in it.
    ///
    /// Files that never resolve are not an error here; check
    /// [`ResolvedProject::is_complete`].
    pub fn resolve(&self) -> DatabaseResult<ResolvedProject> {
        resolve_project(self.load_project()?)
    }
}

/// Resolves an already-loaded project.
pub fn resolve_project(project: Project) -> DatabaseResult<ResolvedProject> {
    let policy = match project.config().resolve.requeue {
        RequeueMode::All => RequeuePolicy::All,
        RequeueMode::Targeted => RequeuePolicy::Targeted,
    };
    log::info!(
        "Resolving {} file(s) in {} ({:?} requeue)",
        project.files().len(),
        project.root().display(),
        policy
    );

    let engine = ResolutionEngine::from_sources(AvroParser, project.files().iter().cloned())
        .map_err(|err| DatabaseError::from_resolve(err, &project))?
        .with_requeue_policy(policy);
    let resolution = engine.run().map_err(|err| DatabaseError::from_resolve(err, &project))?;

    Ok(ResolvedProject { project, resolution })
}

/// A project together with its resolution outcome.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    project: Project,
    resolution: Resolution<Schema>,
}

impl ResolvedProject {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn resolution(&self) -> &Resolution<Schema> {
        &self.resolution
    }

    pub fn registry(&self) -> &TypeRegistry<Schema> {
        self.resolution.registry()
    }

    /// Resolved types, sorted by full name.
    pub fn types(&self) -> Vec<&TypeEntry<Schema>> {
        let mut types: Vec<_> = self.registry().iter().collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types
    }

    pub fn processed_count(&self) -> usize {
        self.resolution.processed_count()
    }

    pub fn file_count(&self) -> usize {
        self.project.files().len()
    }

    pub fn is_complete(&self) -> bool {
        self.resolution.is_complete()
    }

    pub fn unresolved_paths(&self) -> Vec<&str> {
        self.resolution.unresolved_paths()
    }

    /// Renderable reports for every diagnostic of the run.
    pub fn reports(&self) -> Vec<Report> {
        self.resolution.diagnostics().into_iter().map(Report::new).collect()
    }
}
