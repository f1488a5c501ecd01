//! The project screens: browse and search, the student dashboard,
//! submission and editing, deletion.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};

use scholarbase_core::{
    CreateProject, DbId, DocumentUpload, ProjectFilter, ProjectStatus, RouteRequirement, Role,
    Tag, UpdateProject,
};

use crate::commands::{parse_status, parse_tag};
use crate::context::Portal;
use crate::render;

/// Listing constraints shared by `browse` and `list`. Unset flags are
/// no constraint.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Free-text search over title and description
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    department: Option<String>,
    /// Repeatable; a project passes when it carries any selected tag
    #[arg(long = "tag", value_parser = parse_tag)]
    tags: Vec<Tag>,
    /// Exact status, e.g. "Pending" or "Under Review"
    #[arg(long, value_parser = parse_status)]
    status: Option<ProjectStatus>,
    #[arg(long)]
    supervisor_id: Option<DbId>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

impl FilterArgs {
    fn into_filter(self) -> ProjectFilter {
        ProjectFilter {
            search: self.search,
            year: self.year,
            department: self.department,
            tags: self.tags,
            status: self.status,
            supervisor_id: self.supervisor_id,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// Approved projects (the public browse screen)
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// The full filtered corpus
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Your own submissions with the status tally
    Mine,
    /// One project in full
    Show { id: DbId },
    /// Submit a new project for review (students)
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        #[arg(long)]
        description: String,
        /// Repeatable; at least one tag is required
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<Tag>,
        /// Repository or demo URL
        #[arg(long)]
        file_url: Option<String>,
        #[arg(long)]
        supervisor_id: Option<DbId>,
        /// Path of a report or proposal to attach
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Edit one of your submissions; only the given flags change (students)
    Update {
        id: DbId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Repeatable; replaces the tag set when given
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<Tag>,
        #[arg(long)]
        file_url: Option<String>,
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Delete a project
    Delete { id: DbId },
}

pub async fn run(portal: &mut Portal, command: ProjectsCommand) -> Result<()> {
    match command {
        ProjectsCommand::Browse { filter } => browse(portal, filter.into_filter()).await,
        ProjectsCommand::List { filter } => list(portal, filter.into_filter()).await,
        ProjectsCommand::Mine => mine(portal).await,
        ProjectsCommand::Show { id } => show(portal, id).await,
        ProjectsCommand::Submit {
            title,
            year,
            description,
            tags,
            file_url,
            supervisor_id,
            document,
        } => {
            let document = read_document(document.as_deref()).await?;
            let data = CreateProject {
                title,
                year,
                description,
                tags,
                file_url,
                supervisor_id,
                document,
            };
            submit(portal, &data).await
        }
        ProjectsCommand::Update {
            id,
            title,
            year,
            description,
            tags,
            file_url,
            document,
        } => {
            let document = read_document(document.as_deref()).await?;
            let data = UpdateProject {
                id,
                title,
                year,
                description,
                tags: (!tags.is_empty()).then_some(tags),
                file_url,
                document,
            };
            update(portal, &data).await
        }
        ProjectsCommand::Delete { id } => delete(portal, id).await,
    }
}

async fn browse(portal: &Portal, filter: ProjectFilter) -> Result<()> {
    portal.projects.load_approved(&filter).await;
    ensure_loaded(portal).await?;
    render::project_table(&portal.projects.approved().await);
    Ok(())
}

async fn list(portal: &Portal, filter: ProjectFilter) -> Result<()> {
    portal.projects.load_all(&filter).await;
    ensure_loaded(portal).await?;
    render::project_table(&portal.projects.all().await);
    Ok(())
}

async fn mine(portal: &Portal) -> Result<()> {
    portal
        .ensure_allowed("/dashboard", &RouteRequirement::authenticated())
        .await?;
    portal.projects.load_mine().await;
    ensure_loaded(portal).await?;
    render::tally(&portal.projects.my_tally().await);
    render::project_table(&portal.projects.mine().await);
    Ok(())
}

async fn show(portal: &Portal, id: DbId) -> Result<()> {
    portal.projects.load_one(id).await;
    ensure_loaded(portal).await?;
    match portal.projects.current().await {
        Some(record) => {
            render::project_detail(&record);
            Ok(())
        }
        None => bail!("project {id} not found"),
    }
}

async fn submit(portal: &mut Portal, data: &CreateProject) -> Result<()> {
    portal
        .ensure_allowed("/submit-project", &RouteRequirement::roles([Role::Student]))
        .await?;
    match portal.projects.create(data).await {
        Some(record) => {
            portal.drain_notices();
            render::project_detail(&record);
            Ok(())
        }
        None => bail!(store_error(portal, "submission failed").await),
    }
}

async fn update(portal: &mut Portal, data: &UpdateProject) -> Result<()> {
    portal
        .ensure_allowed("/edit-project", &RouteRequirement::roles([Role::Student]))
        .await?;
    match portal.projects.update(data).await {
        Some(record) => {
            portal.drain_notices();
            render::project_detail(&record);
            Ok(())
        }
        None => bail!(store_error(portal, "update failed").await),
    }
}

async fn delete(portal: &mut Portal, id: DbId) -> Result<()> {
    portal
        .ensure_allowed("/dashboard", &RouteRequirement::authenticated())
        .await?;
    if !portal.projects.delete(id).await {
        bail!(store_error(portal, "delete failed").await);
    }
    portal.drain_notices();
    Ok(())
}

async fn ensure_loaded(portal: &Portal) -> Result<()> {
    if let Some(message) = portal.projects.error().await {
        bail!(message);
    }
    Ok(())
}

pub(crate) async fn store_error(portal: &Portal, fallback: &str) -> String {
    portal
        .projects
        .error()
        .await
        .unwrap_or_else(|| fallback.to_string())
}

async fn read_document(path: Option<&Path>) -> Result<Option<DocumentUpload>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document")
        .to_string();
    Ok(Some(DocumentUpload { file_name, content }))
}
