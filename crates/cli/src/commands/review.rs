//! Moderation commands and the supervisor dashboard surfaces.

use anyhow::{bail, Result};
use clap::Subcommand;

use scholarbase_core::{DbId, ProjectStatus, RouteRequirement, Role};

use crate::commands::{friendly, parse_status, projects::store_error};
use crate::context::Portal;
use crate::render;

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// Approve a pending project
    Approve { id: DbId },
    /// Reject a project, optionally with a reason
    Reject {
        id: DbId,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Move a project to an arbitrary review status
    Status {
        id: DbId,
        /// e.g. "Under Review" or "Completed"
        #[arg(long, value_parser = parse_status)]
        status: ProjectStatus,
        #[arg(long)]
        comment: Option<String>,
    },
}

pub async fn run(portal: &mut Portal, command: ReviewCommand) -> Result<()> {
    portal
        .ensure_allowed(
            "/review",
            &RouteRequirement::roles([Role::Supervisor, Role::Admin]),
        )
        .await?;

    let done = match command {
        ReviewCommand::Approve { id } => portal.projects.approve(id).await,
        ReviewCommand::Reject { id, reason } => {
            portal.projects.reject(id, reason.as_deref()).await
        }
        ReviewCommand::Status {
            id,
            status,
            comment,
        } => {
            portal
                .projects
                .update_status(id, status, comment.as_deref())
                .await
        }
    };

    if !done {
        bail!(store_error(portal, "moderation failed").await);
    }
    portal.drain_notices();
    Ok(())
}

#[derive(Subcommand)]
pub enum SupervisorCommand {
    /// Projects submitted by your students
    Projects,
    /// Your students with their latest submission
    Students,
    /// Supervision totals for the dashboard header
    Stats,
}

pub async fn run_supervisor(portal: &Portal, command: SupervisorCommand) -> Result<()> {
    portal
        .ensure_allowed("/supervisor", &RouteRequirement::roles([Role::Supervisor]))
        .await?;

    match command {
        SupervisorCommand::Projects => {
            let projects = portal.api.supervised_projects().await.map_err(friendly)?;
            render::project_table(&projects);
        }
        SupervisorCommand::Students => {
            let students = portal.api.supervised_students().await.map_err(friendly)?;
            render::student_table(&students);
        }
        SupervisorCommand::Stats => {
            let stats = portal
                .api
                .supervisor_dashboard_stats()
                .await
                .map_err(friendly)?;
            render::supervisor_stats(&stats);
        }
    }
    Ok(())
}
