//! Administration surfaces: portal totals, rosters, account
//! provisioning, and supervisor assignment.

use anyhow::Result;
use clap::{Args, Subcommand};

use scholarbase_core::{CreateStudentAccount, DbId, RouteRequirement, Role, StudentFilter};

use crate::commands::friendly;
use crate::context::Portal;
use crate::render;

#[derive(Args, Default)]
pub struct StudentFilterArgs {
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    year: Option<String>,
    /// Matches name, email, or matric number
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

impl StudentFilterArgs {
    fn into_filter(self) -> StudentFilter {
        StudentFilter {
            department: self.department,
            year: self.year,
            search: self.search,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Portal-wide totals
    Stats,
    /// The student roster
    Students {
        #[command(flatten)]
        filter: StudentFilterArgs,
    },
    /// The supervisor roster
    Supervisors,
    /// Every project in the corpus
    Projects,
    /// Provision a student account (credentials are issued out of band)
    AddStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        matric_no: String,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        supervisor_id: Option<DbId>,
    },
    /// Remove a student account
    RemoveStudent { id: DbId },
    /// Assign a supervisor to a student
    Assign {
        student_id: DbId,
        #[arg(long)]
        supervisor_id: DbId,
    },
}

pub async fn run(portal: &Portal, command: AdminCommand) -> Result<()> {
    portal
        .ensure_allowed("/admin", &RouteRequirement::roles([Role::Admin]))
        .await?;

    match command {
        AdminCommand::Stats => {
            let stats = portal.api.admin_dashboard_stats().await.map_err(friendly)?;
            render::admin_stats(&stats);
        }
        AdminCommand::Students { filter } => {
            let students = portal
                .api
                .list_students(&filter.into_filter())
                .await
                .map_err(friendly)?;
            render::student_table(&students);
        }
        AdminCommand::Supervisors => {
            let supervisors = portal.api.list_supervisors().await.map_err(friendly)?;
            render::supervisor_table(&supervisors);
        }
        AdminCommand::Projects => {
            let projects = portal.api.list_admin_projects().await.map_err(friendly)?;
            render::project_table(&projects);
        }
        AdminCommand::AddStudent {
            name,
            email,
            matric_no,
            year,
            department,
            supervisor_id,
        } => {
            let data = CreateStudentAccount {
                name,
                email,
                matric_no,
                year,
                department,
                supervisor_id,
            };
            let student = portal.api.create_student(&data).await.map_err(friendly)?;
            println!(
                "Student account created: {} ({}), id {}",
                student.name, student.matric_no, student.id
            );
        }
        AdminCommand::RemoveStudent { id } => {
            portal.api.delete_student(id).await.map_err(friendly)?;
            println!("Student {id} removed.");
        }
        AdminCommand::Assign {
            student_id,
            supervisor_id,
        } => {
            let student = portal
                .api
                .assign_supervisor(student_id, supervisor_id)
                .await
                .map_err(friendly)?;
            match student.supervisor_id {
                Some(id) => println!("{} is now supervised by #{id}.", student.name),
                None => println!("{} has no supervisor assigned.", student.name),
            }
        }
    }
    Ok(())
}
