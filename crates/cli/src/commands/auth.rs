//! Sign-in, registration, sign-out, and the profile readout.

use anyhow::{bail, Result};
use clap::Subcommand;

use scholarbase_core::{
    AdminRegistration, RegisterRequest, StudentRegistration, SupervisorRegistration,
};

use crate::context::Portal;
use crate::render;

/// Role-specific registration forms, one subcommand per role.
#[derive(Subcommand)]
pub enum RegisterCommand {
    /// Register a student account
    Student {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Matriculation number, e.g. CSC/2020/041
        #[arg(long)]
        matric_no: String,
        #[arg(long)]
        department: Option<String>,
    },
    /// Register a supervisor account
    Supervisor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        department: Option<String>,
        /// Academic title, e.g. "Senior Lecturer"
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
        #[arg(long)]
        office_address: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Register an admin account
    Admin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        department: Option<String>,
    },
}

impl RegisterCommand {
    fn into_request(self) -> RegisterRequest {
        match self {
            RegisterCommand::Student {
                name,
                email,
                password,
                matric_no,
                department,
            } => RegisterRequest::Student(StudentRegistration {
                name,
                email,
                password,
                department,
                matric_no,
            }),
            RegisterCommand::Supervisor {
                name,
                email,
                password,
                department,
                title,
                faculty,
                office_address,
                phone_number,
                bio,
            } => RegisterRequest::Supervisor(SupervisorRegistration {
                name,
                email,
                password,
                department,
                title,
                faculty,
                office_address,
                phone_number,
                bio,
            }),
            RegisterCommand::Admin {
                name,
                email,
                password,
                department,
            } => RegisterRequest::Admin(AdminRegistration {
                name,
                email,
                password,
                department,
            }),
        }
    }
}

pub async fn login(portal: &Portal, email: &str, password: &str) -> Result<()> {
    if !portal.auth.login(email, password).await {
        bail!(auth_error(portal, "login failed").await);
    }
    if let Some(user) = portal.auth.current_user().await {
        println!("Signed in as {} ({})", user.name(), user.role());
    }
    Ok(())
}

pub async fn register(portal: &Portal, command: RegisterCommand) -> Result<()> {
    let request = command.into_request();
    if !portal.auth.register(&request).await {
        bail!(auth_error(portal, "registration failed").await);
    }
    if let Some(user) = portal.auth.current_user().await {
        println!("Account created. Signed in as {} ({})", user.name(), user.role());
    }
    Ok(())
}

pub async fn logout(portal: &Portal) -> Result<()> {
    portal.auth.logout().await;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(portal: &Portal, refresh: bool) -> Result<()> {
    if !portal.auth.is_authenticated().await {
        println!("Not signed in.");
        return Ok(());
    }
    match portal.auth.refresh_profile(refresh).await {
        Some(user) => {
            render::account(&user);
            Ok(())
        }
        None => bail!(auth_error(portal, "profile fetch failed").await),
    }
}

async fn auth_error(portal: &Portal, fallback: &str) -> String {
    portal
        .auth
        .error()
        .await
        .unwrap_or_else(|| fallback.to_string())
}
