//! Plain-text rendering: fixed-width tables for listings, label rows
//! for single records. Nothing here talks to the network.

use scholarbase_core::{
    Account, DashboardStats, ProjectRecord, ProjectTally, StudentWithProject,
    SupervisorDashboardStats, SupervisorProfile, Tag,
};
use scholarbase_state::{Notice, NoticeLevel};

pub fn notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Error => println!("error: {}", notice.message),
        NoticeLevel::Success | NoticeLevel::Info => println!("{}", notice.message),
    }
}

pub fn project_table(records: &[ProjectRecord]) {
    if records.is_empty() {
        println!("No projects.");
        return;
    }
    println!(
        "{:<6} {:<13} {:<6} {:<36} TAGS",
        "ID", "STATUS", "YEAR", "TITLE"
    );
    for record in records {
        println!(
            "{:<6} {:<13} {:<6} {:<36} {}",
            record.id,
            record.status,
            record.year,
            truncate(&record.title, 34),
            tags_csv(&record.tags),
        );
    }
    println!("{} project(s)", records.len());
}

pub fn project_detail(record: &ProjectRecord) {
    println!("Project #{}", record.id);
    println!("  Title:       {}", record.title);
    println!("  Status:      {}", record.status);
    println!("  Year:        {}", record.year);
    println!("  Tags:        {}", tags_csv(&record.tags));
    println!("  Description: {}", record.description);
    if let Some(problem) = &record.problem_statement {
        println!("  Problem:     {problem}");
    }
    if let Some(url) = &record.file_url {
        println!("  Repository:  {url}");
    }
    if let Some(url) = &record.document_url {
        println!("  Document:    {url}");
    }
    if let Some(comment) = &record.review_comment {
        println!("  Review note: {comment}");
    }
    if let Some(student) = &record.student {
        println!("  Student:     {} ({})", student.name, student.matric_no);
    } else if let Some(id) = record.student_id {
        println!("  Student:     #{id}");
    }
    if let Some(supervisor) = &record.supervisor {
        println!("  Supervisor:  {}", supervisor.name);
    } else if let Some(id) = record.supervisor_id {
        println!("  Supervisor:  #{id}");
    }
    println!(
        "  Created:     {}   Updated: {}",
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.updated_at.format("%Y-%m-%d %H:%M"),
    );
}

pub fn account(user: &Account) {
    println!("{} <{}>", user.name(), user.email());
    println!("  Role:       {}", user.role());
    if let Some(department) = user.department() {
        println!("  Department: {department}");
    }
    match user {
        Account::Student(student) => {
            println!("  Matric No:  {}", student.matric_no);
            if let Some(year) = &student.year {
                println!("  Year:       {year}");
            }
            if let Some(supervisor) = &student.supervisor {
                println!("  Supervisor: {}", supervisor.name);
            }
            if let Some(projects) = &student.projects {
                println!("  Projects:   {}", projects.len());
            }
        }
        Account::Supervisor(supervisor) => {
            if let Some(title) = &supervisor.title {
                println!("  Title:      {title}");
            }
            if let Some(faculty) = &supervisor.faculty {
                println!("  Faculty:    {faculty}");
            }
            if let Some(office) = &supervisor.office_address {
                println!("  Office:     {office}");
            }
            if let Some(students) = &supervisor.students {
                println!("  Students:   {}", students.len());
            }
        }
        Account::Admin(_) => {}
    }
}

pub fn tally(tally: &ProjectTally) {
    println!(
        "My projects: {} total, {} pending, {} approved, {} rejected",
        tally.total, tally.pending, tally.approved, tally.rejected
    );
}

pub fn student_table(rows: &[StudentWithProject]) {
    if rows.is_empty() {
        println!("No students.");
        return;
    }
    println!(
        "{:<6} {:<24} {:<14} {:<20} {:<9} LATEST PROJECT",
        "ID", "NAME", "MATRIC NO", "DEPARTMENT", "PROJECTS"
    );
    for row in rows {
        let latest = row
            .latest_project
            .as_ref()
            .map(|p| format!("{} ({})", truncate(&p.title, 28), p.status))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<24} {:<14} {:<20} {:<9} {}",
            row.id,
            truncate(&row.name, 22),
            row.matric_no,
            truncate(row.department.as_deref().unwrap_or("-"), 18),
            row.project_count,
            latest,
        );
    }
    println!("{} student(s)", rows.len());
}

pub fn supervisor_table(rows: &[SupervisorProfile]) {
    if rows.is_empty() {
        println!("No supervisors.");
        return;
    }
    println!(
        "{:<6} {:<24} {:<20} {:<20} EMAIL",
        "ID", "NAME", "TITLE", "DEPARTMENT"
    );
    for row in rows {
        println!(
            "{:<6} {:<24} {:<20} {:<20} {}",
            row.id,
            truncate(&row.name, 22),
            truncate(row.title.as_deref().unwrap_or("-"), 18),
            truncate(row.department.as_deref().unwrap_or("-"), 18),
            row.email,
        );
    }
    println!("{} supervisor(s)", rows.len());
}

pub fn admin_stats(stats: &DashboardStats) {
    println!("Portal totals");
    println!("  Projects:    {}", stats.total_projects);
    println!("    Pending:   {}", stats.pending_projects);
    println!("    Approved:  {}", stats.approved_projects);
    println!("    Rejected:  {}", stats.rejected_projects);
    println!("  Students:    {}", stats.total_students);
    println!("  Supervisors: {}", stats.total_supervisors);
}

pub fn supervisor_stats(stats: &SupervisorDashboardStats) {
    println!("Supervision totals");
    println!("  Students:           {}", stats.total_students);
    println!("  Projects:           {}", stats.total_projects);
    println!("    Pending:          {}", stats.pending_projects);
    println!("    Approved:         {}", stats.approved_projects);
    println!("    Rejected:         {}", stats.rejected_projects);
    println!("  Recent submissions: {}", stats.recent_submissions);
}

fn tags_csv(tags: &[Tag]) -> String {
    tags.iter()
        .map(Tag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
