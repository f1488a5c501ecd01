//! Shared scalar aliases and the wire enums every portal surface speaks.
//!
//! The enum serializations must match the backend's catalog exactly,
//! including the multi-word display values ("Under Review",
//! "Internet of Things (IoT)").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All portal primary keys are backend-assigned integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/* --------------------------------------------------------------------------
Timestamp (de)serialization
-------------------------------------------------------------------------- */

/// Serde adapter for backend timestamps.
///
/// The backend emits naive ISO 8601 values (`2024-05-01T10:00:00.123456`,
/// no offset) which `DateTime<Utc>` rejects out of the box. Naive values
/// are taken as UTC; offset-carrying RFC 3339 values pass through.
/// Serialization always writes RFC 3339.
pub mod lenient_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &super::Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<super::Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(crate) fn parse(raw: &str) -> Result<super::Timestamp, String> {
        if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
            return Ok(aware.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }
}

/// [`lenient_timestamp`] for optional fields. Missing and `null` both
/// deserialize to `None`.
pub mod lenient_timestamp_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<super::Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<super::Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::lenient_timestamp::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/* --------------------------------------------------------------------------
Role
-------------------------------------------------------------------------- */

/// Account role. Wire values are the capitalized words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Supervisor,
    Admin,
}

impl Role {
    /// All roles, in registration-endpoint order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Supervisor, Role::Admin];

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Supervisor => "Supervisor",
            Role::Admin => "Admin",
        }
    }

    /// The lowercase path segment used by `/auth/register/{role}`.
    pub fn endpoint_slug(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{s}'. Must be one of: Student, Supervisor, Admin"
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Project status
-------------------------------------------------------------------------- */

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Suspended,
}

impl ProjectStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Pending,
        ProjectStatus::UnderReview,
        ProjectStatus::Approved,
        ProjectStatus::Rejected,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Suspended,
    ];

    /// The wire value (display form with spaces).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::UnderReview => "Under Review",
            ProjectStatus::Approved => "Approved",
            ProjectStatus::Rejected => "Rejected",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    /// Accepts the display value case-insensitively; underscores and
    /// hyphens count as spaces, so `under_review` parses too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace(['_', '-'], " ");
        ProjectStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: {}",
                    ProjectStatus::ALL.map(|v| v.as_str()).join(", ")
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Tags
-------------------------------------------------------------------------- */

/// Fixed project tag catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    AI,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Cyber Security")]
    CyberSecurity,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Game Development")]
    GameDevelopment,
    DevOps,
    #[serde(rename = "Internet of Things (IoT)")]
    InternetOfThings,
    Blockchain,
    #[serde(rename = "Software Testing")]
    SoftwareTesting,
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    Networking,
    Databases,
    #[serde(rename = "Embedded Systems")]
    EmbeddedSystems,
    Animation,
    #[serde(rename = "Machine Learning")]
    MachineLearning,
    #[serde(rename = "AR/VR")]
    ArVr,
    #[serde(rename = "Big Data")]
    BigData,
    Robotics,
    Others,
}

impl Tag {
    /// The full catalog, in backend seed order.
    pub const ALL: [Tag; 21] = [
        Tag::AI,
        Tag::WebDevelopment,
        Tag::DataScience,
        Tag::MobileDevelopment,
        Tag::CyberSecurity,
        Tag::CloudComputing,
        Tag::GameDevelopment,
        Tag::DevOps,
        Tag::InternetOfThings,
        Tag::Blockchain,
        Tag::SoftwareTesting,
        Tag::UiUxDesign,
        Tag::Networking,
        Tag::Databases,
        Tag::EmbeddedSystems,
        Tag::Animation,
        Tag::MachineLearning,
        Tag::ArVr,
        Tag::BigData,
        Tag::Robotics,
        Tag::Others,
    ];

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::AI => "AI",
            Tag::WebDevelopment => "Web Development",
            Tag::DataScience => "Data Science",
            Tag::MobileDevelopment => "Mobile Development",
            Tag::CyberSecurity => "Cyber Security",
            Tag::CloudComputing => "Cloud Computing",
            Tag::GameDevelopment => "Game Development",
            Tag::DevOps => "DevOps",
            Tag::InternetOfThings => "Internet of Things (IoT)",
            Tag::Blockchain => "Blockchain",
            Tag::SoftwareTesting => "Software Testing",
            Tag::UiUxDesign => "UI/UX Design",
            Tag::Networking => "Networking",
            Tag::Databases => "Databases",
            Tag::EmbeddedSystems => "Embedded Systems",
            Tag::Animation => "Animation",
            Tag::MachineLearning => "Machine Learning",
            Tag::ArVr => "AR/VR",
            Tag::BigData => "Big Data",
            Tag::Robotics => "Robotics",
            Tag::Others => "Others",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::Validation(format!("Unknown tag '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_values() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"Student\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let role: Role = serde_json::from_str("\"Supervisor\"").unwrap();
        assert_eq!(role, Role::Supervisor);
    }

    #[test]
    fn test_status_multiword_wire_values() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::UnderReview).unwrap(),
            "\"Under Review\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let status: ProjectStatus = serde_json::from_str("\"Under Review\"").unwrap();
        assert_eq!(status, ProjectStatus::UnderReview);
    }

    #[test]
    fn test_status_from_str_normalizes_separators() {
        assert_eq!(
            "under_review".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::UnderReview
        );
        assert_eq!(
            "IN-PROGRESS".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::InProgress
        );
        assert!("shipped".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_tag_wire_values() {
        assert_eq!(
            serde_json::to_string(&Tag::InternetOfThings).unwrap(),
            "\"Internet of Things (IoT)\""
        );
        assert_eq!(serde_json::to_string(&Tag::UiUxDesign).unwrap(), "\"UI/UX Design\"");
        assert_eq!(serde_json::to_string(&Tag::ArVr).unwrap(), "\"AR/VR\"");
        let tag: Tag = serde_json::from_str("\"Machine Learning\"").unwrap();
        assert_eq!(tag, Tag::MachineLearning);
    }

    #[test]
    fn test_tag_catalog_round_trips() {
        for tag in Tag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            let back: Tag = serde_json::from_str(&json).unwrap();
            assert_eq!(back, tag);
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_role_endpoint_slugs() {
        assert_eq!(Role::Student.endpoint_slug(), "student");
        assert_eq!(Role::Supervisor.endpoint_slug(), "supervisor");
        assert_eq!(Role::Admin.endpoint_slug(), "admin");
    }

    #[test]
    fn test_lenient_timestamp_accepts_naive_and_rfc3339() {
        let naive = lenient_timestamp::parse("2024-05-01T10:30:00.123456").unwrap();
        assert_eq!(naive.timestamp_subsec_micros(), 123456);

        let aware = lenient_timestamp::parse("2024-05-01T10:30:00+01:00").unwrap();
        assert_eq!(aware.to_rfc3339(), "2024-05-01T09:30:00+00:00");

        let bare = lenient_timestamp::parse("2024-05-01T10:30:00").unwrap();
        assert_eq!(bare.to_rfc3339(), "2024-05-01T10:30:00+00:00");

        assert!(lenient_timestamp::parse("yesterday").is_err());
    }
}
