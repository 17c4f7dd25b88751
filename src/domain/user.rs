//! User - Account Records and Auth Payloads

use serde::{Deserialize, Serialize};

/// A signed-in user; held in memory only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub employee_id: String,
    #[serde(default)]
    pub job_role: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST /register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub employee_id: String,
}

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `/register` and `/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Job role implied by the two-letter employee id prefix
pub fn job_role_for(employee_id: &str) -> &'static str {
    match employee_id.get(..2) {
        Some("AD") => "Administrator",
        Some("SV") => "Supervisor",
        Some("SM") => "Safety Manager",
        Some("OP") => "Operator",
        _ => "Employee",
    }
}

impl From<&RegisterRequest> for User {
    fn from(profile: &RegisterRequest) -> Self {
        Self {
            id: None,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            employee_id: profile.employee_id.clone(),
            job_role: Some(job_role_for(&profile.employee_id).to_string()),
        }
    }
}
