use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

use crate::workflow::{WorkflowPolicy, DEFAULT_APPROVAL_THRESHOLD};

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub approval_threshold: u32,
    pub allow_resubmission: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/dragonhub".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            approval_threshold: env::var("APPROVAL_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_APPROVAL_THRESHOLD),
            allow_resubmission: env::var("ALLOW_RESUBMISSION")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }

    pub fn workflow_policy(&self) -> WorkflowPolicy {
        WorkflowPolicy {
            approval_threshold: self.approval_threshold,
            allow_resubmission: self.allow_resubmission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_policy_carries_config_values() {
        let config = Config {
            database_url: String::new(),
            port: 0,
            approval_threshold: 5,
            allow_resubmission: false,
        };
        let policy = config.workflow_policy();
        assert_eq!(policy.approval_threshold, 5);
        assert!(!policy.allow_resubmission);
    }
}
