use reqwest::StatusCode;

use crate::errors::Error;

/// Status codes that mean the backend no longer accepts the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFailurePolicy {
    statuses: Vec<StatusCode>,
}

impl AuthFailurePolicy {
    pub fn new(codes: &[u16]) -> Result<Self, Error> {
        if codes.is_empty() {
            return Err(Error::Config(
                "At least one auth failure status is required".into(),
            ));
        }
        let mut statuses = Vec::with_capacity(codes.len());
        for code in codes {
            let status = StatusCode::from_u16(*code)
                .map_err(|e| Error::Config(format!("Invalid status code {}: {}", code, e)))?;
            if status.is_success() {
                return Err(Error::Config(format!(
                    "Status {} cannot signal an auth failure",
                    code
                )));
            }
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
        Ok(Self { statuses })
    }

    /// Treats both 401 and 403 as auth failures.
    pub fn unauthorized_or_forbidden() -> Self {
        Self {
            statuses: vec![StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN],
        }
    }

    pub fn is_auth_failure(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status)
    }

    pub fn statuses(&self) -> &[StatusCode] {
        &self.statuses
    }
}

impl Default for AuthFailurePolicy {
    fn default() -> Self {
        Self {
            statuses: vec![StatusCode::FORBIDDEN],
        }
    }
}
