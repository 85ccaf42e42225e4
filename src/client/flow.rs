use crate::client::api::{ApiClient, ApiError, SendOtpOutcome, VerifyOtpOutcome};
use crate::client::state::StoredSession;
use serde::{Deserialize, Serialize};

/// Where the login workflow stands. The stage decides which server calls are
/// legal; there are no side-channel flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AuthStage {
    #[default]
    Idle,
    AwaitingCode {
        email: String,
    },
    Authenticated {
        session: StoredSession,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Already logged in; log out first")]
    AlreadyAuthenticated,
    #[error("No code has been requested; request one first")]
    NotAwaitingCode,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives the two-step login against the API: `Idle → AwaitingCode →
/// Authenticated`. Illegal transitions are refused before any request is
/// issued.
pub struct AuthFlow {
    stage: AuthStage,
}

impl AuthFlow {
    pub fn new(stage: AuthStage) -> Self {
        Self { stage }
    }

    pub fn stage(&self) -> &AuthStage {
        &self.stage
    }

    pub fn into_stage(self) -> AuthStage {
        self.stage
    }

    /// Ask the server to send a code. Legal from `Idle`, and from
    /// `AwaitingCode` (a re-request supersedes the outstanding code).
    pub async fn begin_login(
        &mut self,
        api: &ApiClient,
        email: &str,
    ) -> Result<SendOtpOutcome, FlowError> {
        if matches!(self.stage, AuthStage::Authenticated { .. }) {
            return Err(FlowError::AlreadyAuthenticated);
        }

        let outcome = api.send_otp(email).await?;
        if matches!(outcome, SendOtpOutcome::Sent { .. }) {
            self.stage = AuthStage::AwaitingCode {
                email: email.to_string(),
            };
        }

        Ok(outcome)
    }

    /// Submit the received code. Legal only from `AwaitingCode`.
    pub async fn submit_code(
        &mut self,
        api: &ApiClient,
        code: &str,
    ) -> Result<VerifyOtpOutcome, FlowError> {
        let email = match &self.stage {
            AuthStage::AwaitingCode { email } => email.clone(),
            AuthStage::Authenticated { .. } => return Err(FlowError::AlreadyAuthenticated),
            AuthStage::Idle => return Err(FlowError::NotAwaitingCode),
        };

        let outcome = api.verify_otp(&email, code).await?;
        if let VerifyOtpOutcome::Verified { token, user } = &outcome {
            self.stage = AuthStage::Authenticated {
                session: StoredSession {
                    token: token.clone(),
                    user: user.clone(),
                },
            };
        }

        Ok(outcome)
    }

    pub fn logout(&mut self) {
        self.stage = AuthStage::Idle;
    }

    pub fn session(&self) -> Option<&StoredSession> {
        match &self.stage {
            AuthStage::Authenticated { session } => Some(session),
            _ => None,
        }
    }
}
