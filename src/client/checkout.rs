use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CardError {
    #[error("Invalid card number")]
    InvalidNumber,
    #[error("Invalid CVV")]
    InvalidCvv,
}

/// Mock checkout form. Validation matches the storefront's rules: 16 card
/// digits (spaces allowed) and a 3-digit CVV; the expiry is carried but not
/// checked, and nothing is ever charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn validate(&self) -> Result<(), CardError> {
        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::InvalidNumber);
        }

        if self.cvv.len() != 3 || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardError::InvalidCvv);
        }

        Ok(())
    }
}
