// src/users/validators.rs

use super::models::UpdateProfileRequest;
use crate::common::{ValidationResult, Validator};

/// Validates partial profile updates
pub struct ProfileValidator;

impl Validator<UpdateProfileRequest> for ProfileValidator {
    fn validate(&self, data: &UpdateProfileRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.bio.is_none()
            && data.resume_url.is_none()
            && data.portfolio_url.is_none()
            && data.tech_stack.is_none()
        {
            result.add_error("general", "at least one field must be provided");
        }

        if let Some(tech_stack) = &data.tech_stack {
            if tech_stack.iter().any(|tag| tag.trim().is_empty()) {
                result.add_error("tech_stack", "tags must not be empty");
            }
        }

        if let Some(portfolio_url) = &data.portfolio_url {
            if portfolio_url.iter().any(|url| url.trim().is_empty()) {
                result.add_error("portfolio_url", "urls must not be empty");
            }
        }

        result
    }
}
