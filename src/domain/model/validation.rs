//! Validation rules for model record payloads

use thiserror::Error;

use super::entity::{ModelPatch, NewModelRecord};

/// Validation errors for model payloads
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelValidationError {
    #[error("Predict function name must not be empty")]
    EmptyPredictFunction,

    #[error("Processing step name must not be empty")]
    EmptyProcessingStep,
}

fn validate_steps(steps: &[String]) -> Result<(), ModelValidationError> {
    if steps.iter().any(|s| s.trim().is_empty()) {
        return Err(ModelValidationError::EmptyProcessingStep);
    }

    Ok(())
}

/// Validate a creation payload
pub fn validate_new_model(fields: &NewModelRecord) -> Result<(), ModelValidationError> {
    if fields.predict_function.trim().is_empty() {
        return Err(ModelValidationError::EmptyPredictFunction);
    }

    validate_steps(&fields.pre_processing_order)?;
    validate_steps(&fields.post_processing_order)?;

    Ok(())
}

/// Validate a patch payload; only present fields are checked
pub fn validate_model_patch(patch: &ModelPatch) -> Result<(), ModelValidationError> {
    if let Some(ref predict_function) = patch.predict_function {
        if predict_function.trim().is_empty() {
            return Err(ModelValidationError::EmptyPredictFunction);
        }
    }

    if let Some(ref pre) = patch.pre_processing_order {
        validate_steps(pre)?;
    }

    if let Some(ref post) = patch.post_processing_order {
        validate_steps(post)?;
    }

    Ok(())
}
