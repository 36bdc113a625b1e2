//! Short code allocation: custom code validation and unique code generation.

use std::sync::Arc;

use crate::application::errors::RegistrationError;
use crate::domain::repositories::MappingRepository;
use crate::utils::code_generator::{
    GENERATED_CODE_LENGTH, MAX_CODE_LENGTH, MAX_GENERATION_ATTEMPTS, check_custom_code,
    generate_code_with, is_reserved,
};

/// Validates caller-supplied codes and draws fresh ones against the store.
///
/// Existence checks are optimistic: the store's uniqueness constraint is the
/// final arbiter, see [`crate::application::services::RegistrationService`].
pub struct CodeAllocator<R: MappingRepository> {
    repository: Arc<R>,
    code_length: usize,
    max_attempts: usize,
}

impl<R: MappingRepository> CodeAllocator<R> {
    /// Creates an allocator with the default policy (6 symbols, 10 attempts).
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            code_length: GENERATED_CODE_LENGTH,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides the generated code length, clamped to `1..=16`.
    pub fn with_code_length(mut self, length: usize) -> Self {
        self.code_length = length.clamp(1, MAX_CODE_LENGTH);
        self
    }

    /// Overrides the draw bound. At least one draw is always made.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Validates a custom code and returns its trimmed form.
    ///
    /// # Order
    ///
    /// 1. Reserved word
    /// 2. Empty / length / charset
    /// 3. Existence in the store
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidCode`] for reserved or malformed codes.
    /// Returns [`RegistrationError::CodeConflict`] if the code is already taken.
    /// Returns [`RegistrationError::Storage`] on database errors.
    pub async fn validate_custom(&self, candidate: &str) -> Result<String, RegistrationError> {
        let code = check_custom_code(candidate)?;

        if self.repository.exists(code).await? {
            return Err(RegistrationError::CodeConflict(code.to_string()));
        }

        Ok(code.to_string())
    }

    /// Draws random codes until one is neither reserved nor present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::GenerationExhausted`] after `max_attempts` draws.
    /// Returns [`RegistrationError::Storage`] on database errors.
    pub async fn generate_unique(&self) -> Result<String, RegistrationError> {
        for attempt in 1..=self.max_attempts {
            let candidate = generate_code_with(&mut rand::rng(), self.code_length);

            if is_reserved(&candidate) {
                continue;
            }

            if !self.repository.exists(&candidate).await? {
                return Ok(candidate);
            }

            tracing::debug!(attempt, code = %candidate, "Generated code collided, drawing again");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "Short code space exhausted while generating"
        );

        Err(RegistrationError::GenerationExhausted(self.max_attempts))
    }
}
