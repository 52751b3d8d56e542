//! Column-width checks run on payloads before any storage access.

use crate::models::{ClientPatch, NewClient, limits};

use super::error::{ApiError, ApiResult, FieldError};

pub trait Validate {
    fn validate(&self) -> ApiResult<()>;
}

fn check_len(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>, max: usize) {
    if let Some(value) = value {
        if value.chars().count() > max {
            errors.push(FieldError::body(
                field,
                format!("String should have at most {max} characters"),
                "string_too_long",
            ));
        }
    }
}

fn finish(errors: Vec<FieldError>) -> ApiResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

impl Validate for NewClient {
    fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();
        check_len(&mut errors, "nom", Some(self.nom.as_str()), limits::NOM);
        check_len(&mut errors, "prenom", Some(self.prenom.as_str()), limits::PRENOM);
        check_len(&mut errors, "genre", self.genre.as_deref(), limits::GENRE);
        check_len(&mut errors, "adresse", Some(self.adresse.as_str()), limits::ADRESSE);
        check_len(
            &mut errors,
            "complement_adresse",
            self.complement_adresse.as_deref(),
            limits::COMPLEMENT_ADRESSE,
        );
        check_len(&mut errors, "tel", self.tel.as_deref(), limits::TEL);
        check_len(&mut errors, "email", self.email.as_deref(), limits::EMAIL);
        finish(errors)
    }
}

impl Validate for ClientPatch {
    fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();
        check_len(&mut errors, "nom", self.nom.as_deref(), limits::NOM);
        check_len(&mut errors, "prenom", self.prenom.as_deref(), limits::PRENOM);
        check_len(&mut errors, "adresse", self.adresse.as_deref(), limits::ADRESSE);
        check_len(
            &mut errors,
            "complement_adresse",
            self.complement_adresse.as_value().map(String::as_str),
            limits::COMPLEMENT_ADRESSE,
        );
        check_len(
            &mut errors,
            "genre",
            self.genre.as_value().map(String::as_str),
            limits::GENRE,
        );
        check_len(&mut errors, "tel", self.tel.as_value().map(String::as_str), limits::TEL);
        check_len(
            &mut errors,
            "email",
            self.email.as_value().map(String::as_str),
            limits::EMAIL,
        );
        finish(errors)
    }
}
