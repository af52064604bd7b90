//! Client-side form checks. A form with any field error is never sent.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{AdoptionApplication, LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    Confirmation,
    Address,
}

/// Inline messages keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn check(&mut self, field: Field, failed: bool, message: &str) {
        if failed && !self.0.contains_key(&field) {
            self.0.insert(field, message.to_string());
        }
    }

    fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(ok())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    /// First message in field order; what a one-line banner shows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.values().next() {
            Some(message) => f.write_str(message),
            None => Ok(()),
        }
    }
}

impl std::error::Error for FieldErrors {}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirmation: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.check(Field::Name, blank(&self.name), "El nombre es requerido");
        errors.check(Field::Email, blank(&self.email), "El email es requerido");
        errors.check(Field::Phone, blank(&self.phone), "El teléfono es requerido");
        errors.check(Field::Password, blank(&self.password), "La contraseña es requerida");
        errors.check(
            Field::Password,
            self.password.chars().count() < MIN_PASSWORD_LEN,
            "Mínimo 6 caracteres",
        );
        errors.check(
            Field::Confirmation,
            self.password != self.confirmation,
            "Las contraseñas no coinciden",
        );
        errors.into_result(|| RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Email, blank(email), "El email es requerido");
    errors.check(Field::Password, blank(password), "La contraseña es requerida");
    errors.into_result(|| LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn validate_application(application: &AdoptionApplication) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.check(Field::Address, blank(&application.address), "La dirección es requerida");
    errors.into_result(|| ())
}
