//! Quote record data structures
//!
//! Persisted field names follow the storage layout used by the host page:
//! `id`, `nombre`, `email`, `servicio`, `descripcion`.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Prototyping,
    ReverseEngineering,
    #[serde(rename = "CAD")]
    Cad,
    Composites,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Prototyping,
        ServiceType::ReverseEngineering,
        ServiceType::Cad,
        ServiceType::Composites,
    ];

    /// Value used in storage and in `<option value>` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Prototyping => "Prototyping",
            ServiceType::ReverseEngineering => "ReverseEngineering",
            ServiceType::Cad => "CAD",
            ServiceType::Composites => "Composites",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Prototyping => "Prototyping",
            ServiceType::ReverseEngineering => "Reverse Engineering",
            ServiceType::Cad => "CAD",
            ServiceType::Composites => "Composites",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prototyping" => Ok(ServiceType::Prototyping),
            "reverseengineering" => Ok(ServiceType::ReverseEngineering),
            "cad" => Ok(ServiceType::Cad),
            "composites" => Ok(ServiceType::Composites),
            _ => Err(QuoteError::UnknownService(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Creation timestamp in milliseconds, unique within the store
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "servicio")]
    pub service: ServiceType,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl QuoteRecord {
    pub fn new(id: i64, fields: QuoteFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            service: fields.service,
            description: fields.description,
        }
    }

    /// Overwrite the mutable fields present in `update`. The id never changes.
    pub fn apply(&mut self, update: QuoteUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(service) = update.service {
            self.service = service;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    pub fn fields(&self) -> QuoteFields {
        QuoteFields {
            name: self.name.clone(),
            email: self.email.clone(),
            service: self.service,
            description: self.description.clone(),
        }
    }
}

/// The user-editable part of a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFields {
    pub name: String,
    pub email: String,
    pub service: ServiceType,
    pub description: String,
}

impl QuoteFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        service: ServiceType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            service,
            description: description.into(),
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub service: Option<ServiceType>,
    pub description: Option<String>,
}

impl QuoteUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl From<QuoteFields> for QuoteUpdate {
    fn from(fields: QuoteFields) -> Self {
        Self {
            name: Some(fields.name),
            email: Some(fields.email),
            service: Some(fields.service),
            description: Some(fields.description),
        }
    }
}
