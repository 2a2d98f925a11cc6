//! JSON schema documents.
//!
//! IDL tooling normalizes its output into this layout so generation can run
//! from a build script or the command line. Types are declared once in a
//! table and referenced by identity from each method:
//!
//! ```json
//! {
//!   "types": {
//!     "echo.v1.PingRequest": { "rust_type": "crate::PingRequest", "codec": { "kind": "bitcode" } }
//!   },
//!   "services": [
//!     { "name": "Echo", "methods": [
//!       { "name": "Ping", "request": "echo.v1.PingRequest", "response": "echo.v1.PingRequest" }
//!     ] }
//!   ]
//! }
//! ```

use crate::{Codec, MethodDescriptor, SchemaError, ServiceDescription, TypeDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default)]
    pub types: BTreeMap<String, TypeEntry>,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub rust_type: String,
    #[serde(default)]
    pub codec: Option<Codec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    pub request: String,
    pub response: String,
}

impl SchemaDocument {
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Resolves type references and returns the services in document order.
    pub fn services(&self) -> Result<Vec<ServiceDescription>, SchemaError> {
        self.services
            .iter()
            .map(|service| self.resolve_service(service))
            .collect()
    }

    fn resolve_service(&self, entry: &ServiceEntry) -> Result<ServiceDescription, SchemaError> {
        let mut service = ServiceDescription::new(&entry.name);
        service.doc = entry.doc.clone();

        for method in &entry.methods {
            let request = self.resolve_type(entry, method, &method.request)?;
            let response = self.resolve_type(entry, method, &method.response)?;

            service = service.method(MethodDescriptor {
                name: method.name.clone(),
                doc: method.doc.clone(),
                request,
                response,
            });
        }

        Ok(service)
    }

    fn resolve_type(
        &self,
        service: &ServiceEntry,
        method: &MethodEntry,
        type_name: &str,
    ) -> Result<TypeDescriptor, SchemaError> {
        let entry = self
            .types
            .get(type_name)
            .ok_or_else(|| SchemaError::UnknownType {
                service: service.name.clone(),
                method: method.name.clone(),
                type_name: type_name.to_owned(),
            })?;

        Ok(TypeDescriptor::new(
            type_name,
            &entry.rust_type,
            entry.codec.clone(),
        ))
    }
}
