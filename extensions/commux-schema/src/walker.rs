use crate::{Codec, MethodDescriptor, SchemaError, ServiceDescription, TypeDescriptor};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Enumerates the methods of `service` in declaration order, checking the
/// invariants code generation relies on.
///
/// Fails when:
/// - two methods share a name (the name is the wire command, so it must be
///   unique);
/// - a method name is empty;
/// - a referenced request or response type has no codec;
/// - a raw-codec type declares a Rust type other than `Vec<u8>`;
/// - one type identity appears with two different definitions.
pub fn walk(service: &ServiceDescription) -> Result<Vec<&MethodDescriptor>, SchemaError> {
    let mut seen_methods = HashSet::new();
    let mut seen_types: HashMap<&str, &TypeDescriptor> = HashMap::new();
    let mut methods = Vec::with_capacity(service.methods.len());

    for method in &service.methods {
        if method.name.is_empty() {
            return Err(SchemaError::InvalidIdentifier {
                service: service.name.clone(),
                name: method.name.clone(),
            });
        }

        if !seen_methods.insert(method.name.as_str()) {
            return Err(SchemaError::DuplicateMethod {
                service: service.name.clone(),
                method: method.name.clone(),
            });
        }

        for ty in [&method.request, &method.response] {
            if ty.codec.is_none() {
                return Err(SchemaError::MissingCodec {
                    service: service.name.clone(),
                    method: method.name.clone(),
                    type_name: ty.name.clone(),
                });
            }

            if ty.codec == Some(Codec::Raw) && !is_byte_vec(&ty.rust_type) {
                return Err(SchemaError::RawTypeMismatch {
                    service: service.name.clone(),
                    type_name: ty.name.clone(),
                    rust_type: ty.rust_type.clone(),
                });
            }

            match seen_types.get(ty.name.as_str()) {
                Some(existing) if *existing != ty => {
                    return Err(SchemaError::ConflictingType {
                        service: service.name.clone(),
                        type_name: ty.name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen_types.insert(ty.name.as_str(), ty);
                }
            }
        }

        trace!(
            service = %service.name,
            method = %method.name,
            request = %method.request.name,
            response = %method.response.name,
            "walked method"
        );
        methods.push(method);
    }

    Ok(methods)
}

/// Every distinct request/response type of `methods`, keyed by identity, in
/// first-seen order (a method's request before its response).
pub fn distinct_types<'a>(methods: &[&'a MethodDescriptor]) -> Vec<&'a TypeDescriptor> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();

    for method in methods {
        for ty in [&method.request, &method.response] {
            if seen.insert(ty.name.as_str()) {
                types.push(ty);
            }
        }
    }

    types
}

fn is_byte_vec(rust_type: &str) -> bool {
    let compact: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();
    matches!(
        compact.as_str(),
        "Vec<u8>" | "std::vec::Vec<u8>" | "::std::vec::Vec<u8>" | "alloc::vec::Vec<u8>"
    )
}
