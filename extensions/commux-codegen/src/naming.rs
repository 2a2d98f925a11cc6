use commux_schema::SchemaError;
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Members every generated client defines itself; RPC methods may not reuse
/// these names.
pub const RESERVED_CLIENT_MEMBERS: &[&str] =
    &["new", "with_global_executor", "dispatch", "dispatch_command"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Type-namespace names from the std prelude. A generated alias with one of
/// these names would shadow it for every `rust_type` in the same file.
pub const PRELUDE_TYPE_NAMES: &[&str] = &[
    "AsMut", "AsRef", "Box", "Clone", "Copy", "Default", "DoubleEndedIterator", "Drop", "Eq",
    "Err", "ExactSizeIterator", "Extend", "Fn", "FnMut", "FnOnce", "From", "FromIterator",
    "Into", "IntoIterator", "Iterator", "None", "Ok", "Option", "Ord", "PartialEq", "PartialOrd",
    "Result", "Send", "Sized", "Some", "String", "Sync", "ToOwned", "ToString", "TryFrom",
    "TryInto", "Unpin", "Vec",
];

// Keywords that cannot be written as raw identifiers either.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// `SyncSpaceService` -> `SyncSpace`; `Echo` -> `Echo`.
pub fn service_base_name(service_name: &str) -> &str {
    service_name
        .strip_suffix("Service")
        .unwrap_or(service_name)
}

/// Name of the module-level singleton: the service name without its
/// `Service` suffix, first character lower-cased.
pub fn singleton_name(service_name: &str) -> Result<String, SchemaError> {
    let base = service_base_name(service_name);

    let mut chars = base.chars();
    let name = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => {
            return Err(SchemaError::DegenerateSingletonName {
                service: service_name.to_owned(),
            });
        }
    };

    escape_identifier(service_name, &name)
}

pub fn client_type_name(service_name: &str) -> Result<String, SchemaError> {
    let name = format!(
        "{}Client",
        service_base_name(service_name).to_upper_camel_case()
    );
    escape_identifier(service_name, &name)
}

/// Rust method name for a wire method name: `CreateSpace` -> `create_space`.
pub fn method_fn_name(service_name: &str, method_name: &str) -> Result<String, SchemaError> {
    escape_identifier(service_name, &method_name.to_snake_case())
}

/// Alias for a schema type: the UpperCamelCase of its local name.
pub fn type_alias_name(service_name: &str, local_name: &str) -> Result<String, SchemaError> {
    escape_identifier(service_name, &local_name.to_upper_camel_case())
}

/// Name of the runtime descriptor constant paired with an alias.
pub fn type_const_name(alias: &str) -> String {
    alias.trim_start_matches("r#").to_shouty_snake_case()
}

/// Validates `name` as a Rust identifier, turning keywords into raw
/// identifiers.
pub fn escape_identifier(service_name: &str, name: &str) -> Result<String, SchemaError> {
    let invalid = || SchemaError::InvalidIdentifier {
        service: service_name.to_owned(),
        name: name.to_owned(),
    };

    if !is_plain_identifier(name) || NOT_RAW.contains(&name) {
        return Err(invalid());
    }

    if KEYWORDS.contains(&name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(name.to_owned())
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// File the builder writes a service's client to: `SyncSpaceService` ->
/// `sync_space_service.rs`.
pub fn output_file_name(service_name: &str) -> String {
    format!("{}.rs", service_name.to_snake_case())
}
