use crate::Codec;

/// Schema-level description of a request or response type.
///
/// `name` is the stable identity (typically the fully qualified IDL name,
/// e.g. `echo.v1.PingRequest`). It is what deduplication keys on, so two
/// methods pointing at the same identity share one generated alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    /// Rust path of the value type as seen from the generated module.
    pub rust_type: String,
    pub codec: Option<Codec>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, rust_type: impl Into<String>, codec: Option<Codec>) -> Self {
        Self {
            name: name.into(),
            rust_type: rust_type.into(),
            codec,
        }
    }

    pub fn bitcode(name: impl Into<String>, rust_type: impl Into<String>) -> Self {
        Self::new(name, rust_type, Some(Codec::Bitcode))
    }

    /// A pass-through byte payload; the Rust type is always `Vec<u8>`.
    pub fn raw(name: impl Into<String>) -> Self {
        Self::new(name, "Vec<u8>", Some(Codec::Raw))
    }

    pub fn custom(
        name: impl Into<String>,
        rust_type: impl Into<String>,
        encode: impl Into<String>,
        decode: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            rust_type,
            Some(Codec::Custom {
                encode: encode.into(),
                decode: decode.into(),
            }),
        )
    }

    /// The last segment of the identity, e.g. `PingRequest` for
    /// `echo.v1.PingRequest` or `crate::PingRequest`.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit(|c: char| c == '.' || c == ':')
            .next()
            .unwrap_or(&self.name)
    }
}
