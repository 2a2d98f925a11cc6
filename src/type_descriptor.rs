use crate::BoxError;
use std::fmt;

pub type EncodeFn<T> = fn(&T) -> Result<Vec<u8>, BoxError>;
pub type DecodeFn<T> = fn(&[u8]) -> Result<T, BoxError>;

/// Run-time description of a message type: a stable identity plus the
/// encode/decode pair used to move it across the command channel.
///
/// Descriptors are plain data (a name and two function pointers) and can be
/// built in `const` context, which is how generated clients declare one per
/// distinct request/response type.
///
/// ```rust,no_run
/// use commux::TypeDescriptor;
///
/// const BLOB: TypeDescriptor<Vec<u8>> = TypeDescriptor::raw("example.Blob");
/// ```
pub struct TypeDescriptor<T> {
    name: &'static str,
    encode: EncodeFn<T>,
    decode: DecodeFn<T>,
}

impl<T> TypeDescriptor<T> {
    pub const fn new(name: &'static str, encode: EncodeFn<T>, decode: DecodeFn<T>) -> Self {
        Self {
            name,
            encode,
            decode,
        }
    }

    /// The stable identity of the described type.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        (self.encode)(value)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<T, BoxError> {
        (self.decode)(bytes)
    }
}

impl<T> TypeDescriptor<T>
where
    T: bitcode::Encode + for<'de> bitcode::Decode<'de>,
{
    /// Descriptor backed by `bitcode` for types deriving its `Encode`/`Decode`.
    pub const fn bitcode(name: &'static str) -> Self {
        Self::new(name, encode_bitcode::<T>, decode_bitcode::<T>)
    }
}

impl TypeDescriptor<Vec<u8>> {
    /// Descriptor whose wire form is the value itself.
    pub const fn raw(name: &'static str) -> Self {
        Self::new(name, encode_raw, decode_raw)
    }
}

// Function pointers are `Copy` regardless of `T`, so these are implemented by
// hand instead of derived (a derive would demand `T: Clone`).
impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeDescriptor<T> {}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn encode_bitcode<T: bitcode::Encode>(value: &T) -> Result<Vec<u8>, BoxError> {
    Ok(bitcode::encode(value))
}

fn decode_bitcode<T>(bytes: &[u8]) -> Result<T, BoxError>
where
    T: for<'de> bitcode::Decode<'de>,
{
    bitcode::decode::<T>(bytes).map_err(|e| Box::new(e) as BoxError)
}

#[allow(clippy::ptr_arg)]
fn encode_raw(value: &Vec<u8>) -> Result<Vec<u8>, BoxError> {
    Ok(value.clone())
}

fn decode_raw(bytes: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(bytes.to_vec())
}
