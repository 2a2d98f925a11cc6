use crate::TypeDescriptor;

/// One remote procedure of a service.
///
/// `name` is sent verbatim as the command string and is the only routing key
/// the executor sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub doc: Option<String>,
    pub request: TypeDescriptor,
    pub response: TypeDescriptor,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, request: TypeDescriptor, response: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            doc: None,
            request,
            response,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
