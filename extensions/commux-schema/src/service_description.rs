use crate::MethodDescriptor;

/// A service as handed to the generator: a name and its methods in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    pub name: String,
    pub doc: Option<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            methods: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a method. Order of calls is the declaration order.
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}
