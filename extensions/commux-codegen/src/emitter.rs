use crate::naming::{
    PRELUDE_TYPE_NAMES, RESERVED_CLIENT_MEMBERS, client_type_name, method_fn_name,
    singleton_name, type_alias_name, type_const_name,
};
use commux_schema::{Codec, MethodDescriptor, SchemaError, ServiceDescription, TypeDescriptor};
use commux_schema::{distinct_types, walk};
use std::collections::HashMap;
use tracing::debug;

const PRELUDE: &str = "std::prelude";
// Raw types are always emitted fully qualified.
const RAW_RUST_TYPE: &str = "::std::vec::Vec<u8>";

/// Knobs for the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path under which generated code reaches the runtime crate.
    pub runtime_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_path: "::commux".to_owned(),
        }
    }
}

/// Generates the Rust source of a typed client for `service`.
///
/// The output contains, in order:
/// 1. one `pub type` alias and one runtime `TypeDescriptor` constant per
///    distinct request/response type (by identity, first-seen order);
/// 2. the client struct with its constructors, the raw `dispatch_command`
///    escape hatch and the private generic `dispatch` primitive;
/// 3. one async method per RPC, each a single call into `dispatch`;
/// 4. the service singleton.
///
/// The same description always yields byte-identical output. The result is
/// meant to be `include!`d into a module of its own, since the aliases are
/// declared at the top level of the file.
pub fn generate_client(
    service: &ServiceDescription,
    options: &EmitOptions,
) -> Result<String, SchemaError> {
    let methods = walk(service)?;
    let emitter = ClientEmitter::new(service, options)?;

    let types = emitter.resolve_types(&methods)?;
    let fns = emitter.resolve_methods(&methods)?;

    debug!(
        service = %service.name,
        methods = methods.len(),
        types = types.len(),
        "emitting client"
    );

    let mut out = String::new();
    emitter.emit_header(&mut out);
    emitter.emit_types(&mut out, &types);
    emitter.emit_client(&mut out, &types, &fns);
    emitter.emit_singleton(&mut out);
    Ok(out)
}

/// An alias (and its descriptor constant) resolved for one schema type.
struct EmittedType<'a> {
    descriptor: &'a TypeDescriptor,
    alias: String,
    const_name: String,
}

struct EmittedMethod<'a> {
    descriptor: &'a MethodDescriptor,
    fn_name: String,
}

struct ClientEmitter<'a> {
    service: &'a ServiceDescription,
    runtime: &'a str,
    client_name: String,
    singleton: String,
}

impl<'a> ClientEmitter<'a> {
    fn new(service: &'a ServiceDescription, options: &'a EmitOptions) -> Result<Self, SchemaError> {
        let singleton = singleton_name(&service.name)?;
        let client_name = client_type_name(&service.name)?;

        Ok(Self {
            service,
            runtime: options.runtime_path.trim_end_matches("::"),
            client_name,
            singleton,
        })
    }

    fn collision(&self, identifier: &str, first: &str, second: &str) -> SchemaError {
        SchemaError::NameCollision {
            service: self.service.name.clone(),
            identifier: identifier.to_owned(),
            first: first.to_owned(),
            second: second.to_owned(),
        }
    }

    fn resolve_types(
        &self,
        methods: &[&'a MethodDescriptor],
    ) -> Result<Vec<EmittedType<'a>>, SchemaError> {
        // Aliases live in the type namespace and descriptor consts in the
        // value namespace; each maps identifier -> schema name that claimed it.
        let mut claimed_types: HashMap<String, &str> = PRELUDE_TYPE_NAMES
            .iter()
            .map(|name| ((*name).to_owned(), PRELUDE))
            .collect();
        claimed_types.insert(self.client_name.clone(), &self.service.name);

        let mut claimed_values: HashMap<String, &str> = HashMap::new();
        claimed_values.insert(self.singleton.clone(), &self.service.name);

        let mut types = Vec::new();
        for descriptor in distinct_types(methods) {
            let alias = type_alias_name(&self.service.name, descriptor.local_name())?;
            let const_name = type_const_name(&alias);

            for (claimed, identifier) in [
                (&mut claimed_types, &alias),
                (&mut claimed_values, &const_name),
            ] {
                if let Some(first) = claimed.insert(identifier.clone(), &descriptor.name) {
                    return Err(self.collision(identifier, first, &descriptor.name));
                }
            }

            types.push(EmittedType {
                descriptor,
                alias,
                const_name,
            });
        }

        Ok(types)
    }

    fn resolve_methods(
        &self,
        methods: &[&'a MethodDescriptor],
    ) -> Result<Vec<EmittedMethod<'a>>, SchemaError> {
        let mut claimed: HashMap<String, &str> = RESERVED_CLIENT_MEMBERS
            .iter()
            .map(|member| ((*member).to_owned(), *member))
            .collect();

        let mut fns = Vec::with_capacity(methods.len());
        for &descriptor in methods {
            let fn_name = method_fn_name(&self.service.name, &descriptor.name)?;

            if let Some(first) = claimed.insert(fn_name.clone(), &descriptor.name) {
                return Err(self.collision(&fn_name, first, &descriptor.name));
            }

            fns.push(EmittedMethod {
                descriptor,
                fn_name,
            });
        }

        Ok(fns)
    }

    fn emit_header(&self, out: &mut String) {
        out.push_str(&format!(
            "// @generated by commux-codegen for `{}`. Do not edit by hand.\n\n",
            self.client_name
        ));
    }

    fn emit_types(&self, out: &mut String, types: &[EmittedType<'_>]) {
        let rt = self.runtime;

        for ty in types {
            let name = format!("{:?}", ty.descriptor.name);
            let descriptor = match &ty.descriptor.codec {
                Some(Codec::Bitcode) => format!("{rt}::TypeDescriptor::bitcode({name})"),
                Some(Codec::Raw) => format!("{rt}::TypeDescriptor::raw({name})"),
                Some(Codec::Custom { encode, decode }) => {
                    format!("{rt}::TypeDescriptor::new({name}, {encode}, {decode})")
                }
                // `walk` has already rejected types without a codec.
                None => continue,
            };

            let rust_type = match &ty.descriptor.codec {
                Some(Codec::Raw) => RAW_RUST_TYPE,
                _ => ty.descriptor.rust_type.as_str(),
            };
            out.push_str(&format!("pub type {} = {rust_type};\n", ty.alias));
            out.push_str(&format!(
                "const {}: {rt}::TypeDescriptor<{}> = {descriptor};\n\n",
                ty.const_name, ty.alias
            ));
        }
    }

    fn emit_client(&self, out: &mut String, types: &[EmittedType<'_>], fns: &[EmittedMethod<'_>]) {
        let rt = self.runtime;
        let client = &self.client_name;

        match &self.service.doc {
            Some(doc) => push_doc(out, doc, ""),
            None => out.push_str(&format!(
                "/// Typed client for the `{client}` command channel.\n"
            )),
        }
        out.push_str("#[derive(Clone, Debug)]\n");
        out.push_str(&format!("pub struct {client} {{\n"));
        out.push_str(&format!("    client: {rt}::CommandClient,\n"));
        out.push_str("}\n\n");

        out.push_str(&format!("impl {client} {{\n"));

        out.push_str("    /// Creates a client that sends every command to `executor`.\n");
        out.push_str(&format!(
            "    pub fn new(executor: ::std::sync::Arc<dyn {rt}::CommandExecutor>) -> Self {{\n"
        ));
        out.push_str("        Self {\n");
        out.push_str(&format!(
            "            client: {rt}::CommandClient::new(executor),\n"
        ));
        out.push_str("        }\n");
        out.push_str("    }\n\n");

        out.push_str("    /// Creates a client bound to the process-wide executor.\n");
        out.push_str("    pub fn with_global_executor() -> Self {\n");
        out.push_str(&format!(
            "        Self::new(::std::sync::Arc::new({rt}::GlobalExecutor))\n"
        ));
        out.push_str("    }\n\n");

        out.push_str("    /// Sends `payload` under `command` as-is, bypassing the typed methods.\n");
        out.push_str("    pub async fn dispatch_command(\n");
        out.push_str("        &self,\n");
        out.push_str("        command: &str,\n");
        out.push_str("        payload: ::std::vec::Vec<u8>,\n");
        out.push_str(&format!(
            "    ) -> ::std::result::Result<::std::vec::Vec<u8>, {rt}::DispatchError> {{\n"
        ));
        out.push_str("        self.client.dispatch_command(command, payload).await\n");
        out.push_str("    }\n\n");

        out.push_str("    #[allow(dead_code)]\n");
        out.push_str("    async fn dispatch<Req, Res>(\n");
        out.push_str("        &self,\n");
        out.push_str("        command: &str,\n");
        out.push_str(&format!(
            "        request_type: &{rt}::TypeDescriptor<Req>,\n"
        ));
        out.push_str(&format!(
            "        response_type: &{rt}::TypeDescriptor<Res>,\n"
        ));
        out.push_str("        request: Req,\n");
        out.push_str(&format!(
            "    ) -> ::std::result::Result<Res, {rt}::DispatchError> {{\n"
        ));
        out.push_str("        self.client\n");
        out.push_str("            .dispatch(command, request_type, response_type, request)\n");
        out.push_str("            .await\n");
        out.push_str("    }\n");

        let by_identity: HashMap<&str, &EmittedType<'_>> = types
            .iter()
            .map(|ty| (ty.descriptor.name.as_str(), ty))
            .collect();

        for method in fns {
            // Every method type went through `resolve_types`.
            let (Some(request), Some(response)) = (
                by_identity.get(method.descriptor.request.name.as_str()),
                by_identity.get(method.descriptor.response.name.as_str()),
            ) else {
                continue;
            };

            out.push('\n');
            if let Some(doc) = &method.descriptor.doc {
                push_doc(out, doc, "    ");
            }
            out.push_str(&format!("    pub async fn {}(\n", method.fn_name));
            out.push_str("        &self,\n");
            out.push_str(&format!("        request: {},\n", request.alias));
            out.push_str(&format!(
                "    ) -> ::std::result::Result<{}, {rt}::DispatchError> {{\n",
                response.alias
            ));
            out.push_str(&format!(
                "        self.dispatch({:?}, &{}, &{}, request).await\n",
                method.descriptor.name, request.const_name, response.const_name
            ));
            out.push_str("    }\n");
        }

        out.push_str("}\n\n");
    }

    fn emit_singleton(&self, out: &mut String) {
        let rt = self.runtime;
        let client = &self.client_name;

        out.push_str(&format!(
            "/// Shared `{client}` bound to the process-wide executor.\n"
        ));
        out.push_str("#[allow(non_upper_case_globals)]\n");
        out.push_str(&format!(
            "pub static {}: {rt}::Lazy<{client}> = {rt}::Lazy::new({client}::with_global_executor);\n",
            self.singleton
        ));
    }
}

fn push_doc(out: &mut String, doc: &str, indent: &str) {
    for line in doc.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}
