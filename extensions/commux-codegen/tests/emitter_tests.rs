use commux_codegen::{
    Codec, EmitOptions, MethodDescriptor, SchemaError, ServiceDescription, TypeDescriptor,
    generate_client,
};

fn echo_service() -> ServiceDescription {
    ServiceDescription::new("Echo")
        .with_doc("Echoes payloads back to the caller.")
        .method(
            MethodDescriptor::new(
                "Ping",
                TypeDescriptor::bitcode("echo.v1.PingRequest", "crate::messages::PingRequest"),
                TypeDescriptor::bitcode("echo.v1.PingResponse", "crate::messages::PingResponse"),
            )
            .with_doc("Round-trips a value."),
        )
}

fn empty() -> TypeDescriptor {
    TypeDescriptor::bitcode("syncspace.v1.Empty", "crate::Empty")
}

fn sync_space_service() -> ServiceDescription {
    ServiceDescription::new("SyncSpaceService")
        .method(MethodDescriptor::new(
            "CreateSpace",
            TypeDescriptor::bitcode("syncspace.v1.CreateSpaceRequest", "crate::CreateSpaceRequest"),
            TypeDescriptor::bitcode("syncspace.v1.SpaceInfo", "crate::SpaceInfo"),
        ))
        .method(MethodDescriptor::new(
            "ListSpaces",
            empty(),
            TypeDescriptor::bitcode("syncspace.v1.ListSpacesResponse", "crate::ListSpacesResponse"),
        ))
        .method(MethodDescriptor::new("Shutdown", empty(), empty()))
        .method(MethodDescriptor::new(
            "GetSpace",
            TypeDescriptor::bitcode("syncspace.v1.SpaceRef", "crate::SpaceRef"),
            TypeDescriptor::bitcode("syncspace.v1.SpaceInfo", "crate::SpaceInfo"),
        ))
}

fn generate(service: &ServiceDescription) -> Result<String, SchemaError> {
    generate_client(service, &EmitOptions::default())
}

const ECHO_CLIENT: &str = r#"// @generated by commux-codegen for `EchoClient`. Do not edit by hand.

pub type PingRequest = crate::messages::PingRequest;
const PING_REQUEST: ::commux::TypeDescriptor<PingRequest> = ::commux::TypeDescriptor::bitcode("echo.v1.PingRequest");

pub type PingResponse = crate::messages::PingResponse;
const PING_RESPONSE: ::commux::TypeDescriptor<PingResponse> = ::commux::TypeDescriptor::bitcode("echo.v1.PingResponse");

/// Echoes payloads back to the caller.
#[derive(Clone, Debug)]
pub struct EchoClient {
    client: ::commux::CommandClient,
}

impl EchoClient {
    /// Creates a client that sends every command to `executor`.
    pub fn new(executor: ::std::sync::Arc<dyn ::commux::CommandExecutor>) -> Self {
        Self {
            client: ::commux::CommandClient::new(executor),
        }
    }

    /// Creates a client bound to the process-wide executor.
    pub fn with_global_executor() -> Self {
        Self::new(::std::sync::Arc::new(::commux::GlobalExecutor))
    }

    /// Sends `payload` under `command` as-is, bypassing the typed methods.
    pub async fn dispatch_command(
        &self,
        command: &str,
        payload: ::std::vec::Vec<u8>,
    ) -> ::std::result::Result<::std::vec::Vec<u8>, ::commux::DispatchError> {
        self.client.dispatch_command(command, payload).await
    }

    #[allow(dead_code)]
    async fn dispatch<Req, Res>(
        &self,
        command: &str,
        request_type: &::commux::TypeDescriptor<Req>,
        response_type: &::commux::TypeDescriptor<Res>,
        request: Req,
    ) -> ::std::result::Result<Res, ::commux::DispatchError> {
        self.client
            .dispatch(command, request_type, response_type, request)
            .await
    }

    /// Round-trips a value.
    pub async fn ping(
        &self,
        request: PingRequest,
    ) -> ::std::result::Result<PingResponse, ::commux::DispatchError> {
        self.dispatch("Ping", &PING_REQUEST, &PING_RESPONSE, request).await
    }
}

/// Shared `EchoClient` bound to the process-wide executor.
#[allow(non_upper_case_globals)]
pub static echo: ::commux::Lazy<EchoClient> = ::commux::Lazy::new(EchoClient::with_global_executor);
"#;

#[test]
fn test_echo_client_output() {
    assert_eq!(generate(&echo_service()).unwrap(), ECHO_CLIENT);
}

#[test]
fn test_generation_is_deterministic() {
    let service = sync_space_service();
    let first = generate(&service).unwrap();
    let second = generate(&service.clone()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_shared_types_are_aliased_once() {
    let out = generate(&sync_space_service()).unwrap();

    assert_eq!(out.matches("pub type Empty = crate::Empty;").count(), 1);
    assert_eq!(out.matches("const EMPTY:").count(), 1);
    assert_eq!(out.matches("pub type SpaceInfo =").count(), 1);
    assert_eq!(out.matches("const SPACE_INFO:").count(), 1);

    // Each use still refers to the shared descriptor.
    assert!(out.contains("self.dispatch(\"Shutdown\", &EMPTY, &EMPTY, request).await"));
    assert!(out.contains(
        "self.dispatch(\"GetSpace\", &SPACE_REF, &SPACE_INFO, request).await"
    ));
}

#[test]
fn test_methods_follow_declaration_order() {
    let out = generate(&sync_space_service()).unwrap();
    let positions: Vec<usize> = [
        "pub async fn create_space(",
        "pub async fn list_spaces(",
        "pub async fn shutdown(",
        "pub async fn get_space(",
    ]
    .iter()
    .map(|needle| out.find(needle).expect("method missing from output"))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_singleton_strips_service_suffix() {
    let out = generate(&sync_space_service()).unwrap();

    assert!(out.contains("pub struct SyncSpaceClient {"));
    assert!(out.contains(
        "pub static syncSpace: ::commux::Lazy<SyncSpaceClient> = ::commux::Lazy::new(SyncSpaceClient::with_global_executor);"
    ));
    assert_eq!(out.matches("pub static ").count(), 1);
}

#[test]
fn test_service_without_methods() {
    let out = generate(&ServiceDescription::new("IdleService")).unwrap();

    assert!(out.contains("pub struct IdleClient {"));
    assert!(out.contains("async fn dispatch<Req, Res>("));
    assert!(out.contains("pub async fn dispatch_command("));
    assert!(out.contains("pub static idle: ::commux::Lazy<IdleClient>"));
    assert!(!out.contains("pub type "));
    assert!(!out.contains("const "));
}

#[test]
fn test_duplicate_method_names_fail() {
    let service = echo_service().method(MethodDescriptor::new(
        "Ping",
        TypeDescriptor::raw("echo.v1.Blob"),
        TypeDescriptor::raw("echo.v1.Blob"),
    ));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::DuplicateMethod { method, .. }) if method == "Ping"
    ));
}

#[test]
fn test_degenerate_singleton_name_fails() {
    let service = ServiceDescription::new("Service");

    assert!(matches!(
        generate(&service),
        Err(SchemaError::DegenerateSingletonName { .. })
    ));
}

#[test]
fn test_method_names_mapping_to_one_identifier_fail() {
    let service = ServiceDescription::new("Echo")
        .method(MethodDescriptor::new("GetItem", empty(), empty()))
        .method(MethodDescriptor::new("get_item", empty(), empty()));

    match generate(&service) {
        Err(SchemaError::NameCollision {
            identifier,
            first,
            second,
            ..
        }) => {
            assert_eq!(identifier, "get_item");
            assert_eq!(first, "GetItem");
            assert_eq!(second, "get_item");
        }
        other => panic!("expected NameCollision, got {other:?}"),
    }
}

#[test]
fn test_method_names_may_not_shadow_client_members() {
    let service =
        ServiceDescription::new("Echo").method(MethodDescriptor::new("Dispatch", empty(), empty()));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::NameCollision { identifier, .. }) if identifier == "dispatch"
    ));
}

#[test]
fn test_type_aliases_mapping_to_one_name_fail() {
    let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
        "Move",
        TypeDescriptor::bitcode("a.v1.Item", "crate::a::Item"),
        TypeDescriptor::bitcode("b.v1.Item", "crate::b::Item"),
    ));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::NameCollision { identifier, .. }) if identifier == "Item"
    ));
}

#[test]
fn test_type_alias_may_not_shadow_client_type() {
    let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
        "Ping",
        TypeDescriptor::bitcode("echo.v1.EchoClient", "crate::EchoClient"),
        empty(),
    ));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::NameCollision { identifier, .. }) if identifier == "EchoClient"
    ));
}

#[test]
fn test_single_letter_type_names() {
    // `Q` and `V2` read the same as alias and as const; they live in separate
    // namespaces.
    let service = ServiceDescription::new("Geo").method(MethodDescriptor::new(
        "Locate",
        TypeDescriptor::bitcode("geo.v1.Q", "crate::geo::Q"),
        TypeDescriptor::bitcode("geo.v2.V2", "crate::geo::V2"),
    ));
    let out = generate(&service).unwrap();

    assert!(out.contains("pub type Q = crate::geo::Q;"));
    assert!(out.contains("const Q: ::commux::TypeDescriptor<Q> ="));
    assert!(out.contains("pub type V2 = crate::geo::V2;"));
    assert!(out.contains("const V2: ::commux::TypeDescriptor<V2> ="));
    assert!(out.contains("self.dispatch(\"Locate\", &Q, &V2, request).await"));
}

#[test]
fn test_type_alias_may_not_shadow_prelude_names() {
    for (identity, rust_type) in [("blobs.v1.Vec", "crate::Vec"), ("opt.v1.Option", "crate::Opt")] {
        let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
            "Ping",
            TypeDescriptor::bitcode(identity, rust_type),
            empty(),
        ));

        match generate(&service) {
            Err(SchemaError::NameCollision {
                identifier,
                first,
                second,
                ..
            }) => {
                assert_eq!(identifier, identity.rsplit('.').next().unwrap());
                assert_eq!(first, "std::prelude");
                assert_eq!(second, identity);
            }
            other => panic!("expected NameCollision, got {other:?}"),
        }
    }
}

#[test]
fn test_raw_types_are_emitted_as_byte_vectors() {
    let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
        "Ping",
        TypeDescriptor::new("echo.v1.Blob", "Vec < u8 >", Some(Codec::Raw)),
        empty(),
    ));
    let out = generate(&service).unwrap();

    assert!(out.contains("pub type Blob = ::std::vec::Vec<u8>;"));
}

#[test]
fn test_raw_type_with_other_rust_type_fails() {
    let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
        "Ping",
        TypeDescriptor::new("echo.v1.Blob", "String", Some(Codec::Raw)),
        empty(),
    ));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::RawTypeMismatch { type_name, .. }) if type_name == "echo.v1.Blob"
    ));
}

#[test]
fn test_keyword_method_becomes_raw_identifier() {
    let service =
        ServiceDescription::new("Echo").method(MethodDescriptor::new("Loop", empty(), empty()));
    let out = generate(&service).unwrap();

    assert!(out.contains("pub async fn r#loop("));
    assert!(out.contains("self.dispatch(\"Loop\", &EMPTY, &EMPTY, request).await"));
}

#[test]
fn test_missing_codec_fails() {
    let service = ServiceDescription::new("Echo").method(MethodDescriptor::new(
        "Ping",
        TypeDescriptor::new("echo.v1.Plain", "crate::Plain", None),
        empty(),
    ));

    assert!(matches!(
        generate(&service),
        Err(SchemaError::MissingCodec { .. })
    ));
}

#[test]
fn test_codec_variants_and_runtime_path() {
    let service = ServiceDescription::new("Blobs")
        .method(MethodDescriptor::new(
            "Store",
            TypeDescriptor::raw("blobs.v1.Blob"),
            TypeDescriptor::custom(
                "blobs.v1.Receipt",
                "crate::Receipt",
                "crate::receipt::encode",
                "crate::receipt::decode",
            ),
        ));
    let options = EmitOptions {
        runtime_path: "my_app::rpc::".to_owned(),
    };
    let out = generate_client(&service, &options).unwrap();

    assert!(out.contains("pub type Blob = ::std::vec::Vec<u8>;"));
    assert!(out.contains(
        "const BLOB: my_app::rpc::TypeDescriptor<Blob> = my_app::rpc::TypeDescriptor::raw(\"blobs.v1.Blob\");"
    ));
    assert!(out.contains(
        "const RECEIPT: my_app::rpc::TypeDescriptor<Receipt> = my_app::rpc::TypeDescriptor::new(\"blobs.v1.Receipt\", crate::receipt::encode, crate::receipt::decode);"
    ));
    assert!(!out.contains("::commux"));
}

#[test]
fn test_docs_are_emitted_line_by_line() {
    let service = ServiceDescription::new("Echo").method(
        MethodDescriptor::new("Ping", empty(), empty())
            .with_doc("First line.\n\nSecond paragraph.  "),
    );
    let out = generate(&service).unwrap();

    assert!(out.contains("    /// First line.\n    ///\n    /// Second paragraph.\n    pub async fn ping("));
    assert!(out.contains("/// Typed client for the `EchoClient` command channel.\n"));
}
