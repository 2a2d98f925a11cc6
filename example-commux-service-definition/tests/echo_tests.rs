use commux::{BoxError, CommandClient, CommandExecutor, TypeDescriptor, executor_fn};
use example_commux_service_definition::echo::{EchoClient, PingRequest, PingResponse};
use example_commux_service_definition::messages::Document;
use std::sync::{Arc, Mutex};

fn echo_executor() -> Arc<dyn CommandExecutor> {
    Arc::new(executor_fn(|_command, payload| async move {
        Ok::<_, BoxError>(payload)
    }))
}

#[tokio::test]
async fn test_ping_round_trip() {
    let client = EchoClient::new(echo_executor());

    let response = client
        .ping(PingRequest {
            value: "hi".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        PingResponse {
            value: "hi".to_owned()
        }
    );
}

#[tokio::test]
async fn test_methods_send_their_wire_name() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let executor = {
        let seen = seen.clone();
        executor_fn(move |command, payload| {
            seen.lock().unwrap().push(command);
            async move { Ok::<_, BoxError>(payload) }
        })
    };
    let client = EchoClient::new(Arc::new(executor));

    client
        .ping(PingRequest {
            value: "x".to_owned(),
        })
        .await
        .unwrap();
    client.echo_bytes(vec![1, 2, 3]).await.unwrap();
    client.dispatch_command("Custom", vec![]).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["Ping", "EchoBytes", "Custom"]);
}

#[tokio::test]
async fn test_raw_method_passes_bytes_through() {
    let client = EchoClient::new(echo_executor());
    let payload: Vec<u8> = (0..=255).collect();

    assert_eq!(client.echo_bytes(payload.clone()).await.unwrap(), payload);
}

#[tokio::test]
async fn test_dispatch_command_reaches_the_executor_untouched() {
    let client = EchoClient::new(Arc::new(executor_fn(|command, payload| async move {
        let mut response = command.into_bytes();
        response.extend(payload);
        Ok::<_, BoxError>(response)
    })));

    let response = client.dispatch_command("Raw", b"!".to_vec()).await.unwrap();

    assert_eq!(response, b"Raw!");
}

#[tokio::test]
async fn test_generic_round_trip_preserves_value() {
    const DOCUMENT: TypeDescriptor<Document> = TypeDescriptor::bitcode("syncspace.v1.Document");
    let client = CommandClient::new(echo_executor());
    let document = Document {
        space_id: "space-1".to_owned(),
        document_id: "doc-1".to_owned(),
        title: "Notes".to_owned(),
        content: "Ünïcödé body\nwith lines".to_owned(),
        version: 42,
    };

    let response = client
        .dispatch("Echo", &DOCUMENT, &DOCUMENT, document.clone())
        .await
        .unwrap();

    assert_eq!(response, document);
}

#[tokio::test]
async fn test_undecodable_response_names_the_command() {
    let client = EchoClient::new(Arc::new(executor_fn(|_command, _payload| async move {
        Ok::<_, BoxError>(Vec::new())
    })));

    let err = client
        .ping(PingRequest {
            value: "hi".to_owned(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.command(), "Ping");
    assert!(err.to_string().starts_with("Failed to execute command 'Ping': "));
}
