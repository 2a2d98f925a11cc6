use bitcode::{Decode, Encode};
use commux::{BoxError, CommandClient, CommandExecutor, TypeDescriptor};
use commux_endpoint::{CommandRouter, error::EndpointError};
use std::sync::Arc;

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
struct AddRequest {
    numbers: Vec<f64>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq)]
struct AddResponse {
    sum: f64,
}

const ADD_REQUEST: TypeDescriptor<AddRequest> = TypeDescriptor::bitcode("math.v1.AddRequest");
const ADD_RESPONSE: TypeDescriptor<AddResponse> = TypeDescriptor::bitcode("math.v1.AddResponse");

async fn math_router() -> CommandRouter {
    let router = CommandRouter::new();
    router
        .register_typed("Add", &ADD_REQUEST, &ADD_RESPONSE, |request: AddRequest| async move {
            Ok::<_, BoxError>(AddResponse {
                sum: request.numbers.iter().sum(),
            })
        })
        .await
        .unwrap();
    router
        .register("Reverse", |mut payload: Vec<u8>| async move {
            payload.reverse();
            Ok(payload)
        })
        .await
        .unwrap();
    router
}

#[tokio::test]
async fn test_raw_handler_receives_payload() {
    let router = math_router().await;

    let response = router.execute("Reverse", vec![1, 2, 3]).await.unwrap();

    assert_eq!(response, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_typed_handler_through_client() {
    let client = CommandClient::new(Arc::new(math_router().await));

    let response = client
        .dispatch(
            "Add",
            &ADD_REQUEST,
            &ADD_RESPONSE,
            AddRequest {
                numbers: vec![1.0, 2.0, 3.5],
            },
        )
        .await
        .unwrap();

    assert_eq!(response, AddResponse { sum: 6.5 });
}

#[tokio::test]
async fn test_duplicate_registration_fails() {
    let router = math_router().await;

    let err = router
        .register("Add", |payload: Vec<u8>| async move { Ok(payload) })
        .await
        .unwrap_err();

    assert_eq!(err, EndpointError::DuplicateCommand("Add".to_owned()));
    assert_eq!(
        err.to_string(),
        "a handler for command 'Add' is already registered"
    );
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    let router = math_router().await;

    let err = router.execute("Subtract", vec![]).await.unwrap_err();

    assert_eq!(err.to_string(), "unknown command: Subtract");
}

#[tokio::test]
async fn test_undecodable_request_is_rejected() {
    let router = math_router().await;

    let err = router.execute("Add", Vec::new()).await.unwrap_err();

    assert!(
        err.to_string().starts_with("failed to decode request: "),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_handler_errors_reach_the_caller() {
    let router = CommandRouter::new();
    router
        .register("Fail", |_payload: Vec<u8>| async move {
            Err::<Vec<u8>, BoxError>("boom".into())
        })
        .await
        .unwrap();
    let client = CommandClient::new(Arc::new(router));

    let err = client.dispatch_command("Fail", vec![]).await.unwrap_err();

    assert_eq!(err.command(), "Fail");
    assert_eq!(err.cause(), "boom");
}

#[tokio::test]
async fn test_commands_are_listed_sorted() {
    let router = math_router().await;
    let clone = router.clone();
    clone
        .register("Echo", |payload: Vec<u8>| async move { Ok(payload) })
        .await
        .unwrap();

    // Clones share one handler table.
    assert_eq!(router.commands().await, vec!["Add", "Echo", "Reverse"]);
}
