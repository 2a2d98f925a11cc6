use bitcode::{Decode, Encode};

// echo.v1

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {
    pub value: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct PingResponse {
    pub value: String,
}

// syncspace.v1

#[derive(Encode, Decode, Debug, Clone, Default, PartialEq, Eq)]
pub struct Empty {}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub data_dir: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct InitResponse {
    pub node_id: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct CreateSpaceRequest {
    pub name: String,
    pub metadata: Vec<(String, String)>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct CreateSpaceResponse {
    pub space_id: String,
    pub ticket: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct JoinSpaceRequest {
    pub ticket: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct JoinSpaceResponse {
    pub space: SpaceInfo,
}

/// Addresses a single space.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SpaceRef {
    pub space_id: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct SpaceInfo {
    pub space_id: String,
    pub name: String,
    pub document_count: u64,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct ListSpacesResponse {
    pub spaces: Vec<SpaceInfo>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub space_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub space_id: String,
    pub document_id: String,
    pub title: String,
    pub content: String,
    pub version: u64,
}

/// Addresses a single document within a space.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub space_id: String,
    pub document_id: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct GetDocumentResponse {
    pub document: Option<Document>,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct UpdateDocumentRequest {
    pub space_id: String,
    pub document_id: String,
    pub content: String,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub document_id: String,
    pub title: String,
    pub version: u64,
}

#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentInfo>,
}
