//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Entry, Transfer, TransferResult, User};
use crate::error::{AppError, AppResult};
use crate::handlers::{
    CreateAccountCommand, CreateAccountHandler, CreateUserCommand, CreateUserHandler, Page,
    TransferCommand, TransferHandler, UpdateUserCommand, UpdateUserHandler,
};
use crate::store::{ListAccountsParams, ListEntriesParams, ListTransfersParams};

use super::extract::{JsonBody, PathParam, QueryParams};
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub owner: String,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub owner: String,
    #[serde(default = "default_page_id")]
    pub page_id: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListTransfersQuery {
    pub account_id: i64,
    #[serde(default = "default_page_id")]
    pub page_id: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page_id")]
    pub page_id: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_id() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Serialize)]
pub struct TransfersResponse {
    pub transfers: Vec<Transfer>,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub account_id: i64,
    pub entries: Vec<Entry>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:username", get(get_user).patch(update_user))
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/:account_id", get(get_account))
        .route("/accounts/:account_id/entries", get(list_account_entries))
        .route("/transfers", post(transfer).get(list_transfers))
        .route("/transfers/:transfer_id", get(get_transfer))
        .route("/entries/:entry_id", get(get_entry))
}

// =========================================================================
// Users
// =========================================================================

/// Create a new user
async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let handler = CreateUserHandler::new(state.store);
    let command = CreateUserCommand::new(request.username, request.full_name, request.email);

    let user = handler.execute(command).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by username
async fn get_user(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .get_user(&username)
        .await?
        .ok_or(AppError::UserNotFound(username))?;

    Ok(Json(user))
}

/// Change full name and/or email
async fn update_user(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let handler = UpdateUserHandler::new(state.store);
    let command = UpdateUserCommand::new(username, request.full_name, request.email);

    let user = handler.execute(command).await?;

    Ok(Json(user))
}

// =========================================================================
// Accounts
// =========================================================================

/// Open a zero-balance account
async fn create_account(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let handler = CreateAccountHandler::new(state.store);
    let command = CreateAccountCommand::new(request.owner, request.currency);

    let account = handler.execute(command).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    State(state): State<AppState>,
    PathParam(account_id): PathParam<i64>,
) -> AppResult<Json<Account>> {
    let account = state
        .store
        .get_account(account_id)
        .await?
        .ok_or(AppError::AccountNotFound(account_id))?;

    Ok(Json(account))
}

/// List an owner's accounts, one page at a time
async fn list_accounts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListAccountsQuery>,
) -> AppResult<Json<AccountsResponse>> {
    let (limit, offset) = Page::new(query.page_id, query.page_size).limit_offset()?;

    let accounts = state
        .store
        .list_accounts(&ListAccountsParams {
            owner: query.owner,
            limit,
            offset,
        })
        .await?;

    Ok(Json(AccountsResponse { accounts }))
}

/// Ledger lines for one account
async fn list_account_entries(
    State(state): State<AppState>,
    PathParam(account_id): PathParam<i64>,
    QueryParams(query): QueryParams<PageQuery>,
) -> AppResult<Json<EntriesResponse>> {
    let (limit, offset) = Page::new(query.page_id, query.page_size).limit_offset()?;

    if state.store.get_account(account_id).await?.is_none() {
        return Err(AppError::AccountNotFound(account_id));
    }

    let entries = state
        .store
        .list_entries(&ListEntriesParams {
            account_id,
            limit,
            offset,
        })
        .await?;

    Ok(Json(EntriesResponse {
        account_id,
        entries,
    }))
}

// =========================================================================
// Transfers
// =========================================================================

/// Move money between two accounts
async fn transfer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TransferRequest>,
) -> AppResult<Json<TransferResult>> {
    let handler = TransferHandler::new(state.store, state.self_transfer);
    let command = TransferCommand::new(
        request.from_account_id,
        request.to_account_id,
        request.amount,
        request.currency,
    );

    let result = handler.execute(command).await?;

    Ok(Json(result))
}

async fn get_transfer(
    State(state): State<AppState>,
    PathParam(transfer_id): PathParam<i64>,
) -> AppResult<Json<Transfer>> {
    let transfer = state
        .store
        .get_transfer(transfer_id)
        .await?
        .ok_or(AppError::TransferNotFound(transfer_id))?;

    Ok(Json(transfer))
}

/// Transfers sent or received by an account
async fn list_transfers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListTransfersQuery>,
) -> AppResult<Json<TransfersResponse>> {
    let (limit, offset) = Page::new(query.page_id, query.page_size).limit_offset()?;

    let transfers = state
        .store
        .list_transfers(&ListTransfersParams {
            from_account_id: query.account_id,
            to_account_id: query.account_id,
            limit,
            offset,
        })
        .await?;

    Ok(Json(TransfersResponse { transfers }))
}

// =========================================================================
// Entries
// =========================================================================

async fn get_entry(
    State(state): State<AppState>,
    PathParam(entry_id): PathParam<i64>,
) -> AppResult<Json<Entry>> {
    let entry = state
        .store
        .get_entry(entry_id)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;

    Ok(Json(entry))
}
