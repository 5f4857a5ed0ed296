//! In-memory development server for the `/todos` contract, with fault injection.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::sync::RwLock;

use todosync::model::{Task, TaskId, TaskPatch, UserId, normalize_title};

#[path = "todosync_server/types.rs"]
mod types;
use self::types::*;
#[path = "todosync_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "todosync_server/handlers.rs"]
mod handlers;
use self::handlers::*;
#[path = "todosync_server/routes.rs"]
mod routes;
#[path = "todosync_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
