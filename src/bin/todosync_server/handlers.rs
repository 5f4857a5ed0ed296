use super::*;

pub(super) async fn healthz() -> &'static str {
    "ok"
}

pub(super) async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Task>> {
    let todos = state.todos.read().await;
    Json(todos.list(query.user_id.map(UserId)))
}

pub(super) async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Task>), Response> {
    state.delay().await;

    let Some(title) = normalize_title(&payload.title) else {
        return Err(bad_request("title must not be empty"));
    };
    if state.faults.titles.contains(&title) {
        tracing::info!(%title, "injecting create failure");
        return Err(injected_failure());
    }

    let task = state
        .todos
        .write()
        .await
        .insert(title, payload.user_id, payload.completed);
    tracing::info!(id = %task.id, user = %task.user_id, "todo created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
    Json(mut patch): Json<TaskPatch>,
) -> Result<Json<Task>, Response> {
    state.delay().await;

    if state.faults.ids.contains(&id) {
        tracing::info!(%id, "injecting update failure");
        return Err(injected_failure());
    }
    if patch.is_empty() {
        return Err(bad_request("patch must set title or completed"));
    }
    if let Some(title) = &patch.title {
        let Some(title) = normalize_title(title) else {
            return Err(bad_request("title must not be empty"));
        };
        patch.title = Some(title);
    }

    let updated = state.todos.write().await.update(id, &patch);
    match updated {
        Some(task) => {
            tracing::info!(%id, "todo updated");
            Ok(Json(task))
        }
        None => Err(not_found()),
    }
}

pub(super) async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
) -> Result<Json<serde_json::Value>, Response> {
    state.delay().await;

    if state.faults.ids.contains(&id) {
        tracing::info!(%id, "injecting delete failure");
        return Err(injected_failure());
    }

    let removed = state.todos.write().await.remove(id);
    match removed {
        Some(_) => {
            tracing::info!(%id, "todo deleted");
            Ok(Json(serde_json::json!({})))
        }
        None => Err(not_found()),
    }
}
