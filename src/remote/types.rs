//! Request payloads for the todo service.

use crate::model::UserId;

#[derive(Debug, serde::Serialize)]
pub(super) struct CreateTaskRequest<'a> {
    pub(super) title: &'a str,
    #[serde(rename = "userId")]
    pub(super) user_id: UserId,
    pub(super) completed: bool,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct ListQuery {
    #[serde(rename = "userId")]
    pub(super) user_id: UserId,
}
