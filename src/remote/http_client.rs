use serde::de::DeserializeOwned;

use super::*;

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and maps transport failures and non-2xx statuses.
    pub(super) async fn send(
        &self,
        op: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RemoteError> {
        let resp = req
            .send()
            .await
            .map_err(|source| RemoteError::Transport { op, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                op,
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    pub(super) async fn decode<T: DeserializeOwned>(
        op: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let body = resp
            .bytes()
            .await
            .map_err(|source| RemoteError::Transport { op, source })?;
        serde_json::from_slice(&body).map_err(|err| RemoteError::Decode {
            op,
            detail: err.to_string(),
        })
    }
}
