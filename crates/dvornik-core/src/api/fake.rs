//! In-memory [`PodApi`] used by unit tests.
use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use dvornik_model::{DeleteRequest, Pod};

use super::{PodApi, PodApiError};

#[derive(Default)]
pub(crate) struct FakePodApi {
    pods: Vec<Pod>,
    list_error: Option<String>,
    fail_on: HashSet<String>,
    deletes: Mutex<Vec<DeleteRequest>>,
    lists: Mutex<Vec<(String, Option<String>)>>,
}

impl FakePodApi {
    pub(crate) fn with_pods(pods: Vec<Pod>) -> Self {
        Self {
            pods,
            ..Self::default()
        }
    }

    pub(crate) fn failing_list(reason: &str) -> Self {
        Self {
            list_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Make deletes of `name` fail with `NotFound`.
    pub(crate) fn fail_delete(mut self, name: &str) -> Self {
        self.fail_on.insert(name.to_string());
        self
    }

    /// Every delete attempted so far, including failed ones.
    pub(crate) fn deletes(&self) -> Vec<DeleteRequest> {
        self.deletes.lock().unwrap().clone()
    }

    pub(crate) fn lists(&self) -> Vec<(String, Option<String>)> {
        self.lists.lock().unwrap().clone()
    }
}

#[async_trait]
impl PodApi for FakePodApi {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn list(
        &self,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<Pod>, PodApiError> {
        self.lists
            .lock()
            .unwrap()
            .push((namespace.to_string(), label_selector.map(str::to_string)));

        match &self.list_error {
            Some(reason) => Err(PodApiError::Transport(reason.clone())),
            None => Ok(self.pods.clone()),
        }
    }

    async fn delete(&self, req: &DeleteRequest) -> Result<(), PodApiError> {
        self.deletes.lock().unwrap().push(req.clone());

        if self.fail_on.contains(&req.name) {
            return Err(PodApiError::NotFound(req.name.clone()));
        }
        Ok(())
    }
}
