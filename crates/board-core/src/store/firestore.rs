//! Firestore Board Store
//!
//! REST client for the Firestore v1 document API. One document per column
//! under `users/{uid}/kanban/default/columns/{column_id}`, with a `title`
//! string field and a `tasks` array of `{id, title}` maps. Array writes go
//! through `:commit` field transforms so add/remove stay atomic on the
//! server side.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::domain::{Column, ColumnId, DomainError, DomainResult, Task};

use super::BoardStore;

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

pub struct FirestoreBoardStore {
    http: Client,
    project_id: String,
    id_token: Mutex<Option<String>>,
}

impl FirestoreBoardStore {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            project_id: project_id.into(),
            id_token: Mutex::new(None),
        }
    }

    /// Install or clear the bearer token sent with every request
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.id_token.lock() {
            *guard = token;
        }
    }

    fn token(&self) -> DomainResult<String> {
        self.id_token
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .ok_or_else(|| DomainError::Unauthenticated("no id token installed".into()))
    }

    /// Resource name prefix `projects/{p}/databases/(default)/documents`
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    fn columns_parent(&self, owner: &str) -> String {
        format!("{}/users/{}/kanban/default", self.documents_root(), owner)
    }

    fn column_doc(&self, owner: &str, column: ColumnId) -> String {
        format!("{}/columns/{}", self.columns_parent(owner), column.as_str())
    }

    async fn commit_array_transform(
        &self,
        owner: &str,
        column: ColumnId,
        transform: &str,
        task: &Task,
    ) -> DomainResult<()> {
        let token = self.token()?;
        let url = format!("{}/{}:commit", FIRESTORE_BASE, self.documents_root());

        // transform key ("appendMissingElements" / "removeAllFromArray")
        // is dynamic, so the map is built by hand
        let mut field_transform = Map::new();
        field_transform.insert("fieldPath".into(), json!("tasks"));
        field_transform.insert(
            transform.to_string(),
            json!({ "values": [task_value(task)] }),
        );

        let body = json!({
            "writes": [{
                "transform": {
                    "document": self.column_doc(owner, column),
                    "fieldTransforms": [Value::Object(field_transform)],
                }
            }]
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        check_status(resp).await
    }
}

#[async_trait]
impl BoardStore for FirestoreBoardStore {
    async fn load_columns(&self, owner: &str) -> DomainResult<Vec<Column>> {
        let token = self.token()?;
        let url = format!("{}/{}/columns", FIRESTORE_BASE, self.columns_parent(owner));

        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;

        let mut columns = Vec::new();
        if let Some(docs) = body.get("documents").and_then(Value::as_array) {
            for doc in docs {
                // documents with ids outside the fixed column set are ignored
                if let Some(column) = parse_column_doc(doc) {
                    columns.push(column);
                }
            }
        }
        Ok(columns)
    }

    async fn put_column(&self, owner: &str, column: &Column) -> DomainResult<()> {
        let token = self.token()?;
        let url = format!("{}/{}", FIRESTORE_BASE, self.column_doc(owner, column.id));

        let resp = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&json!({ "fields": column_fields(column) }))
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        check_status(resp).await
    }

    async fn add_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        self.commit_array_transform(owner, column, "appendMissingElements", task)
            .await
    }

    async fn remove_task(&self, owner: &str, column: ColumnId, task: &Task) -> DomainResult<()> {
        self.commit_array_transform(owner, column, "removeAllFromArray", task)
            .await
    }
}

async fn check_status(resp: reqwest::Response) -> DomainResult<()> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(status_error(resp).await)
    }
}

async fn status_error(resp: reqwest::Response) -> DomainError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    DomainError::Remote(format!("firestore returned {}: {}", status, body))
}

/// Encode a task as a Firestore map value
fn task_value(task: &Task) -> Value {
    json!({
        "mapValue": {
            "fields": {
                "id": { "stringValue": task.id },
                "title": { "stringValue": task.title },
            }
        }
    })
}

/// Decode a Firestore map value back into a task
fn parse_task_value(value: &Value) -> Option<Task> {
    let fields = value.get("mapValue")?.get("fields")?;
    let id = fields.get("id")?.get("stringValue")?.as_str()?;
    let title = fields.get("title")?.get("stringValue")?.as_str()?;
    Some(Task::with_title(id, title))
}

/// Encode a column's document fields
fn column_fields(column: &Column) -> Value {
    let tasks: Vec<Value> = column.tasks.iter().map(task_value).collect();
    json!({
        "title": { "stringValue": column.title },
        "tasks": { "arrayValue": { "values": tasks } },
    })
}

/// Decode one document from a collection listing; None for documents
/// whose id is not a known column
fn parse_column_doc(doc: &Value) -> Option<Column> {
    let name = doc.get("name")?.as_str()?;
    let doc_id = name.rsplit('/').next()?;
    let id = ColumnId::parse(doc_id)?;

    let fields = doc.get("fields");
    let title = fields
        .and_then(|f| f.get("title"))
        .and_then(|t| t.get("stringValue"))
        .and_then(Value::as_str)
        .unwrap_or(id.title())
        .to_string();

    let tasks = fields
        .and_then(|f| f.get("tasks"))
        .and_then(|t| t.get("arrayValue"))
        .and_then(|a| a.get("values"))
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(parse_task_value).collect())
        .unwrap_or_default();

    Some(Column { id, title, tasks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_value_round_trip() {
        let task = Task::with_title("t1", "Write spec");
        let decoded = parse_task_value(&task_value(&task)).expect("decode");
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_parse_column_doc() {
        let doc = json!({
            "name": "projects/p/databases/(default)/documents/users/u1/kanban/default/columns/in-progress",
            "fields": {
                "title": { "stringValue": "In Progress" },
                "tasks": { "arrayValue": { "values": [
                    { "mapValue": { "fields": {
                        "id": { "stringValue": "t1" },
                        "title": { "stringValue": "Write spec" },
                    }}},
                ]}},
            }
        });

        let column = parse_column_doc(&doc).expect("parse");
        assert_eq!(column.id, ColumnId::InProgress);
        assert_eq!(column.title, "In Progress");
        assert_eq!(column.tasks, vec![Task::with_title("t1", "Write spec")]);
    }

    #[test]
    fn test_parse_column_doc_skips_unknown_ids() {
        let doc = json!({
            "name": ".../columns/archive",
            "fields": {},
        });
        assert!(parse_column_doc(&doc).is_none());
    }

    #[test]
    fn test_empty_column_doc_gets_standard_title() {
        let doc = json!({ "name": ".../columns/todo" });
        let column = parse_column_doc(&doc).expect("parse");
        assert_eq!(column.title, "To Do");
        assert!(column.tasks.is_empty());
    }
}
