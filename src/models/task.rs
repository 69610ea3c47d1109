use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; the wire value for
/// `InProgress` is `"in progress"`, with a space.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    #[sqlx(rename = "in progress")]
    #[serde(rename = "in progress")]
    InProgress,
    Completed,
}

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum, whose labels are declared
/// low, medium, high so that sorting on the column ranks by severity.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// `user_id` is the owning user and never changes after creation; a task is
/// visible to and mutable by its owner only.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a task.
///
/// Status and priority are optional; creation defaults them to `pending` and
/// `medium` respectively.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub deadline: Option<DateTime<Utc>>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,
}

/// Partial update for a task: only supplied fields are replaced, omitted
/// fields keep their prior values.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub deadline: Option<DateTime<Utc>>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,
}

/// Query parameters accepted when listing tasks.
///
/// `sort_by` and `sort_order` arrive as free-form strings; unrecognized
/// values fall back to the default sort rather than failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl Task {
    /// Creates a new `Task` owned by `user_id`, applying the `pending` /
    /// `medium` defaults for omitted status and priority.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            description: input.description,
            deadline: input.deadline,
            status: input.status.unwrap_or(TaskStatus::Pending),
            priority: input.priority.unwrap_or(TaskPriority::Medium),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation_applies_defaults() {
        let input = TaskInput {
            title: "Buy groceries".to_string(),
            description: None,
            deadline: None,
            status: None,
            priority: None,
        };

        let task = Task::new(input, 1);
        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.user_id, 1);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_task_creation_keeps_explicit_fields() {
        let deadline = Utc::now();
        let input = TaskInput {
            title: "File taxes".to_string(),
            description: Some("Before the end of the month".to_string()),
            deadline: Some(deadline),
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::High),
        };

        let task = Task::new(input, 42);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.deadline, Some(deadline));
    }

    #[test]
    fn test_task_input_validation() {
        let invalid_input_empty_title = TaskInput {
            title: "".to_string(),
            description: Some("Test Description".to_string()),
            deadline: None,
            status: None,
            priority: None,
        };
        assert!(
            invalid_input_empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let long_title = "a".repeat(201);
        let invalid_input_long_title = TaskInput {
            title: long_title,
            description: None,
            deadline: None,
            status: None,
            priority: None,
        };
        assert!(
            invalid_input_long_title.validate().is_err(),
            "Validation should fail for overly long title."
        );

        let long_description = "b".repeat(1001);
        let invalid_input_long_desc = TaskInput {
            title: "Valid title".to_string(),
            description: Some(long_description),
            deadline: None,
            status: None,
            priority: None,
        };
        assert!(
            invalid_input_long_desc.validate().is_err(),
            "Validation should fail for overly long description."
        );

        let valid_input = TaskInput {
            title: "Valid title".to_string(),
            description: Some("Valid description".to_string()),
            deadline: None,
            status: Some(TaskStatus::Completed),
            priority: Some(TaskPriority::Low),
        };
        assert!(valid_input.validate().is_ok());
    }

    #[test]
    fn test_task_update_validation() {
        // An entirely empty update is valid; it simply changes nothing.
        let empty = TaskUpdate {
            title: None,
            description: None,
            deadline: None,
            status: None,
            priority: None,
        };
        assert!(empty.validate().is_ok());

        let blank_title = TaskUpdate {
            title: Some("".to_string()),
            description: None,
            deadline: None,
            status: None,
            priority: None,
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"pending\"").unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"in progress\"").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::Medium).unwrap(),
            "\"medium\""
        );
    }
}
