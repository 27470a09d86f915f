//! Converter behavior against real backend payload shapes.

use chrono::NaiveDate;
use serde_json::json;

use gantt_sync::convert::{self, to_backend_task, to_widget_format};
use gantt_sync::{LinkKind, TaskId};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_backend_task_to_widget_row() {
    let tree = to_widget_format(&json!({
        "tasks": [{
            "id": "t1",
            "name": "Build",
            "startTime": "2024-01-01T12:00:00Z",
            "endTime": "2024-01-04T12:00:00Z",
            "isCompleted": false
        }]
    }));
    assert_eq!(tree.tasks.len(), 1);
    let task = &tree.tasks[0];
    assert_eq!(task.id, TaskId::persisted("t1"));
    assert_eq!(task.start_date, day(2024, 1, 1));
    assert_eq!(task.duration_days, 3);
    assert_eq!(task.progress, 0.0);
    assert!(!task.is_completed);
}

#[test]
fn test_edited_duration_round_trips_to_end_instant() {
    let tree = to_widget_format(&json!({
        "tasks": [{
            "id": "t1",
            "name": "Build",
            "startTime": "2024-01-01T12:00:00Z",
            "endTime": "2024-01-04T12:00:00Z"
        }]
    }));
    let mut task = tree.tasks[0].clone();
    task.duration_days = 5;

    let dto = to_backend_task(&task, Some("p1"));
    assert_eq!(dto.start_time, "2024-01-01T12:00:00Z");
    assert_eq!(dto.end_time, "2024-01-06T12:00:00Z");
}

#[test]
fn test_round_trip_preserves_date_and_duration() {
    let tree = to_widget_format(&json!({
        "tasks": [{
            "id": "t1",
            "name": "Build",
            "startTime": "2024-03-10T12:00:00Z",
            "endTime": "2024-03-17T12:00:00Z"
        }]
    }));
    let dto = to_backend_task(&tree.tasks[0], Some("p1"));

    let back = to_widget_format(&json!({
        "tasks": [{
            "id": "t1",
            "name": dto.name,
            "startTime": dto.start_time,
            "endTime": dto.end_time
        }]
    }));
    assert_eq!(back.tasks[0].start_date, day(2024, 3, 10));
    assert_eq!(back.tasks[0].duration_days, 7);
}

#[test]
fn test_duration_invariant_on_degenerate_dates() {
    let tree = to_widget_format(&json!({
        "tasks": [
            {"id": "a", "startTime": "2024-01-04", "endTime": "2024-01-01"},
            {"id": "b", "startTime": "2024-01-04"},
            {"id": "c", "startTime": "junk", "endTime": "more junk"}
        ]
    }));
    for task in &tree.tasks {
        assert!(task.duration_days >= 1, "task {} broke the invariant", task.id);
    }
}

#[test]
fn test_field_name_variants_resolve_identically() {
    let spellings = [
        json!({"id": "t", "startDate": "2024-01-01", "endDate": "2024-01-03"}),
        json!({"id": "t", "StartDate": "2024-01-01", "EndDate": "2024-01-03"}),
        json!({"Id": "t", "StartTime": "2024-01-01T00:00:00Z", "EndTime": "2024-01-03T00:00:00Z"}),
        json!({"id": "t", "start_date": "2024-01-01", "end_date": "2024-01-03"}),
    ];
    for payload in spellings {
        let tree = to_widget_format(&json!({ "tasks": [payload] }));
        assert_eq!(tree.tasks[0].start_date, day(2024, 1, 1));
        assert_eq!(tree.tasks[0].duration_days, 2);
    }
}

#[test]
fn test_one_malformed_task_does_not_block_the_rest() {
    let tree = to_widget_format(&json!({
        "rootTask": {"id": "root", "name": "Project"},
        "tasks": [
            {"id": "good", "name": "Fine", "parentId": "root"},
            {"id": "broken", "dependencies": "not-a-list"},
            {"name": "no id at all"}
        ]
    }));
    let ids: Vec<String> = tree.tasks.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(ids, vec!["root", "good"]);
}

#[test]
fn test_progress_derivation() {
    let tree = to_widget_format(&json!({
        "tasks": [
            {"id": "done", "isCompleted": true},
            {"id": "explicit", "progress": 0.4},
            {"id": "fresh"}
        ]
    }));
    let progress_of = |id: &str| {
        tree.task(&TaskId::persisted(id))
            .map(|t| t.progress)
            .unwrap()
    };
    assert_eq!(progress_of("done"), 1.0);
    assert_eq!(progress_of("explicit"), 0.4);
    assert_eq!(progress_of("fresh"), 0.0);
}

#[test]
fn test_unnamed_task_gets_default_label() {
    let tree = convert::to_widget_format_with(
        &json!({"tasks": [{"id": "t", "name": ""}]}),
        "Без названия",
    );
    assert_eq!(tree.tasks[0].label, "Без названия");
}

#[test]
fn test_batch_conversion_translates_link_types() {
    let tree = to_widget_format(&json!({
        "tasks": [
            {"id": "a", "startDate": "2024-01-01", "endDate": "2024-01-02"},
            {"id": "b", "startDate": "2024-01-02", "endDate": "2024-01-03",
             "dependencies": [{"parentId": "a", "type": 2}]}
        ]
    }));
    assert_eq!(tree.links[0].kind, LinkKind::FinishToStart);

    let batch = convert::to_backend_format(&tree, "p1");
    assert_eq!(batch.tasks.len(), 2);
    assert_eq!(batch.dependencies.len(), 1);
    let dep = &batch.dependencies[0];
    assert_eq!(dep.parent_id, "a");
    assert_eq!(dep.child_id, "b");
    assert_eq!(dep.kind, 2);
    assert!(batch.tasks.iter().all(|t| t.project_id.as_deref() == Some("p1")));
}

#[test]
fn test_empty_and_alien_payloads_render_empty_trees() {
    assert!(to_widget_format(&json!({})).is_empty());
    assert!(to_widget_format(&json!(null)).is_empty());
    assert!(to_widget_format(&json!([1, 2, 3])).is_empty());
}
