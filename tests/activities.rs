#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::db::activities::Activities;
    use vigil::libs::activity::{Lifecycle, NewActivity, TrackedEvent};
    use vigil::libs::device::DeviceIdentity;

    struct ActivitiesTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ActivitiesTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ActivitiesTestContext { _temp_dir: temp_dir }
        }
    }

    fn identity() -> DeviceIdentity {
        DeviceIdentity {
            device_id: "1234567890".to_string(),
            username: "tester".to_string(),
            system: "Linux".to_string(),
            device_name: "testbox".to_string(),
        }
    }

    fn window_event(process: &str, title: &str) -> NewActivity {
        let event = TrackedEvent::Normal {
            process: process.to_string(),
            title: title.to_string(),
        };
        NewActivity::now(&event, 12.5, &identity())
    }

    #[test_context(ActivitiesTestContext)]
    #[test]
    fn insert_assigns_increasing_ids(_ctx: &mut ActivitiesTestContext) {
        let activities = Activities::new().unwrap();

        let first = activities.insert(&window_event("Safari", "example.com")).unwrap();
        let second = activities.insert(&window_event("Terminal", "terminal")).unwrap();
        let third = activities.insert(&window_event("Safari", "example.com")).unwrap();

        assert!(first < second);
        assert!(second < third);
    }

    #[test_context(ActivitiesTestContext)]
    #[test]
    fn unsynced_records_come_back_in_insertion_order(_ctx: &mut ActivitiesTestContext) {
        let activities = Activities::new().unwrap();

        activities.insert(&window_event("Safari", "example.com")).unwrap();
        activities.insert(&window_event("Terminal", "terminal")).unwrap();

        let records = activities.fetch_unsynced().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].process, "Safari");
        assert_eq!(records[1].process, "Terminal");
        assert!(records[0].id < records[1].id);
        assert!(records.iter().all(|r| !r.synced));

        // Re-callable without consuming anything.
        assert_eq!(activities.fetch_unsynced().unwrap().len(), 2);
    }

    #[test_context(ActivitiesTestContext)]
    #[test]
    fn mark_synced_is_bounded_by_id(_ctx: &mut ActivitiesTestContext) {
        let activities = Activities::new().unwrap();

        activities.insert(&window_event("Safari", "example.com")).unwrap();
        let second = activities.insert(&window_event("Terminal", "terminal")).unwrap();

        // A record inserted after the batch was read must stay unsynced.
        let late = activities.insert(&window_event("Notes", "Notes")).unwrap();

        let updated = activities.mark_synced_up_to(second).unwrap();
        assert_eq!(updated, 2);

        let remaining = activities.fetch_unsynced().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, late);
    }

    #[test_context(ActivitiesTestContext)]
    #[test]
    fn synced_records_are_retained_not_deleted(_ctx: &mut ActivitiesTestContext) {
        let activities = Activities::new().unwrap();

        let id = activities.insert(&window_event("Safari", "example.com")).unwrap();
        activities.mark_synced_up_to(id).unwrap();

        assert!(activities.fetch_unsynced().unwrap().is_empty());
        let total: i64 = activities
            .conn
            .query_row("SELECT COUNT(*) FROM activity", [], |row| row.get(0))
            .unwrap();
        assert_eq!(total, 1);
    }

    #[test_context(ActivitiesTestContext)]
    #[test]
    fn lifecycle_markers_share_the_record_shape(_ctx: &mut ActivitiesTestContext) {
        let activities = Activities::new().unwrap();

        let pause = NewActivity::now(&TrackedEvent::Lifecycle(Lifecycle::Pause), 0.0, &identity());
        let resume = NewActivity::now(&TrackedEvent::Lifecycle(Lifecycle::Resume), 0.0, &identity());
        activities.insert(&pause).unwrap();
        activities.insert(&resume).unwrap();

        let records = activities.fetch_unsynced().unwrap();
        assert_eq!(records[0].process, "[PAUSE]");
        assert_eq!(records[0].window_title, "[PAUSE]");
        assert_eq!(records[1].process, "[RESUME]");
    }
}
