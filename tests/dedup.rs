#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use vigil::libs::dedup::DedupFilter;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn repeat_within_window_is_suppressed() {
        let mut filter = DedupFilter::new(WINDOW);
        let t0 = Instant::now();

        assert!(filter.admit_at("git status", t0));
        assert!(!filter.admit_at("git status", t0 + Duration::from_secs(10)));
    }

    #[test]
    fn repeat_after_window_is_admitted_again() {
        let mut filter = DedupFilter::new(WINDOW);
        let t0 = Instant::now();

        assert!(filter.admit_at("git status", t0));
        assert!(filter.admit_at("git status", t0 + Duration::from_secs(70)));
    }

    #[test]
    fn distinct_command_lines_have_independent_timers() {
        let mut filter = DedupFilter::new(WINDOW);
        let t0 = Instant::now();

        assert!(filter.admit_at("git status", t0));
        assert!(filter.admit_at("git push origin main", t0 + Duration::from_secs(1)));
        assert!(!filter.admit_at("git status", t0 + Duration::from_secs(2)));
    }

    #[test]
    fn expired_entries_are_pruned() {
        let mut filter = DedupFilter::new(WINDOW);
        let t0 = Instant::now();

        filter.admit_at("git status", t0);
        filter.admit_at("git diff", t0 + Duration::from_secs(1));
        assert_eq!(filter.tracked(), 2);

        // Any later sample evicts everything older than the window.
        filter.admit_at("git log", t0 + Duration::from_secs(120));
        assert_eq!(filter.tracked(), 1);
    }

    #[test]
    fn suppression_starts_only_when_recorded() {
        let mut filter = DedupFilter::new(WINDOW);
        let t0 = Instant::now();

        // Checking alone starts no timer, so a command whose insert failed
        // stays admissible.
        assert!(!filter.suppressed_at("git status", t0));
        assert!(!filter.suppressed_at("git status", t0 + Duration::from_secs(1)));
        assert_eq!(filter.tracked(), 0);

        filter.record_at("git status", t0 + Duration::from_secs(1));
        assert!(filter.suppressed_at("git status", t0 + Duration::from_secs(2)));
    }

    #[test]
    fn digest_is_stable_and_content_addressed() {
        assert_eq!(DedupFilter::digest("git status"), DedupFilter::digest("git status"));
        assert_ne!(DedupFilter::digest("git status"), DedupFilter::digest("git status "));
    }
}
