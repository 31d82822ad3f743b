#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use vigil::libs::debounce::Debouncer;

    const DELAY: Duration = Duration::from_millis(50);

    fn recorder() -> (Arc<Mutex<Vec<(&'static str, u8)>>>, impl Fn(&'static str, u8)) {
        let log: Arc<Mutex<Vec<(&'static str, u8)>>> = Arc::new(Mutex::new(vec![]));
        let writer = Arc::clone(&log);
        (log, move |key, value| {
            writer.lock().push((key, value));
        })
    }

    #[tokio::test]
    async fn burst_produces_one_action_with_last_value() {
        let debouncer: Debouncer<&'static str> = Debouncer::new(DELAY);
        let (log, record) = recorder();
        let record = Arc::new(record);

        for value in 1..=5u8 {
            let record = Arc::clone(&record);
            debouncer.call("entry", move || async move { record("entry", value) });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        debouncer.settle().await;

        assert_eq!(*log.lock(), vec![("entry", 5)]);
    }

    #[tokio::test]
    async fn separate_keys_fire_independently() {
        let debouncer: Debouncer<&'static str> = Debouncer::new(DELAY);
        let (log, record) = recorder();
        let record = Arc::new(record);

        let r = Arc::clone(&record);
        debouncer.call("a", move || async move { r("a", 1) });
        let r = Arc::clone(&record);
        debouncer.call("b", move || async move { r("b", 2) });
        debouncer.settle().await;

        let mut fired = log.lock().clone();
        fired.sort();
        assert_eq!(fired, vec![("a", 1), ("b", 2)]);
    }

    #[tokio::test]
    async fn settled_timer_fires_exactly_once() {
        let debouncer: Debouncer<&'static str> = Debouncer::new(DELAY);
        let (log, record) = recorder();
        let record = Arc::new(record);

        let r = Arc::clone(&record);
        debouncer.call("entry", move || async move { r("entry", 1) });
        debouncer.settle().await;

        // A later intent after settling is a fresh burst, not a repeat of
        // the old one.
        let r = Arc::clone(&record);
        debouncer.call("entry", move || async move { r("entry", 2) });
        debouncer.settle().await;

        assert_eq!(*log.lock(), vec![("entry", 1), ("entry", 2)]);
    }

    #[tokio::test]
    async fn superseded_timer_never_fires() {
        let debouncer: Debouncer<&'static str> = Debouncer::new(DELAY);
        let (log, record) = recorder();
        let record = Arc::new(record);

        let r = Arc::clone(&record);
        debouncer.call("entry", move || async move { r("entry", 1) });
        // Well within the delay: the first timer must be cancelled.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let r = Arc::clone(&record);
        debouncer.call("entry", move || async move { r("entry", 2) });
        debouncer.settle().await;

        assert_eq!(*log.lock(), vec![("entry", 2)]);
        assert_eq!(debouncer.pending_keys(), 0);
    }
}
