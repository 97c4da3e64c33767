use std::sync::Arc;
use std::thread;

use svg_relay::{InMemoryStore, SvgSubmissionService};

use crate::support::CIRCLE;

#[test]
fn concurrent_submissions_get_unique_gapless_ids() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let service = Arc::new(SvgSubmissionService::new(InMemoryStore::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| service.submit(CIRCLE).unwrap().id)
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();

    let total = (THREADS * PER_THREAD) as u64;
    assert_eq!(ids, (1..=total).collect::<Vec<u64>>());
    assert_eq!(service.current().unwrap().id, total);
}

#[test]
fn ids_increase_within_each_thread() {
    let service = Arc::new(SvgSubmissionService::new(InMemoryStore::new()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let ids: Vec<u64> = (0..50).map(|_| service.submit(CIRCLE).unwrap().id).collect();
                ids.windows(2).all(|w| w[0] < w[1])
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
