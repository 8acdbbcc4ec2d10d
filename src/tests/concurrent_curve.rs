use std::thread;

use crate::base::*;
use crate::concurrent::SharedDecayCurve;
use crate::tests::util::*;

#[test]
fn updates_from_many_producers_are_serialized() {
    let shared = SharedDecayCurve::<u64>::new(settings(0.0, 1000.0, 128, 4)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|p| {
            let shared = shared.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    let times: Vec<i64> = (0..20).map(|i| (p * 97 + round * 13 + i * 41) % 1000).collect();
                    let mut times = times;
                    times.sort();
                    shared.arrange_update(&batch(CHAN, &times), false).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(8 * 50 * 20, shared.lock().total_count());
    let frame = shared.arrange_update(&EventBatch::new(), true).unwrap().frame;
    assert_eq!((8 * 50 * 20) as f64, frame.total());
}

#[test]
fn snapshot_and_clear_go_through_the_lock() {
    let shared = SharedDecayCurve::<u64>::new(settings(0.0, 10.0, 20, 1)).unwrap();
    shared.arrange_update(&batch(CHAN, &[1, 1, 2]), false).unwrap();

    let snapshot = shared.snapshot();
    assert_eq!(11, snapshot.edges.len());
    assert_eq!(3_u64, snapshot.counts.iter().sum::<u64>());

    shared.clear_data();
    assert!(!shared.lock().is_initialized());
}
