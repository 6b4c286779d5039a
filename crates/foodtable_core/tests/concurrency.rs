use foodtable_core::{FoodData, InMemoryRecordStore, RecordRepository};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

fn uniform(name: &str, value: f64) -> FoodData {
    FoodData::new(name, value, value, value, value)
}

#[test]
fn concurrent_creates_assign_unique_gapless_ids() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let store = InMemoryRecordStore::new();
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut ids = Vec::with_capacity(PER_THREAD);
                for idx in 0..PER_THREAD {
                    ids.push(store.create(uniform(&format!("w{worker}-{idx}"), 1.0)));
                }
                ids
            })
        })
        .collect();

    let mut all = BTreeSet::new();
    for handle in handles {
        let ids = handle.join().unwrap();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        all.extend(ids);
    }

    let total = (THREADS * PER_THREAD) as u64;
    assert_eq!(all.len() as u64, total);
    assert_eq!(all.iter().copied().collect::<Vec<_>>(), (0..total).collect::<Vec<_>>());

    let rows = store.page_by_range(0, i64::MAX);
    assert_eq!(rows.len() as u64, total);
    assert!(rows.windows(2).all(|pair| pair[0].id() < pair[1].id()));
}

#[test]
fn readers_never_observe_torn_pages_while_a_writer_runs() {
    const MAX_WRITER_ROUNDS: u32 = 5_000;

    let store = InMemoryRecordStore::with_seed((0..50).map(|idx| uniform("seed", f64::from(idx))));
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = store.clone();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut round = 0_u32;
            while !stop.load(Ordering::Relaxed) && round < MAX_WRITER_ROUNDS {
                let id = store.create(uniform("new", f64::from(round)));
                store.update(id, uniform("changed", f64::from(round) + 0.5));
                if round % 2 == 0 {
                    store.delete(id);
                }
                round += 1;
            }
            round
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let (len, page) =
                        store.read(|table| (table.len(), table.page_by_range(0, i64::MAX)));
                    assert_eq!(len, page.len());
                    assert!(page.windows(2).all(|pair| pair[0].id() < pair[1].id()));
                    for record in &page {
                        let food = &record.payload;
                        assert!(
                            food.kcal == food.protein
                                && food.protein == food.carbs
                                && food.carbs == food.fat,
                            "half-updated row observed: {food:?}"
                        );
                    }
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    let rounds = writer.join().unwrap();

    let deleted = rounds.div_ceil(2) as usize;
    assert_eq!(store.size(), 50 + rounds as usize - deleted);
}

#[test]
fn read_scope_using_only_its_table_finishes_while_a_writer_is_queued() {
    let store = InMemoryRecordStore::with_seed(vec![uniform("rice", 1.0), uniform("oat", 2.0)]);
    let (entered_tx, entered_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel();

    let reader = {
        let store = store.clone();
        thread::spawn(move || {
            let seen = store.read(|table| {
                entered_tx.send(()).unwrap();
                // Give the writer time to queue behind this scope.
                thread::sleep(Duration::from_millis(150));
                (table.len(), table.count_by_name("rice"), table.page_by_range(0, 10))
            });
            done_tx.send(seen).unwrap();
        })
    };

    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let writer = {
        let store = store.clone();
        thread::spawn(move || store.create(uniform("rice", 3.0)))
    };

    let (len, rice, page) = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(len, 2);
    assert_eq!(rice, 1);
    assert_eq!(page.len(), 2);

    reader.join().unwrap();
    assert_eq!(writer.join().unwrap(), 2);
    assert_eq!(store.count_by_name("rice"), 2);
}
