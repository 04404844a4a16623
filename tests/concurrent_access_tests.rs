/// Concurrent access tests
///
/// Many tokio tasks dispatching against one shared store.
/// Run with: cargo test --test concurrent_access_tests
use bandstore::{
    BandCollection, BandPayload, CommandRegistry, Coordinates, Dispatcher, Request, User,
};
use std::collections::HashSet;
use std::sync::Arc;

fn dispatcher() -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(
        CommandRegistry::with_default_commands(),
        Arc::new(BandCollection::new()),
    ))
}

fn payload(name: &str, participants: i64) -> BandPayload {
    BandPayload::new(name, Coordinates::new(0, 0.0), participants)
}

#[tokio::test]
async fn concurrent_inserts_never_share_an_id() {
    let dispatcher = dispatcher();
    let num_tasks = 8;
    let inserts_per_task = 25;

    let mut handles = vec![];
    for task_id in 0..num_tasks {
        let dispatcher = Arc::clone(&dispatcher);
        handles.push(tokio::spawn(async move {
            let user = User::new(format!("writer{}", task_id));
            for i in 0..inserts_per_task {
                let response = dispatcher
                    .dispatch(
                        &Request::new("add")
                            .with_band(payload(&format!("band-{}-{}", task_id, i), 3)),
                        Some(&user),
                    )
                    .await;
                assert!(response.success, "{}", response.message);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let bands = dispatcher.store().snapshot().await;
    assert_eq!(bands.len(), num_tasks * inserts_per_task);

    let ids: HashSet<u64> = bands.iter().map(|band| band.id).collect();
    assert_eq!(ids.len(), bands.len());
}

#[tokio::test]
async fn bulk_removal_is_atomic_against_foreign_inserts() {
    let dispatcher = dispatcher();
    let sweeper = User::new("sweeper");

    // Sweeper owns 30 bands above the threshold and 10 below it.
    for i in 0..30 {
        dispatcher
            .dispatch(
                &Request::new("add").with_band(payload(&format!("big-{}", i), 100)),
                Some(&sweeper),
            )
            .await;
    }
    for i in 0..10 {
        dispatcher
            .dispatch(
                &Request::new("add").with_band(payload(&format!("small-{}", i), 5)),
                Some(&sweeper),
            )
            .await;
    }

    // Other owners keep inserting matching bands while the sweep runs; none
    // of theirs may be removed.
    let filler_inserts = 40;
    let mut handles = vec![];
    for task_id in 0..4 {
        let dispatcher = Arc::clone(&dispatcher);
        handles.push(tokio::spawn(async move {
            let user = User::new(format!("filler{}", task_id));
            for i in 0..filler_inserts / 4 {
                dispatcher
                    .dispatch(
                        &Request::new("add")
                            .with_band(payload(&format!("filler-{}-{}", task_id, i), 200)),
                        Some(&user),
                    )
                    .await;
            }
        }));
    }
    {
        let dispatcher = Arc::clone(&dispatcher);
        handles.push(tokio::spawn(async move {
            let response = dispatcher
                .dispatch(&Request::new("remove_greater").arg("10"), Some(&sweeper))
                .await;
            assert!(response.success);
            assert_eq!(
                response.message,
                "removed 30 band(s) with more than 10 participants"
            );
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let bands = dispatcher.store().snapshot().await;
    let sweeper_bands: Vec<_> = bands.iter().filter(|b| b.owner == "sweeper").collect();
    let filler_bands: Vec<_> = bands.iter().filter(|b| b.owner != "sweeper").collect();

    // Exactly the small bands survive for the sweeper; every foreign band
    // survives even though all of them match the predicate.
    assert_eq!(sweeper_bands.len(), 10);
    assert!(sweeper_bands
        .iter()
        .all(|band| band.number_of_participants <= 10));
    assert_eq!(filler_bands.len(), filler_inserts);
}

#[tokio::test]
async fn concurrent_reads_and_writes_stay_consistent() {
    let dispatcher = dispatcher();
    let writes = 50;

    let writer = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let user = User::new("writer");
            for i in 0..writes {
                dispatcher
                    .dispatch(
                        &Request::new("add").with_band(payload(&format!("band-{}", i), 3)),
                        Some(&user),
                    )
                    .await;
            }
        })
    };

    let reader = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            for _ in 0..writes {
                let response = dispatcher.dispatch(&Request::new("show"), None).await;
                assert!(response.success);
                let bands = response.bands.unwrap();
                assert!(bands.len() <= writes);
                // Each observed snapshot is internally consistent: unique ids.
                let ids: HashSet<u64> = bands.iter().map(|band| band.id).collect();
                assert_eq!(ids.len(), bands.len());
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    assert_eq!(dispatcher.store().len().await, writes);
}
