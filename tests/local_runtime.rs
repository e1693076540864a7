//! Steps that complete on a tokio current-thread runtime.

mod common;

use qflow::{Error, Next, map, repeat_until};
use tokio::sync::oneshot;
use tokio::task::{LocalSet, spawn_local, yield_now};

#[tokio::test]
async fn test_repeat_until_settles_from_local_tasks() {
    common::init_tracing();
    let local = LocalSet::new();
    local
        .run_until(async {
            let (tx, rx) = oneshot::channel();
            let mut n = 0u32;

            repeat_until(
                move |next: Next<Option<u32>, Error>| {
                    n += 1;
                    let report = (n == 50).then_some(n);
                    spawn_local(async move {
                        yield_now().await;
                        next.done(report)
                    });
                    Ok(())
                },
                move |outcome| {
                    let _ = tx.send(outcome.map_err(|failed| failed.to_string()));
                    Ok(())
                },
            )
            .unwrap();

            assert_eq!(rx.await.unwrap(), Ok(50));
        })
        .await;
}

#[tokio::test]
async fn test_map_failure_from_local_task_keeps_partial() {
    common::init_tracing();
    let local = LocalSet::new();
    local
        .run_until(async {
            let (tx, rx) = oneshot::channel();

            map(
                1..=6u32,
                |x, next: Next<u32, Error>| {
                    if x % 2 == 0 {
                        return next.done(x * 10);
                    }
                    spawn_local(async move {
                        yield_now().await;
                        if x == 5 {
                            next.fail(Error::msg("five"))
                        } else {
                            next.done(x * 10)
                        }
                    });
                    Ok(())
                },
                move |outcome| {
                    let _ = tx.send(outcome.map_err(|failed| (failed.to_string(), failed.partial)));
                    Ok(())
                },
            )
            .unwrap();

            assert_eq!(
                rx.await.unwrap(),
                Err(("five".to_string(), vec![10, 20, 30, 40]))
            );
        })
        .await;
}
