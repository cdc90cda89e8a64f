// progress/scheduler.rs
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    Cancelled,
}

/// Drives `total` steps to completion, one `dwell` per step.
///
/// The timer for step `i + 1` is only armed after step `i` has been reported,
/// so completions arrive strictly in index order. Once `token` is cancelled no
/// further callback runs.
pub async fn run_steps<F>(
    total: usize,
    dwell: Duration,
    token: CancellationToken,
    mut on_complete: F,
) -> RunOutcome
where
    F: FnMut(usize),
{
    for index in 0..total {
        tokio::select! {
            biased;
            _ = token.cancelled() => return RunOutcome::Cancelled,
            _ = time::sleep(dwell) => {}
        }
        if token.is_cancelled() {
            return RunOutcome::Cancelled;
        }
        on_complete(index);
    }
    RunOutcome::Finished
}

/// Calls `on_tick` every `cadence` until `token` is cancelled.
pub async fn run_spinner<F>(cadence: Duration, token: CancellationToken, mut on_tick: F)
where
    F: FnMut(),
{
    let mut interval = time::interval_at(Instant::now() + cadence, cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return,
            _ = interval.tick() => on_tick(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const DWELL: Duration = Duration::from_millis(1000);
    const CADENCE: Duration = Duration::from_millis(100);

    fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = rx.try_recv() {
            items.push(item);
        }
        items
    }

    #[tokio::test(start_paused = true)]
    async fn completes_steps_in_order_one_dwell_apart() {
        let start = Instant::now();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let outcome = run_steps(3, DWELL, token, move |index| {
            let _ = tx.send((index, start.elapsed()));
        })
        .await;

        assert_eq!(outcome, RunOutcome::Finished);
        let events = drain(&mut rx);
        assert_eq!(
            events.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        for (index, elapsed) in events {
            let expected = DWELL * (index as u32 + 1);
            assert!(elapsed >= expected && elapsed < expected + Duration::from_millis(50));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_completes_before_first_dwell() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task = tokio::spawn(run_steps(2, DWELL, token.clone(), move |index| {
            let _ = tx.send(index);
        }));

        time::sleep(Duration::from_millis(900)).await;
        assert!(drain(&mut rx).is_empty());

        time::sleep(Duration::from_millis(200)).await;
        assert_eq!(drain(&mut rx), vec![0]);

        token.cancel();
        assert_eq!(task.await.unwrap(), RunOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_further_completions() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task = tokio::spawn(run_steps(5, DWELL, token.clone(), move |index| {
            let _ = tx.send(index);
        }));

        time::sleep(Duration::from_millis(2500)).await;
        token.cancel();
        assert_eq!(task.await.unwrap(), RunOutcome::Cancelled);
        assert_eq!(drain(&mut rx), vec![0, 1]);

        time::sleep(Duration::from_secs(10)).await;
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_token_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let mut calls = 0;
        let outcome = run_steps(3, DWELL, token, |_| calls += 1).await;
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spinner_ticks_on_cadence_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task = tokio::spawn(run_spinner(CADENCE, token.clone(), move || {
            let _ = tx.send(());
        }));

        time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(drain(&mut rx).len(), 10);

        token.cancel();
        task.await.unwrap();
        time::sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
