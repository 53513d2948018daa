// ── Output poller ──
//
// Checks a debug session for output on a fixed cadence until the collector
// produces something, a request fails, the overall timeout elapses, or the
// caller cancels. Each check is awaited before the next tick is taken, so
// requests never overlap and a slow response pushes the schedule back.
// A request still in flight is abandoned on cancel or timeout.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::backend::ScriptBackend;
use crate::error::CoreError;
use crate::model::{ExecutionSession, PollResult};
use crate::settings::Settings;

pub struct OutputPoller<'a, B> {
    backend: &'a B,
    interval: Duration,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl<'a, B: ScriptBackend> OutputPoller<'a, B> {
    pub fn new(backend: &'a B, settings: &Settings) -> Self {
        Self {
            backend,
            interval: settings.poll_interval,
            timeout: settings.poll_timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop polling with [`CoreError::Cancelled`] once `token` fires.
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Poll until a terminal result. Never returns [`PollResult::Pending`].
    #[instrument(skip(self), fields(session = %session.session_id))]
    pub async fn poll(&self, session: &ExecutionSession) -> PollResult {
        let mut interval = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let timeout = self.timeout;
        let deadline = async move {
            match timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);

        let mut ticks: u32 = 0;
        loop {
            let result = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!(ticks, "poll cancelled");
                    return PollResult::Failed(CoreError::Cancelled);
                }
                () = &mut deadline => {
                    let seconds = timeout.map_or(0, |t| t.as_secs());
                    warn!(ticks, seconds, "poll timed out");
                    return PollResult::Failed(CoreError::Timeout { seconds });
                }
                result = async {
                    interval.tick().await;
                    self.check(session).await
                } => result,
            };

            ticks += 1;
            if result.is_terminal() {
                debug!(ticks, "poll finished");
                return result;
            }
        }
    }

    /// Issue a single output request.
    pub async fn check(&self, session: &ExecutionSession) -> PollResult {
        match self
            .backend
            .get_debug_output(&session.session_id, &session.collector_id)
            .await
        {
            Ok(out) => match out.ready() {
                Some(text) => PollResult::Ready(text.to_owned()),
                None => PollResult::Pending,
            },
            Err(err) => PollResult::Failed(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{ScriptedBackend, output};

    fn session() -> ExecutionSession {
        ExecutionSession {
            session_id: "s-1".into(),
            collector_id: "7".into(),
            target_device_id: "42".into(),
        }
    }

    fn settings(timeout: Option<Duration>) -> Settings {
        Settings {
            poll_interval: Duration::from_secs(2),
            poll_timeout: timeout,
            ..Settings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ready_after_blank_outputs() {
        let backend = ScriptedBackend::new().with_outputs([output(""), output("  \n"), output("done")]);
        let poller = OutputPoller::new(&backend, &settings(None));
        let started = Instant::now();

        let result = poller.poll(&session()).await;

        assert_eq!(result.into_output().unwrap(), "done");
        assert_eq!(backend.output_calls(), 3);
        assert!(started.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn first_request_waits_one_interval() {
        let backend = ScriptedBackend::new().with_outputs([output("done")]);
        let poller = OutputPoller::new(&backend, &settings(None));
        let started = Instant::now();

        poller.poll(&session()).await.into_output().unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(backend.output_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn request_failure_ends_poll() {
        let backend = ScriptedBackend::new().with_outputs([
            output(""),
            Err(CoreError::Network {
                reason: "connection reset".into(),
            }),
            output("never"),
        ]);
        let poller = OutputPoller::new(&backend, &settings(None));

        let result = poller.poll(&session()).await;

        assert!(matches!(result, PollResult::Failed(CoreError::Network { .. })));
        assert_eq!(backend.output_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_at_timeout() {
        let backend = ScriptedBackend::new();
        let poller = OutputPoller::new(&backend, &settings(Some(Duration::from_secs(7))));

        let result = poller.poll(&session()).await;

        assert!(matches!(
            result,
            PollResult::Failed(CoreError::Timeout { seconds: 7 })
        ));
        assert_eq!(backend.output_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_stops_before_any_request() {
        let backend = ScriptedBackend::new();
        let token = CancellationToken::new();
        token.cancel();
        let poller = OutputPoller::new(&backend, &settings(None)).with_cancel(token);

        let result = poller.poll(&session()).await;

        assert!(matches!(result, PollResult::Failed(CoreError::Cancelled)));
        assert_eq!(backend.output_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_poll() {
        let backend = ScriptedBackend::new();
        let token = CancellationToken::new();
        let poller = OutputPoller::new(&backend, &settings(None)).with_cancel(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            token.cancel();
        });
        let result = poller.poll(&session()).await;
        canceller.await.unwrap();

        assert!(matches!(result, PollResult::Failed(CoreError::Cancelled)));
        assert_eq!(backend.output_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_interrupts_stalled_request() {
        let backend = ScriptedBackend::new().with_stalled_outputs();
        let poller = OutputPoller::new(&backend, &settings(Some(Duration::from_secs(7))));
        let started = Instant::now();

        let result = poller.poll(&session()).await;

        assert!(matches!(
            result,
            PollResult::Failed(CoreError::Timeout { seconds: 7 })
        ));
        assert_eq!(backend.output_calls(), 1);
        assert!(started.elapsed() < Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_stalled_request() {
        let backend = ScriptedBackend::new().with_stalled_outputs();
        let token = CancellationToken::new();
        let poller = OutputPoller::new(&backend, &settings(None)).with_cancel(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            token.cancel();
        });
        let started = Instant::now();
        let result = poller.poll(&session()).await;
        canceller.await.unwrap();

        assert!(matches!(result, PollResult::Failed(CoreError::Cancelled)));
        assert_eq!(backend.output_calls(), 1);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn single_check_maps_output() {
        let backend = ScriptedBackend::new().with_outputs([output(" "), output("ok")]);
        let poller = OutputPoller::new(&backend, &settings(None));

        assert!(matches!(poller.check(&session()).await, PollResult::Pending));
        assert!(matches!(poller.check(&session()).await, PollResult::Ready(ref s) if s == "ok"));
    }
}
