use std::time::{Duration, Instant};

use super::session::BrowserSession;
use super::types::{AcquisitionConfig, DismissalOutcome};
use super::{poll_interval, settle};

/// Best-effort consent dismissal.
///
/// Polls for a clickable element matching one of the configured consent
/// patterns for at most `consent_wait_timeout_ms`. Clicks the first match and
/// pauses `consent_settle_ms` for the modal to close. Every outcome is
/// returned as data; none of them should stop the scrape.
pub async fn dismiss_consent(
    session: &mut dyn BrowserSession,
    config: &AcquisitionConfig,
) -> DismissalOutcome {
    if config.consent_text_patterns.is_empty() {
        return DismissalOutcome::NotFound;
    }

    let timeout = Duration::from_millis(config.consent_wait_timeout_ms);
    let interval = poll_interval(config);
    let start = Instant::now();

    loop {
        match session
            .click_first_matching(&config.consent_text_patterns)
            .await
        {
            Ok(Some(pattern)) => {
                settle(config.consent_settle_ms).await;
                return DismissalOutcome::Clicked { pattern };
            }
            Ok(None) => {}
            Err(e) => return DismissalOutcome::ClickFailed(e.to_string()),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return DismissalOutcome::NotFound;
        }
        tokio::time::sleep(interval.min(timeout - elapsed)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{quick_config, Fault, FakeLauncher};
    use crate::tools::acquire::SessionLauncher;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn gives_up_quietly_when_no_button() {
        let launcher = FakeLauncher::new(Fault::None);
        let config = quick_config();
        let mut session = launcher.launch(&config).await.unwrap();

        let outcome = dismiss_consent(session.as_mut(), &config).await;
        assert_eq!(outcome, DismissalOutcome::NotFound);
        assert!(launcher.counters.consent_polls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn first_pattern_in_order_wins() {
        let launcher = FakeLauncher::new(Fault::None).with_consent_button("I agree, Accept");
        let config = quick_config();
        let mut session = launcher.launch(&config).await.unwrap();

        let outcome = dismiss_consent(session.as_mut(), &config).await;
        assert_eq!(
            outcome,
            DismissalOutcome::Clicked {
                pattern: "I agree".into()
            }
        );
        assert_eq!(launcher.counters.consent_polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn patterns_are_case_sensitive() {
        let launcher = FakeLauncher::new(Fault::None).with_consent_button("ACCEPT ALL");
        let config = quick_config();
        let mut session = launcher.launch(&config).await.unwrap();

        assert_eq!(
            dismiss_consent(session.as_mut(), &config).await,
            DismissalOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn click_error_is_reported_not_raised() {
        let launcher = FakeLauncher::new(Fault::Consent);
        let config = quick_config();
        let mut session = launcher.launch(&config).await.unwrap();

        match dismiss_consent(session.as_mut(), &config).await {
            DismissalOutcome::ClickFailed(reason) => assert!(reason.contains("consent click")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn settle_pause_follows_a_click_only() {
        let config = quick_config().with_settle_ms(2_000, 0);

        let launcher = FakeLauncher::new(Fault::None);
        let mut session = launcher.launch(&config).await.unwrap();
        let start = Instant::now();
        assert_eq!(
            dismiss_consent(session.as_mut(), &config).await,
            DismissalOutcome::NotFound
        );
        assert!(start.elapsed() < Duration::from_millis(1_000));

        let launcher = FakeLauncher::new(Fault::Consent);
        let mut session = launcher.launch(&config).await.unwrap();
        let start = Instant::now();
        assert!(matches!(
            dismiss_consent(session.as_mut(), &config).await,
            DismissalOutcome::ClickFailed(_)
        ));
        assert!(start.elapsed() < Duration::from_millis(1_000));

        let config = quick_config().with_settle_ms(60, 0);
        let launcher = FakeLauncher::new(Fault::None).with_consent_button("Accept all");
        let mut session = launcher.launch(&config).await.unwrap();
        let start = Instant::now();
        assert!(matches!(
            dismiss_consent(session.as_mut(), &config).await,
            DismissalOutcome::Clicked { .. }
        ));
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn no_patterns_means_nothing_to_look_for() {
        let launcher = FakeLauncher::new(Fault::None).with_consent_button("Accept");
        let config = quick_config().with_consent_text_patterns(Vec::<String>::new());
        let mut session = launcher.launch(&config).await.unwrap();

        assert_eq!(
            dismiss_consent(session.as_mut(), &config).await,
            DismissalOutcome::NotFound
        );
        assert_eq!(launcher.counters.consent_polls.load(Ordering::SeqCst), 0);
    }
}
