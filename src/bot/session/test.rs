use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use crate::bot::bridge::Observer;
use crate::bot::command::WaitOutcome;
use crate::bot::error::observer::ObserverError;
use crate::model::log::LogRecord;
use crate::model::session::SessionStatus;

use super::fake::{FakeConnector, Handshake, GENERAL, RATE_LIMITED, TOKEN};
use super::*;

#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl Observer for Journal {
    fn name(&self) -> &str {
        "journal"
    }

    fn receive(&self, record: &LogRecord) -> Result<(), ObserverError> {
        self.0.lock().unwrap().push(record.message.clone());
        Ok(())
    }
}

struct Harness {
    manager: SessionManager,
    connector: Arc<FakeConnector>,
    journal: Arc<Journal>,
}

fn harness(handshake: Handshake, log_channel: Option<u64>) -> Harness {
    let connector = FakeConnector::new(handshake);
    let journal = Arc::new(Journal::default());
    let bridge = Arc::new(EventBridge::new());
    bridge.subscribe(journal.clone());

    let manager = SessionManager::spawn(
        connector.clone(),
        Arc::new(CommandRegistry::new("!")),
        bridge,
        Duration::from_secs(5),
        log_channel,
    )
    .unwrap();

    Harness {
        manager,
        connector,
        journal,
    }
}

fn credential() -> Option<Credential> {
    Credential::parse(TOKEN)
}

fn eventually(what: &str, check: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !check() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(10));
    }
}

fn status(manager: &SessionManager) -> SessionStatus {
    manager.snapshot().unwrap().status
}

fn connect(harness: &Harness) {
    harness.manager.start(credential()).unwrap();
    eventually("connection", || {
        status(&harness.manager) == SessionStatus::Connected
    });
}

mod start {
    use super::*;

    /// Tests starting without a usable token.
    ///
    /// Expected: InvalidCredential and still disconnected
    #[test]
    fn rejects_missing_or_malformed_credential() {
        let h = harness(Handshake::Accept, None);

        assert_eq!(h.manager.start(None), Err(SessionError::InvalidCredential));
        assert_eq!(
            h.manager.start(Credential::parse("not-a-token")),
            Err(SessionError::InvalidCredential)
        );
        assert_eq!(status(&h.manager), SessionStatus::Disconnected);
    }

    /// Tests a successful handshake.
    ///
    /// Expected: Connected with servers and online presence
    #[test]
    fn connects_and_goes_online() {
        let h = harness(Handshake::Accept, None);

        connect(&h);

        let snapshot = h.manager.snapshot().unwrap();
        assert_eq!(snapshot.server_count, 2);
        assert_eq!(snapshot.presence, Some(Presence::Online));
        assert!(snapshot.connected_since.is_some());
        assert_eq!(
            h.connector.link.presences.lock().unwrap().as_slice(),
            &[(Presence::Online, Some(ONLINE_ACTIVITY.to_string()))]
        );
    }

    /// Tests starting twice.
    ///
    /// Expected: AlreadyRunning and the first session stays connected
    #[test]
    fn double_start_is_rejected() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        assert_eq!(
            h.manager.start(credential()),
            Err(SessionError::AlreadyRunning)
        );
        assert_eq!(status(&h.manager), SessionStatus::Connected);
        assert_eq!(h.manager.list_servers().len(), 2);
    }

    /// Tests a handshake Discord rejects.
    ///
    /// Expected: Failed status, failure published, and a new start is allowed
    #[test]
    fn rejected_handshake_fails_session() {
        let h = harness(Handshake::Reject, None);

        h.manager.start(credential()).unwrap();
        eventually("failure", || {
            matches!(status(&h.manager), SessionStatus::Failed(_))
        });

        assert!(h
            .journal
            .0
            .lock()
            .unwrap()
            .iter()
            .any(|line| line.starts_with("Connection failed")));
        assert_eq!(h.manager.start(credential()), Ok(()));
    }

    /// Tests the connected announcement.
    ///
    /// Expected: lifecycle published in order and announced in the log channel
    #[test]
    fn announces_connection() {
        let h = harness(Handshake::Accept, Some(GENERAL));
        connect(&h);

        eventually("announcement", || !h.connector.link.said().is_empty());
        assert_eq!(
            h.connector.link.said(),
            vec![(GENERAL, "Department 14 has connected to Discord!".to_string())]
        );

        h.manager.stop().unwrap();
        assert_eq!(
            h.journal.0.lock().unwrap().as_slice(),
            &[
                "Connecting to Discord...".to_string(),
                "Department 14 has connected to Discord! (3 servers)".to_string(),
                "Disconnected from Discord.".to_string(),
            ]
        );
    }

    /// Tests a server list that arrives before the handshake is processed.
    ///
    /// Expected: the list is kept and the announcement counts every guild
    #[test]
    fn ready_keeps_earlier_server_list() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        let names: Vec<String> = h
            .manager
            .list_servers()
            .into_iter()
            .map(|server| server.name)
            .collect();
        assert_eq!(names, vec!["Tavern".to_string(), "Guild Hall".to_string()]);
        assert!(h
            .journal
            .0
            .lock()
            .unwrap()
            .contains(&"Department 14 has connected to Discord! (3 servers)".to_string()));
    }
}

mod stop {
    use super::*;

    /// Tests stopping while disconnected.
    ///
    /// Expected: NotRunning and no state change
    #[test]
    fn stop_when_disconnected_is_not_running() {
        let h = harness(Handshake::Accept, None);

        assert_eq!(h.manager.stop(), Err(SessionError::NotRunning));
        assert_eq!(status(&h.manager), SessionStatus::Disconnected);
        assert!(h.journal.0.lock().unwrap().is_empty());
    }

    /// Tests stopping a connected session.
    ///
    /// Expected: Disconnected with cleared servers
    #[test]
    fn stop_disconnects() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        h.manager.stop().unwrap();

        let snapshot = h.manager.snapshot().unwrap();
        assert_eq!(snapshot.status, SessionStatus::Disconnected);
        assert_eq!(snapshot.presence, None);
        assert!(h.manager.list_servers().is_empty());
    }

    /// Tests that stopping cancels commands parked on the session.
    ///
    /// Expected: the parked wait resolves as Cancelled
    #[test]
    fn stop_cancels_suspended_commands() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        let suspensions = h.connector.suspensions();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let parked = {
            let suspensions = suspensions.clone();
            runtime.spawn(async move { suspensions.sleep(Duration::from_secs(3600)).await })
        };
        eventually("parked command", || suspensions.parked() == 1);

        h.manager.stop().unwrap();

        assert_eq!(runtime.block_on(parked).unwrap(), WaitOutcome::Cancelled);
    }
}

mod controls {
    use super::*;

    /// Tests presence changes across the lifecycle.
    ///
    /// Expected: NotRunning while disconnected, applied while connected
    #[test]
    fn presence_requires_connection() {
        let h = harness(Handshake::Accept, None);
        assert_eq!(
            h.manager.set_presence(Presence::Idle),
            Err(SessionError::NotRunning)
        );

        connect(&h);
        h.manager.set_presence(Presence::Idle).unwrap();
        h.manager.set_presence(Presence::Idle).unwrap();

        assert_eq!(
            h.manager.snapshot().unwrap().presence,
            Some(Presence::Idle)
        );
        let presences = h.connector.link.presences.lock().unwrap().clone();
        assert_eq!(presences.last(), Some(&(Presence::Idle, None)));
    }

    /// Tests setting the operating channel.
    ///
    /// Expected: stored and announced in the channel
    #[test]
    fn sets_operating_channel() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        h.manager
            .set_operating_channel(&GENERAL.to_string())
            .unwrap();

        assert_eq!(
            h.manager.snapshot().unwrap().operating_channel,
            Some(GENERAL)
        );
        eventually("channel announcement", || !h.connector.link.said().is_empty());
        assert_eq!(
            h.connector.link.said(),
            vec![(GENERAL, "Bot has entered the channel.".to_string())]
        );
    }

    /// Tests a malformed channel id after a valid one was set.
    ///
    /// Expected: InvalidChannelId and the configured channel unchanged
    #[test]
    fn malformed_channel_id_changes_nothing() {
        let h = harness(Handshake::Accept, None);
        connect(&h);
        h.manager
            .set_operating_channel(&GENERAL.to_string())
            .unwrap();

        let result = h.manager.set_operating_channel("not-a-number");

        assert_eq!(
            result,
            Err(SessionError::InvalidChannelId("not-a-number".to_string()))
        );
        assert_eq!(
            h.manager.snapshot().unwrap().operating_channel,
            Some(GENERAL)
        );
    }

    /// Tests a channel the bot cannot see.
    ///
    /// Expected: ChannelNotFound
    #[test]
    fn unknown_channel_is_not_found() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        assert_eq!(
            h.manager.set_operating_channel("999"),
            Err(SessionError::ChannelNotFound(999))
        );
        assert_eq!(h.manager.snapshot().unwrap().operating_channel, None);
    }

    /// Tests the log channel while disconnected.
    ///
    /// Expected: stored, cleared by blank input, malformed ids rejected
    #[test]
    fn log_channel_is_configurable_offline() {
        let h = harness(Handshake::Accept, None);

        h.manager.set_log_channel(Some("<#111>")).unwrap();
        assert_eq!(h.manager.snapshot().unwrap().log_channel, Some(111));

        assert_eq!(
            h.manager.set_log_channel(Some("abc")),
            Err(SessionError::InvalidChannelId("abc".to_string()))
        );
        assert_eq!(h.manager.snapshot().unwrap().log_channel, Some(111));

        h.manager.set_log_channel(Some("  ")).unwrap();
        assert_eq!(h.manager.snapshot().unwrap().log_channel, None);
    }

    /// Tests online member lookup.
    ///
    /// Expected: names, ChannelNotFound, and recoverable RateLimited
    #[test]
    fn lists_online_members() {
        let h = harness(Handshake::Accept, None);
        assert_eq!(
            h.manager.list_online_members(&GENERAL.to_string()),
            Err(SessionError::NotRunning)
        );
        connect(&h);

        assert_eq!(
            h.manager.list_online_members(&GENERAL.to_string()),
            Ok(vec!["alice".to_string(), "bob".to_string()])
        );
        assert_eq!(
            h.manager.list_online_members("999"),
            Err(SessionError::ChannelNotFound(999))
        );

        let limited = h
            .manager
            .list_online_members(&RATE_LIMITED.to_string())
            .unwrap_err();
        assert!(limited.is_recoverable());
    }

    /// Tests polling a long request without blocking.
    ///
    /// Expected: the result eventually arrives through try_take
    #[test]
    fn online_members_can_be_polled() {
        let h = harness(Handshake::Accept, None);
        connect(&h);

        let mut pending = h.manager.request_online_members(&GENERAL.to_string());
        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(result) = pending.try_take() {
                break result;
            }
            assert!(Instant::now() < deadline, "timed out waiting for member list");
            thread::sleep(Duration::from_millis(10));
        };

        assert_eq!(result, Ok(vec!["alice".to_string(), "bob".to_string()]));
    }
}
