use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread;

use troupe_core::{
    global, log_tagged, render_report, Bard, DebugBard, DebugBardConfig, FanOut, FixedTag,
    MemorySink, Priority, Stanza, Troupe, TroupeError,
};

#[derive(Debug)]
struct Disconnected;

impl fmt::Display for Disconnected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection reset by peer")
    }
}

impl std::error::Error for Disconnected {}

fn debug_bard(sink: &Arc<MemorySink>) -> Arc<DebugBard> {
    Arc::new(
        DebugBard::new()
            .with_caller(FixedTag::new("TroupeTest"))
            .with_sink(sink.clone()),
    )
}

fn troupe_with(sink: &Arc<MemorySink>) -> Troupe {
    let troupe = Troupe::new();
    troupe.register(debug_bard(sink)).unwrap();
    troupe
}

#[test]
fn log_message_callback() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);

    troupe.verbose("Verbose");
    troupe.tag("Custom").verbose("Verbose");
    troupe.debug("Debug");
    troupe.tag("Custom").debug("Debug");
    troupe.info("Info");
    troupe.tag("Custom").info("Info");
    troupe.warn("Warn");
    troupe.tag("Custom").warn("Warn");
    troupe.error("Error");
    troupe.tag("Custom").error("Error");
    troupe.wtf("Assert");
    troupe.tag("Custom").wtf("Assert");

    let lines: Vec<String> = sink
        .records()
        .into_iter()
        .map(|r| format!("{} {} {}", r.priority.value(), r.tag, r.line))
        .collect();
    assert_eq!(
        lines,
        vec![
            "2 TroupeTest Verbose",
            "2 Custom Verbose",
            "3 TroupeTest Debug",
            "3 Custom Debug",
            "4 TroupeTest Info",
            "4 Custom Info",
            "5 TroupeTest Warn",
            "5 Custom Warn",
            "6 TroupeTest Error",
            "6 Custom Error",
            "7 TroupeTest Assert",
            "7 Custom Assert",
        ]
    );
}

#[test]
fn log_at_specified_priority() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);

    for priority in [
        Priority::VERBOSE,
        Priority::DEBUG,
        Priority::INFO,
        Priority::WARN,
        Priority::ERROR,
        Priority::ASSERT,
    ] {
        troupe.log(priority, "Hello, World!");
    }

    let priorities: Vec<_> = sink.records().iter().map(|r| r.priority).collect();
    assert_eq!(
        priorities,
        vec![
            Priority::VERBOSE,
            Priority::DEBUG,
            Priority::INFO,
            Priority::WARN,
            Priority::ERROR,
            Priority::ASSERT,
        ]
    );
}

#[test]
fn tag_is_one_shot() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);

    troupe.tag("X").debug("msg");
    troupe.debug("msg2");

    assert_eq!(sink.tags(), vec!["X", "TroupeTest"]);
}

#[test]
fn tag_is_cleared_when_not_loggable() {
    let sink = Arc::new(MemorySink::new());
    let troupe = Troupe::new();
    let config = DebugBardConfig {
        min_priority: Priority::WARN,
        ..DebugBardConfig::default()
    };
    troupe
        .register(Arc::new(
            DebugBard::with_config(config)
                .with_caller(FixedTag::new("TroupeTest"))
                .with_sink(sink.clone()),
        ))
        .unwrap();

    troupe.tag("NotLogged").info("Message not logged");
    troupe.warn("Message logged");

    assert_eq!(sink.tags(), vec!["TroupeTest"]);
    assert_eq!(sink.lines(), vec!["Message logged"]);
}

#[test]
fn empty_calls_emit_nothing() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);

    troupe.perform(&Stanza::new(Priority::DEBUG, None, None));
    troupe.debug("");

    assert!(sink.is_empty());
}

#[test]
fn error_only_and_error_with_message() {
    let troupe = Troupe::new();
    let sink = Arc::new(MemorySink::new());
    troupe
        .register(Arc::new(
            DebugBard::new()
                .with_caller(FixedTag::new("TroupeTest"))
                .with_sink(sink.clone()),
        ))
        .unwrap();

    troupe.error_of(&Disconnected);
    troupe.error_with(&Disconnected, "Oops");

    assert_eq!(render_report(&Disconnected), "connection reset by peer");
    assert_eq!(
        sink.lines(),
        vec!["connection reset by peer", "Oops", "connection reset by peer"]
    );
}

#[test]
fn error_from_spawned_thread() {
    let sink = Arc::new(MemorySink::new());
    let troupe = Arc::new(troupe_with(&sink));

    let dispatcher = Arc::clone(&troupe);
    thread::spawn(move || {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such host");
        dispatcher.error_with(&err, "OMFG!");
    })
    .join()
    .unwrap();

    assert_eq!(sink.lines(), vec!["OMFG!", "no such host"]);
    assert_eq!(sink.records()[0].priority, Priority::ERROR);
}

#[test]
fn chunk_across_newlines_and_limit() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);

    troupe.debug(&format!(
        "{}\n{}\n{}",
        "a".repeat(3000),
        "b".repeat(6000),
        "c".repeat(3000)
    ));

    assert_eq!(
        sink.lines(),
        vec![
            "a".repeat(3000),
            "b".repeat(4000),
            "b".repeat(2000),
            "c".repeat(3000),
        ]
    );
}

#[test]
fn unregister_missing_fails_and_keeps_registry() {
    let sink = Arc::new(MemorySink::new());
    let troupe = troupe_with(&sink);
    let stranger: Arc<dyn Bard> = debug_bard(&sink);

    let err = troupe.unregister(&stranger).unwrap_err();

    assert_eq!(err, TroupeError::NotRegistered("DebugBard".to_string()));
    assert_eq!(
        err.to_string(),
        "Cannot unregister bard which is not registered: DebugBard"
    );
    assert_eq!(troupe.listener_count(), 1);
}

#[test]
fn isolated_troupe_keeps_delivering() {
    struct Grumpy(troupe_core::TagSlot);

    impl Bard for Grumpy {
        fn tag_slot(&self) -> &troupe_core::TagSlot {
            &self.0
        }

        fn emit(
            &self,
            _priority: Priority,
            _tag: Option<&str>,
            _message: &str,
            _error: Option<&troupe_core::LogError>,
        ) {
            panic!("no audience");
        }
    }

    let sink = Arc::new(MemorySink::new());
    let troupe = Troupe::with_fan_out(FanOut::Isolated);
    troupe
        .register(Arc::new(Grumpy(troupe_core::TagSlot::new())))
        .unwrap();
    troupe.register(debug_bard(&sink)).unwrap();

    troupe.info("the show goes on");

    assert_eq!(sink.lines(), vec!["the show goes on"]);
}

struct Client<'a> {
    troupe: &'a Troupe,
}

impl Client<'_> {
    fn connect(&self) {
        self.troupe.info("connecting");
        let report = |message: &str| self.troupe.info(message);
        report("connected");
    }
}

#[test]
fn derived_tag_names_enclosing_type() {
    if Backtrace::force_capture().status() != BacktraceStatus::Captured {
        return;
    }

    let sink = Arc::new(MemorySink::new());
    let troupe = Troupe::new();
    troupe
        .register(Arc::new(DebugBard::new().with_sink(sink.clone())))
        .unwrap();

    Client { troupe: &troupe }.connect();
    troupe.info("from the test body");

    let tags = sink.tags();
    // Without symbol names every frame is skipped and the fallback is used.
    if tags.iter().all(|tag| tag == DebugBardConfig::default().fallback_tag.as_str()) {
        return;
    }
    assert_eq!(tags, vec!["Client", "Client", "troupe"]);
}

// The only test touching the process-wide troupe.
#[test]
fn global_troupe_round_trip() {
    let troupe = global();
    troupe.unregister_all();

    assert_eq!(
        troupe.register(troupe.as_bard()),
        Err(TroupeError::SelfRegistration)
    );
    assert_eq!(troupe.listener_count(), 0);

    let sink = Arc::new(MemorySink::new());
    let bard: Arc<dyn Bard> = debug_bard(&sink);
    troupe.register(Arc::clone(&bard)).unwrap();

    troupe_core::log(Priority::INFO, "plain");
    log_tagged("Tagged", Priority::WARN, "tagged");
    troupe.as_bard().debug("injected");

    assert_eq!(sink.lines(), vec!["plain", "tagged", "injected"]);
    assert_eq!(sink.tags(), vec!["TroupeTest", "Tagged", "TroupeTest"]);

    troupe.unregister(&bard).unwrap();
    assert_eq!(troupe.listener_count(), 0);
    troupe.unregister_all();
}
