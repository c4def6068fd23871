use std::io::{self, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use trivia_board::config::Settings;
use trivia_board::loader::{self, LoadEvent};
use trivia_board::report;

fn unreachable_settings() -> Settings {
    // Port 1 on loopback refuses connections.
    Settings {
        api_url: "http://127.0.0.1:1/api".to_string(),
        request_timeout_secs: 2,
        ..Settings::default()
    }
}

#[test]
fn test_load_blocking_reports_refused_connection() {
    let err = loader::load_blocking(&unreachable_settings()).unwrap_err();
    assert!(
        err.contains("127.0.0.1:1/api/categories?count=100"),
        "unexpected message: {}",
        err
    );
}

#[test]
fn test_spawn_load_sends_failure_with_generation() {
    let (tx, rx) = mpsc::channel();
    loader::spawn_load(unreachable_settings(), 7, tx);

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        LoadEvent::Failed { generation, error } => {
            assert_eq!(generation, 7);
            assert!(!error.is_empty());
        }
        other => panic!("Expected Failed, got {:?}", other),
    }
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_print_load_failure_is_logged() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        report::load_board_text(&unreachable_settings())
    });

    assert!(result.is_err());
    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("ERROR"), "log was: {}", text);
    assert!(text.contains("Board failed to load"), "log was: {}", text);
}
