use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::advice::{AdviceError, AdviceFetcher, AdviceSource, StaticAdviceSource};

/// Blocks every fetch until the test releases it, counting calls.
struct GatedSource {
    calls: AtomicUsize,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl AdviceSource for GatedSource {
    fn fetch(&self) -> Result<String, AdviceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let gate = self.gate.lock().unwrap();
        gate.recv_timeout(Duration::from_secs(5)).ok();
        Ok(format!("tip #{n}"))
    }
}

struct FailingSource;

impl AdviceSource for FailingSource {
    fn fetch(&self) -> Result<String, AdviceError> {
        Err(AdviceError::Timeout)
    }
}

fn gated() -> (Arc<GatedSource>, mpsc::Sender<()>) {
    let (tx, rx) = mpsc::channel();
    let src = Arc::new(GatedSource {
        calls: AtomicUsize::new(0),
        gate: Mutex::new(rx),
    });
    (src, tx)
}

fn wait_for_result(f: &mut AdviceFetcher) -> String {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(text) = f.poll_result() {
            return text;
        }
        assert!(Instant::now() < deadline, "advice result never arrived");
        thread::sleep(Duration::from_millis(2));
    }
}

fn wait_until_idle(f: &AdviceFetcher) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while f.is_loading() {
        assert!(Instant::now() < deadline, "fetch never finished");
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn rapid_requests_while_loading_make_one_call() {
    let (src, release) = gated();
    let mut f = AdviceFetcher::new(src.clone(), "fallback");

    assert!(f.request_fetch());
    assert!(f.is_loading());
    assert!(!f.request_fetch());
    assert!(!f.request_fetch());
    assert_eq!(f.poll_result(), None);

    release.send(()).unwrap();
    assert_eq!(wait_for_result(&mut f), "tip #1");
    assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.requests_started(), 1);
}

#[test]
fn result_is_delivered_once() {
    let src = Arc::new(StaticAdviceSource::new(["keep the sixes"]));
    let mut f = AdviceFetcher::new(src, "fallback");
    f.request_fetch();
    assert_eq!(wait_for_result(&mut f), "keep the sixes");
    wait_until_idle(&f);
    assert_eq!(f.poll_result(), None);
    assert!(!f.is_loading());
}

#[test]
fn failures_degrade_to_fallback() {
    let mut f = AdviceFetcher::new(Arc::new(FailingSource), "Time to make a move!");
    f.request_fetch();
    assert_eq!(wait_for_result(&mut f), "Time to make a move!");
}

#[test]
fn empty_static_source_uses_fallback() {
    let src = Arc::new(StaticAdviceSource::new(Vec::<String>::new()));
    let mut f = AdviceFetcher::new(src, "fallback");
    f.request_fetch();
    assert_eq!(wait_for_result(&mut f), "fallback");
}

#[test]
fn new_fetch_allowed_after_completion() {
    let (src, release) = gated();
    let mut f = AdviceFetcher::new(src.clone(), "fallback");

    f.request_fetch();
    release.send(()).unwrap();
    assert_eq!(wait_for_result(&mut f), "tip #1");
    wait_until_idle(&f);

    assert!(f.request_fetch());
    release.send(()).unwrap();
    assert_eq!(wait_for_result(&mut f), "tip #2");
    assert_eq!(src.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn static_source_cycles() {
    let src = StaticAdviceSource::new(["a", "b"]);
    assert_eq!(src.fetch().unwrap(), "a");
    assert_eq!(src.fetch().unwrap(), "b");
    assert_eq!(src.fetch().unwrap(), "a");
}

#[test]
fn results_carry_the_id_of_their_request() {
    let src = Arc::new(StaticAdviceSource::new(["one", "two"]));
    let mut f = AdviceFetcher::new(src, "fallback");
    assert_eq!(f.last_request_id(), 0);

    assert!(f.request_fetch());
    assert_eq!(f.last_request_id(), 1);
    wait_until_idle(&f);
    assert_eq!(f.poll_tagged(), Some((1, "one".to_string())));

    assert!(f.request_fetch());
    wait_until_idle(&f);
    assert_eq!(f.poll_tagged(), Some((2, "two".to_string())));
    assert_eq!(f.poll_tagged(), None);
}
