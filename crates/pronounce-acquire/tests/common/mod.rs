//! Shared fixtures for pipeline integration tests: a tiny static HTTP server
//! and a scripted browser that never touches a real page.

#![allow(dead_code)]

use async_trait::async_trait;
use pronounce_acquire::{Browser, BrowserSession};
use pronounce_model::PronounceError;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Path → (status, body).
pub type Routes = HashMap<String, (u16, Vec<u8>)>;

/// Serve `routes` from a background thread. Unknown paths get 404.
/// Returns the base URL without a trailing slash, e.g. `http://127.0.0.1:40123`.
pub fn start_server(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn handle(mut stream: TcpStream, routes: &Routes) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, b"not found".to_vec()));
    let reason = if status == 200 { "OK" } else { "Error" };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}

pub fn html_route(html: &str) -> (u16, Vec<u8>) {
    (200, html.as_bytes().to_vec())
}

/// Browser double: pages are keyed by the word in the URL path; a known word
/// has the requested section and one playback control pointing at the
/// stored target.
#[derive(Default)]
pub struct ScriptedBrowser {
    pub targets: HashMap<String, String>,
    pub launches: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl ScriptedBrowser {
    pub fn with_target(mut self, word: &str, target: &str) -> Self {
        self.targets.insert(word.to_string(), target.to_string());
        self
    }

    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::clone(&self.launches), Arc::clone(&self.closes))
    }
}

pub struct ScriptedSession {
    targets: HashMap<String, String>,
    closes: Arc<AtomicUsize>,
    current: Option<String>,
}

#[async_trait]
impl Browser for ScriptedBrowser {
    type Session = ScriptedSession;

    async fn launch(&self) -> Result<ScriptedSession, PronounceError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSession {
            targets: self.targets.clone(),
            closes: Arc::clone(&self.closes),
            current: None,
        })
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    type Element = ();

    async fn navigate(&mut self, url: &str) -> Result<(), PronounceError> {
        let path = url.split('#').next().unwrap_or_default();
        let word = path.rsplit('/').next().unwrap_or_default();
        self.current = self.targets.get(word).cloned();
        Ok(())
    }

    async fn find_by_id(&mut self, _id: &str, _timeout: Duration) -> Result<Option<()>, PronounceError> {
        Ok(self.current.as_ref().map(|_| ()))
    }

    async fn find_all(&mut self, _selector: &str, _timeout: Duration) -> Result<Vec<()>, PronounceError> {
        Ok(self.current.iter().map(|_| ()).collect())
    }

    async fn scroll_into_view(&mut self, _element: &()) -> Result<(), PronounceError> {
        Ok(())
    }

    async fn property(&mut self, _element: &(), _name: &str) -> Result<Option<String>, PronounceError> {
        Ok(self.current.clone())
    }

    async fn close(self) -> Result<(), PronounceError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
