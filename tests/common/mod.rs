#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tiny::config::ContentConfig;
use tiny::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Per-test content root under the system temp dir, removed on drop.
pub struct Scratch {
    pub root: PathBuf,
}

impl Scratch {
    pub fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("tiny-test-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn file(&self, rel: &str, contents: &[u8], mode: u32) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn content(&self) -> ContentConfig {
        ContentConfig {
            root: self.root.clone(),
            ..ContentConfig::default()
        }
    }

    /// The path the server resolves `target` to.
    pub fn resolved(&self, target: &str) -> String {
        format!("{}{}", self.root.display(), target)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Runs one transaction over an in-memory connection and returns every byte
/// the client received.
pub async fn transact(request: &[u8], content: ContentConfig) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    client.write_all(request).await.unwrap();
    client.shutdown().await.unwrap();

    let server_side = async move {
        let mut conn = Connection::new(server, "Tiny Web Server", content);
        let res = conn.run().await;
        drop(conn);
        res
    };

    let mut out = Vec::new();
    let (res, read) = tokio::join!(server_side, client.read_to_end(&mut out));
    res.unwrap();
    read.unwrap();
    out
}

pub struct Reply {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

pub fn split_reply(raw: &[u8]) -> Reply {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = std::str::from_utf8(&raw[..end]).unwrap();
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let headers = lines
        .map(|l| {
            let (k, v) = l.split_once(':').unwrap();
            (k.trim().to_string(), v.trim().to_string())
        })
        .collect();
    Reply {
        status_line,
        headers,
        body: raw[end + 4..].to_vec(),
    }
}

pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}
