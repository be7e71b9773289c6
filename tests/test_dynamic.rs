//! Transactions that run programs. They share one lock so that no program
//! is written while another test is forking.

mod common;

use common::{Scratch, split_reply, transact};
use tiny::content::cgi::run_dynamic_handler;
use tokio::sync::Mutex;

static SPAWN_LOCK: Mutex<()> = Mutex::const_new(());

const ADDER: &[u8] = b"#!/bin/sh
a=${QUERY_STRING%%&*}
b=${QUERY_STRING#*&}
body=\"The answer is: $a + $b = $((a + b))\"
printf 'Connection: close\\r\\n'
printf 'Content-length: %d\\r\\n' ${#body}
printf 'Content-type: text/html\\r\\n\\r\\n'
printf '%s' \"$body\"
";

const ECHO_QUERY: &[u8] = b"#!/bin/sh
printf '\\r\\n[%s]' \"$QUERY_STRING\"
";

#[tokio::test]
async fn test_adder_end_to_end() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-adder");
    scratch.file("cgi-bin/adder", ADDER, 0o755);

    let raw = transact(b"GET /cgi-bin/adder?1&2 HTTP/1.0\r\n\r\n", scratch.content()).await;

    assert_eq!(
        String::from_utf8(raw).unwrap(),
        "HTTP/1.0 200 OK\r\n\
         Server: Tiny Web Server\r\n\
         Connection: close\r\n\
         Content-length: 24\r\n\
         Content-type: text/html\r\n\r\n\
         The answer is: 1 + 2 = 3"
    );
}

#[tokio::test]
async fn test_program_output_follows_preamble() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-echo");
    scratch.file("cgi-bin/echo", ECHO_QUERY, 0o755);

    let raw = transact(
        b"GET /cgi-bin/echo?name=tiny&x=1 HTTP/1.0\r\nHost: a\r\n\r\n",
        scratch.content(),
    )
    .await;
    let reply = split_reply(&raw);

    assert_eq!(reply.status_line, "HTTP/1.0 200 OK");
    assert_eq!(reply.headers, vec![("Server".to_string(), "Tiny Web Server".to_string())]);
    assert_eq!(reply.body, b"[name=tiny&x=1]");
}

#[tokio::test]
async fn test_missing_query_is_empty() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-noquery");
    scratch.file("cgi-bin/echo", ECHO_QUERY, 0o755);

    let raw = transact(b"GET /cgi-bin/echo HTTP/1.0\r\n\r\n", scratch.content()).await;
    assert_eq!(split_reply(&raw).body, b"[]");
}

#[tokio::test]
async fn test_failing_program_still_completes() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-fail");
    scratch.file("cgi-bin/fail", b"#!/bin/sh\nprintf 'partial'\nexit 3\n", 0o755);

    let raw = transact(b"GET /cgi-bin/fail HTTP/1.0\r\n\r\n", scratch.content()).await;

    assert_eq!(raw, b"HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\npartial");
}

#[tokio::test]
async fn test_unrunnable_program_sends_only_preamble() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-badexec");
    scratch.file("cgi-bin/broken", b"#!/nonexistent/interpreter\n", 0o755);

    let raw = transact(b"GET /cgi-bin/broken HTTP/1.0\r\n\r\n", scratch.content()).await;

    assert_eq!(raw, b"HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\n");
}

#[tokio::test]
async fn test_query_not_leaked_into_server_env() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-env");
    let program = scratch.file("cgi-bin/echo", ECHO_QUERY, 0o755);

    let mut out = Vec::new();
    let status = run_dynamic_handler(&program, "QUERY_STRING", "secret", &mut out)
        .await
        .unwrap();

    assert!(status.success());
    assert_eq!(out, b"\r\n[secret]");
    assert_ne!(std::env::var("QUERY_STRING").ok().as_deref(), Some("secret"));
}

#[tokio::test]
async fn test_custom_query_binding() {
    let _guard = SPAWN_LOCK.lock().await;
    let scratch = Scratch::new("dyn-binding");
    let program = scratch.file("cgi-bin/args", b"#!/bin/sh\nprintf '%s' \"$ARGS\"\n", 0o755);

    let mut out = Vec::new();
    run_dynamic_handler(&program, "ARGS", "1&2", &mut out)
        .await
        .unwrap();

    assert_eq!(out, b"1&2");
}
