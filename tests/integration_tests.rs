//! Integration tests for telnetrust
//!
//! Sessions run against scripted in-memory streams: `tokio_test` mocks
//! assert the exact bytes the client writes, and `tokio::io::duplex` pairs
//! cover timeout and EOF behavior.

use std::time::Duration;

use regex::bytes::Regex;
use telnetrust::{SessionBuilder, TelnetError};
use tokio::io::AsyncWriteExt;
use tokio_test::io::Builder;

fn builder() -> SessionBuilder {
    SessionBuilder::new().login("admin").password("secret")
}

#[tokio::test]
async fn handshake_submits_credentials_in_order() {
    let stream = Builder::new()
        .read(b"\n\rlocalhost login: ")
        .write(b"admin\r\n")
        .read(b"\n\rPassword: ")
        .write(b"secret\r\n")
        .read(b"\n\radmin@localhost:~$ ")
        .build();

    builder().attach(stream).await.expect("handshake failed");
}

#[tokio::test]
async fn handshake_without_login_prompt() {
    // A remote that drops straight into a shell asks for nothing.
    let stream = Builder::new().read(b"\n\radmin@localhost:~$ ").build();

    builder().attach(stream).await.expect("handshake failed");
}

#[tokio::test]
async fn execute_returns_stripped_command_output() {
    let stream = Builder::new()
        .read(b"\n\radmin@localhost:~$ ")
        .write(b"ls -l\r\n")
        .read(b"\n\rfile1\nfile2\n\radmin@localhost:~$ ")
        .build();

    let mut session = builder().attach(stream).await.unwrap();
    let output = session.execute("ls", &["-l"]).await.unwrap();

    assert_eq!(output, b"file1\nfile2");
}

#[tokio::test]
async fn execute_handles_fragmented_output() {
    // Output arrives in arbitrary chunks; the prompt itself is split.
    let stream = Builder::new()
        .read(b"\n\radmin@localhost:~$ ")
        .write(b"cat notes\r\n")
        .read(b"\n\rline one\nline ")
        .read(b"two\n\radmin@local")
        .read(b"host:~$ ")
        .build();

    let mut session = builder().attach(stream).await.unwrap();
    let output = session.execute("cat", &["notes"]).await.unwrap();

    assert_eq!(output, b"line one\nline two");
}

#[tokio::test]
async fn control_sequences_are_invisible_to_prompt_detection() {
    let stream = Builder::new()
        // IAC DO ECHO, IAC WILL SGA, then a subnegotiation block.
        .read(&[255, 253, 1, 255, 251, 3])
        .read(&[255, 250, 24, 0, 255, 240])
        .read(b"\n\rlocalhost login: ")
        .write(b"admin\r\n")
        .read(b"\n\rPassword: ")
        .write(b"secret\r\n")
        .read(b"\n\radmin@localhost:~$ ")
        .build();

    builder().attach(stream).await.expect("handshake failed");
}

#[tokio::test]
async fn custom_shell_prompt_and_delimiter() {
    let stream = Builder::new()
        .read(b"router# \n")
        .write(b"show version\r\n")
        .read(b"IOS 15.2\n\rrouter# \n")
        .build();

    let mut session = builder()
        .delimiter(b'\n')
        .shell_prompt(Regex::new("router# ").unwrap())
        .attach(stream)
        .await
        .unwrap();

    let output = session.execute("show", &["version"]).await.unwrap();
    assert_eq!(output, b"IOS 15.2");
}

#[tokio::test]
async fn attach_times_out_when_no_banner_arrives() {
    let (client, _server) = tokio::io::duplex(64);

    let result = builder()
        .read_timeout(Duration::from_millis(50))
        .attach(client)
        .await;

    match result {
        Err(TelnetError::Timeout { duration }) => {
            assert_eq!(duration, Duration::from_millis(50));
        }
        Ok(_) => panic!("handshake should not complete"),
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[tokio::test]
async fn attach_fails_on_eof_before_banner() {
    let (client, server) = tokio::io::duplex(64);
    drop(server);

    let result = builder().attach(client).await;
    assert!(matches!(result, Err(TelnetError::Io(_))));
}

#[tokio::test]
async fn read_deadline_spans_the_whole_session() {
    let (client, mut server) = tokio::io::duplex(1024);

    // The remote answers the handshake, then goes silent while keeping the
    // connection open.
    tokio::spawn(async move {
        server.write_all(b"\n\radmin@host:~$ ").await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(server);
    });

    let mut session = builder()
        .read_timeout(Duration::from_millis(100))
        .attach(client)
        .await
        .expect("handshake failed");

    // The deadline set at attach time still governs this read.
    let err = session.execute("ls", &[]).await.unwrap_err();
    assert!(matches!(err, TelnetError::Timeout { .. }));
}
