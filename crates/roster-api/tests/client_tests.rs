// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use roster_api::{Client, FetchError};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

#[test]
fn fetch_fails_with_network_error_for_unreachable_endpoint() {
    let client = Client::new("http://127.0.0.1:1/users", Duration::from_millis(50))
        .expect("client should initialize");

    let error = client
        .fetch_records()
        .expect_err("fetch should fail for unreachable endpoint");
    assert!(matches!(error, FetchError::Network { .. }));
    assert!(error.to_string().contains("cannot reach"));
}

#[test]
fn fetch_returns_records_in_source_order() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/users", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/users");
        let response = Response::from_string(roster_testkit::sample_users_json())
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let records = client.fetch_records()?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Leanne Graham");
    assert_eq!(records[1].username, "Antonette");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn fetch_surfaces_http_error_status() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/users", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string("gone fishing").with_status_code(503);
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_records()
        .expect_err("503 should surface as a status error");
    assert!(matches!(error, FetchError::Status(status) if status.as_u16() == 503));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn fetch_surfaces_decode_error_for_malformed_body() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/users", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string("[{\"id\": \"not-a-number\"}]")
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .fetch_records()
        .expect_err("malformed payload should fail to decode");
    assert!(matches!(error, FetchError::Decode(_)));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn each_fetch_is_a_fresh_request() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}/users", server.server_addr());

    let handle = thread::spawn(move || {
        for _ in 0..2 {
            let request = server.recv().expect("request expected");
            let response = Response::from_string(roster_testkit::sample_users_json())
                .with_status_code(200)
                .with_header(json_header());
            request.respond(response).expect("response should succeed");
        }
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    assert_eq!(client.fetch_records()?.len(), 2);
    assert_eq!(client.fetch_records()?.len(), 2);

    handle.join().expect("server thread should join");
    Ok(())
}
