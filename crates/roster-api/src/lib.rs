// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use roster_app::{PostalAddress, Record, RecordId};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// The single failure taxonomy of the data source. Transitions in the UI
/// cannot fail; this is the only error the application has to surface.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot reach {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },
    #[error("directory endpoint returned {0}")]
    Status(StatusCode),
    #[error("malformed directory payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub fn validate_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid endpoint URL {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("endpoint {raw:?} must use http or https");
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = validate_endpoint(endpoint.trim_end_matches('/'))?;
        if timeout.is_zero() {
            bail!("api.timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            endpoint,
            timeout,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One fresh GET against the directory endpoint. Records come back in
    /// source order; no retries, no caching.
    pub fn fetch_records(&self) -> std::result::Result<Vec<Record>, FetchError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .map_err(|source| FetchError::Network {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().map_err(|source| FetchError::Network {
            url: self.endpoint.to_string(),
            source,
        })?;
        decode_records(&body)
    }
}

fn decode_records(body: &str) -> std::result::Result<Vec<Record>, FetchError> {
    let rows: Vec<UserRow> = serde_json::from_str(body)?;
    Ok(rows.into_iter().map(UserRow::into_record).collect())
}

/// Seed used by `--demo`; keeps the viewer usable with no network.
pub fn demo_records() -> Vec<Record> {
    let seed = [
        ("Ada Lovelace", "ada", "Analytical Engines", "Marylebone"),
        ("Grace Hopper", "grace", "Bureau of Ordnance", "Arlington"),
        ("Alan Turing", "alan", "NPL", "Teddington"),
        ("Hedy Lamarr", "hedy", "Spread Spectrum Co", "Vienna"),
    ];
    seed.iter()
        .enumerate()
        .map(|(index, (name, user, company, city))| Record {
            id: RecordId::new(index as i64 + 1),
            name: (*name).to_owned(),
            email: format!("{user}@example.org"),
            username: (*user).to_owned(),
            phone: format!("555-02{index:02}"),
            website: format!("{user}.example.org"),
            company_name: (*company).to_owned(),
            address: PostalAddress {
                street: format!("{} Demo Street", index + 1),
                suite: format!("Suite {}", index + 1),
                city: (*city).to_owned(),
                zipcode: format!("100{index:02}"),
            },
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    username: String,
    phone: String,
    website: String,
    company: CompanyRow,
    address: AddressRow,
}

impl UserRow {
    fn into_record(self) -> Record {
        Record {
            id: RecordId::new(self.id),
            name: self.name,
            email: self.email,
            username: self.username,
            phone: self.phone,
            website: self.website,
            company_name: self.company.name,
            address: PostalAddress {
                street: self.address.street,
                suite: self.address.suite,
                city: self.address.city,
                zipcode: self.address.zipcode,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AddressRow {
    street: String,
    suite: String,
    city: String,
    zipcode: String,
}
