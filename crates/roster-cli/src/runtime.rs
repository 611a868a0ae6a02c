// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use roster_api::Client;
use roster_app::Record;
use roster_tui::AppRuntime;

/// Runtime backed by the remote records endpoint.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn load_records(&mut self) -> Result<Vec<Record>> {
        self.client
            .fetch_records()
            .with_context(|| format!("fetch records from {}", self.client.endpoint()))
    }
}

/// Offline runtime serving the seeded demo roster.
pub struct DemoRuntime;

impl AppRuntime for DemoRuntime {
    fn load_records(&mut self) -> Result<Vec<Record>> {
        Ok(roster_api::demo_records())
    }
}
