//! Curb adapter demo: designs and optimizes a sample adapter and prints the
//! results as JSON.
//!
//! Usage:
//! ```text
//! cargo run --example adapter                   # built-in sample request
//! cargo run --example adapter -- request.json   # request from a file
//! RUST_LOG=curb_adapter=debug cargo run --example adapter
//! ```

use std::error::Error;

use curb_adapter::{CurbInput, DesignAdapter, DesignRequest, OpeningInput, Parameters};

fn sample_request() -> DesignRequest {
    let existing = CurbInput::manual(
        40.0,
        30.0,
        Some(20.0),
        OpeningInput::new(8.0, 6.0, 5.0, 5.0),
        OpeningInput::new(8.0, 6.0, 20.0, 5.0),
    );
    let new = CurbInput::manual(
        42.0,
        32.0,
        Some(22.0),
        OpeningInput::new(8.0, 6.0, 5.0, 5.0),
        OpeningInput::new(8.0, 6.0, 20.0, 5.0),
    );
    DesignRequest::new(existing, new).with_params(Parameters::default())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for curb_adapter.
    // Override with RUST_LOG env var (e.g. RUST_LOG=curb_adapter=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("curb_adapter=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let request = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => sample_request(),
    };

    let adapter = DesignAdapter::new(request);
    let design = adapter.execute()?;
    println!("{}", serde_json::to_string_pretty(&design)?);

    let best = adapter.optimize()?;
    println!("{}", serde_json::to_string_pretty(&best)?);
    Ok(())
}
