//! Writes the Climate Monitor OpenAPI document without starting the server.
//!
//! Usage:
//!   cargo run --bin generate_openapi > openapi.json
//!   cargo run --bin generate_openapi -- --output openapi.json

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use climate_monitor_service::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialise OpenAPI document")?;

    match output_path(env::args().collect()) {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("OpenAPI document written to {}", path.display());
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

/// Value following `--output`, if present.
fn output_path(args: Vec<String>) -> Option<PathBuf> {
    args.windows(2)
        .find(|w| w[0] == "--output")
        .map(|w| PathBuf::from(&w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn output_flag_is_parsed() {
        assert_eq!(
            output_path(args(&["generate_openapi", "--output", "api.json"])),
            Some(PathBuf::from("api.json"))
        );
    }

    #[test]
    fn no_flag_means_stdout() {
        assert_eq!(output_path(args(&["generate_openapi"])), None);
        assert_eq!(output_path(args(&["generate_openapi", "--output"])), None);
    }

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for path in [
            "/status",
            "/history",
            "/relay-on-time",
            "/update-threshold",
            "/thresholds/{user_id}",
            "/health",
        ] {
            assert!(doc["paths"][path].is_object(), "missing {path}");
        }
    }
}
