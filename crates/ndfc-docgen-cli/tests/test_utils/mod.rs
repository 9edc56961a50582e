//! Test utilities for ndfc-docgen integration tests

// Internal imports (std, crate)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// External imports (alphabetized)
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures
pub fn create_temp_dir() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let temp_path = temp_dir.path().to_path_buf();
    Ok((temp_dir, temp_path))
}

/// Runs the binary with the controller environment cleared
pub fn run_cli(args: &[&str]) -> anyhow::Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_ndfc-docgen"))
        .args(args)
        .env_remove("NDFC_IP4")
        .env_remove("NDFC_USERNAME")
        .env_remove("NDFC_PASSWORD")
        .env_remove("NDFC_DOMAIN")
        .env("RUST_LOG", "warn")
        .output()?;
    Ok(output)
}

/// Writes a template file with one internal, one hidden and three documented parameters
pub fn create_test_template(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("Easy_Fabric.json");
    fs::write(&path, TEMPLATE)?;
    Ok(path)
}

/// Writes an all-templates listing
pub fn create_test_templates(dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join("templates.json");
    fs::write(&path, TEMPLATES)?;
    Ok(path)
}

const TEMPLATE: &str = r###"{
    "name": "Easy_Fabric",
    "description": "Fabric for a VXLAN EVPN deployment",
    "tags": "Data Center VXLAN EVPN",
    "content": "##template properties\nname = Easy_Fabric;",
    "newContent": "##template properties",
    "parameters": [
        {
            "name": "FABRIC_TYPE",
            "parameterType": "string",
            "optional": false,
            "annotations": {"IsInternal": "true"}
        },
        {
            "name": "BGP_AS",
            "parameterType": "string",
            "optional": false,
            "annotations": {
                "Description": "1-4294967295 | 1-65535[.0-65535]<br />It is a good practice to have a unique ASN for each Fabric.",
                "DisplayName": "BGP ASN",
                "Section": "\"General Parameters\""
            }
        },
        {
            "name": "REPLICATION_MODE",
            "parameterType": "enum",
            "optional": false,
            "annotations": {
                "Description": "Replication Mode for BUM Traffic",
                "Enum": "\"Multicast,Ingress\"",
                "IsShow": "$$UNDERLAY_IS_V6$$!=true"
            },
            "metaProperties": {"defaultValue": "Multicast"}
        },
        {
            "name": "BGP_HOLD_TIMER",
            "parameterType": "integer",
            "optional": true,
            "annotations": {
                "Description": "BGP hold timer (Min: 3, Max: 3600)",
                "IsShow": "$$REPLICATION_MODE$$==\"Multicast\" && $$BGP_AS$$!=\"\""
            },
            "metaProperties": {"defaultValue": "180", "min": "3", "max": "3600"}
        },
        {
            "name": "SECRET",
            "parameterType": "string",
            "annotations": {"Section": "\"Hidden\""}
        }
    ]
}"###;

const TEMPLATES: &str = r#"[
    {"name": "Easy_Fabric", "tags": "Data Center VXLAN EVPN"},
    {"name": "Default_Network_Universal", "tags": "network"}
]"#;
