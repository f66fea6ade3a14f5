//! Carrot Android CLI
//!
//! Build-configuration tools for the Carrot Android app: resolves the Google
//! Maps API key from `local.properties` and generates the string resource the
//! manifest consumes.

use anyhow::Result;
use carrot_android::res_value::{self, MAPS_API_KEY_PROPERTY};
use carrot_android::signing::{BuildType, SigningConfigs};
use carrot_cli::output::{format_count, Status};
use carrot_core::config::Config;
use carrot_core::error::exit_codes;
use carrot_core::properties::LocalProperties;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "carrot-android")]
#[command(about = "Build-configuration tools for Carrot Android")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the maps API key resource from local.properties
    #[command(name = "maps-key")]
    MapsKey {
        /// Properties file (overrides config)
        #[arg(long)]
        properties: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate res/values/generated.xml with the resolved maps key
    Generate {
        /// Properties file (overrides config)
        #[arg(long)]
        properties: Option<PathBuf>,
        /// Output res directory (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Report build-configuration status
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = Config::load(cli.config.as_deref().and_then(Path::to_str))?;

    let exit_code = match cli.command {
        Commands::MapsKey { properties, json } => {
            run_maps_key(properties.as_deref(), json, cli.quiet, &config)
        }
        Commands::Generate { properties, out_dir } => {
            run_generate(properties.as_deref(), out_dir.as_deref(), cli.quiet, &config)
        }
        Commands::Check => run_check(&config),
    };

    std::process::exit(exit_code);
}

fn properties_path(override_path: Option<&Path>, config: &Config) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.schema.resources.properties_file))
}

fn run_maps_key(properties: Option<&Path>, json: bool, quiet: bool, config: &Config) -> i32 {
    let path = properties_path(properties, config);

    let props = match LocalProperties::load(&path) {
        Ok(props) => props,
        Err(e) => {
            Status::error(&format!("Failed to load properties: {}", e));
            return exit_codes::PROPERTIES_ERROR;
        }
    };

    let resolved = res_value::resolve_maps_key(&props);

    if json {
        match serde_json::to_string_pretty(&resolved) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Serialization failed: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    if quiet {
        println!("{}", resolved.value);
    } else {
        Status::field(&resolved.name, &resolved.value);
        if resolved.value.is_empty() {
            Status::warning(&format!(
                "{} not set in {}; the generated key will be empty",
                MAPS_API_KEY_PROPERTY,
                path.display()
            ));
        }
    }

    exit_codes::SUCCESS
}

fn run_generate(
    properties: Option<&Path>,
    out_dir: Option<&Path>,
    quiet: bool,
    config: &Config,
) -> i32 {
    let path = properties_path(properties, config);
    let res_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.schema.resources.res_dir));

    let props = match LocalProperties::load(&path) {
        Ok(props) => props,
        Err(e) => {
            Status::error(&format!("Failed to load properties: {}", e));
            return exit_codes::PROPERTIES_ERROR;
        }
    };

    let resolved = res_value::resolve_maps_key(&props);
    let empty_key = resolved.value.is_empty();
    let values = vec![resolved];

    match res_value::write_values_file(&res_dir, &values) {
        Ok(out_path) => {
            if !quiet {
                Status::success(&format!(
                    "Wrote {} ({})",
                    out_path.display(),
                    format_count(values.len(), "resource", "resources")
                ));
                if empty_key {
                    Status::warning("Maps key is empty; the maps view will not work");
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("Generation failed: {}", e));
            exit_codes::FAILURE
        }
    }
}

fn run_check(config: &Config) -> i32 {
    Status::header("Carrot Android build configuration");

    match &config.path {
        Some(path) => Status::field("config", path),
        None => Status::field("config", "(defaults)"),
    }

    let path = PathBuf::from(&config.schema.resources.properties_file);
    if path.exists() {
        match LocalProperties::load(&path) {
            Ok(props) => {
                Status::success(&format!(
                    "{}: {}",
                    path.display(),
                    format_count(props.len(), "entry", "entries")
                ));
                let resolved = res_value::resolve_maps_key(&props);
                if resolved.value.is_empty() {
                    Status::warning(&format!("{} not set", MAPS_API_KEY_PROPERTY));
                } else {
                    Status::success(&format!("{}: set", MAPS_API_KEY_PROPERTY));
                }
            }
            Err(e) => {
                Status::error(&format!("{}: {}", path.display(), e));
                return exit_codes::PROPERTIES_ERROR;
            }
        }
    } else {
        Status::warning(&format!(
            "{}: not found (maps key will be empty)",
            path.display()
        ));
    }

    Status::header("SDK passthrough");
    let sdk = &config.schema.sdk;
    if sdk.any_set() {
        Status::field(
            "compile_sdk",
            &sdk.compile_sdk.map(|v| v.to_string()).unwrap_or_default(),
        );
        Status::field(
            "min_sdk",
            &sdk.min_sdk.map(|v| v.to_string()).unwrap_or_default(),
        );
        Status::field(
            "target_sdk",
            &sdk.target_sdk.map(|v| v.to_string()).unwrap_or_default(),
        );
        Status::field(
            "version_code",
            &sdk.version_code.map(|v| v.to_string()).unwrap_or_default(),
        );
        Status::field("version_name", sdk.version_name.as_deref().unwrap_or(""));
        Status::field("ndk_version", sdk.ndk_version.as_deref().unwrap_or(""));
    } else {
        Status::info("All SDK versions supplied by the Flutter toolchain");
    }

    Status::header("Signing");
    let signing = SigningConfigs::debug_only();
    let release = signing.for_build_type(BuildType::Release);
    if signing.release_uses_debug_fallback() {
        Status::warning(&format!(
            "Release builds signed with the {} keystore",
            release.name
        ));
    } else {
        Status::success(&format!("Release builds signed with {}", release.name));
    }

    exit_codes::SUCCESS
}
