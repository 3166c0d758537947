//! Command line configuration for the `wis2-gdc` binary.
//!
//! Every backend definition can be given as a flag or through the
//! environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WIS2_GDC_BACKEND` | Elasticsearch | Backend kind |
//! | `WIS2_GDC_CONNECTION` | (required) | Connection string, ending with the primary index name |
//! | `WIS2_GDC_COLLECTION_INDEX` | (required) | Collection index name |
//! | `EWC_URL` | (required) | Base URL of the EWC hosting environment |
//! | `AWS_URL` | (required) | Base URL of the AWS hosting environment |
//! | `WIS2_GDC_PRESERVE_LINKS` | false | Keep non-collection links on save |
//! | `WIS2_GDC_INSECURE` | false | Disable certificate validation |
//! | `WIS2_GDC_LOG_LEVEL` | info | Log level |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gdc_persistence::config::BackendConfig;
use gdc_persistence::core::BackendKind;
use gdc_persistence::error::StorageResult;
use gdc_persistence::types::{HostingEnvironment, HostingUrls, LinkRetention};

/// WIS2 Global Discovery Catalogue.
#[derive(Debug, Clone, Parser)]
#[command(name = "wis2-gdc")]
#[command(about = "WIS2 Global Discovery Catalogue", version)]
pub struct Cli {
    /// Backend kind.
    #[arg(long, env = "WIS2_GDC_BACKEND", default_value = "Elasticsearch")]
    pub backend: String,

    /// Connection string, including the primary index name as its last path segment.
    #[arg(long, env = "WIS2_GDC_CONNECTION", hide_env_values = true)]
    pub connection: String,

    /// Name of the index holding extracted collection links.
    #[arg(long, env = "WIS2_GDC_COLLECTION_INDEX")]
    pub collection_index: String,

    /// Base URL of the EWC hosting environment.
    #[arg(long, env = "EWC_URL")]
    pub ewc_url: String,

    /// Base URL of the AWS hosting environment.
    #[arg(long, env = "AWS_URL")]
    pub aws_url: String,

    /// Keep non-collection links in saved records.
    #[arg(long, env = "WIS2_GDC_PRESERVE_LINKS")]
    pub preserve_links: bool,

    /// Disable certificate validation (development clusters only).
    #[arg(long, env = "WIS2_GDC_INSECURE")]
    pub insecure: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "WIS2_GDC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Delete and recreate the primary and collection indices.
    Setup,

    /// Save a metadata record, splitting out its collection links.
    Register {
        /// JSON record to save, or `-` to read from stdin.
        file: PathBuf,

        /// Hosting environment for collection links: 1 for EWC, 2 for AWS.
        #[arg(short, long)]
        environment: HostingEnvironment,

        /// Save into a throwaway in-memory index instead of the cluster.
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Returns the backend kind named by `--backend`.
    pub fn backend_kind(&self) -> StorageResult<BackendKind> {
        Ok(self.backend.parse()?)
    }

    /// Builds the backend definitions.
    pub fn backend_config(&self) -> BackendConfig {
        let link_retention = if self.preserve_links {
            LinkRetention::PreserveOthers
        } else {
            LinkRetention::CollectionsOnly
        };

        let mut config = BackendConfig::new(
            self.connection.clone(),
            self.collection_index.clone(),
            HostingUrls::new(self.ewc_url.clone(), self.aws_url.clone()),
        )
        .with_link_retention(link_retention);
        config.disable_certificate_validation = self.insecure;
        config
    }
}
