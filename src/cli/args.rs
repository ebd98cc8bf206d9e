//! Command-line argument structures for the `snmp-trap` tool.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::cli::hints::parse_oid;
use crate::sender::TrapConfig;
use crate::{Oid, ValueKind, Version};

/// SNMP version for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SnmpVersion {
    /// SNMPv1
    #[value(name = "1")]
    V1,
    /// SNMPv2c (default)
    #[default]
    #[value(name = "2c")]
    V2c,
    /// SNMPv3
    #[value(name = "3")]
    V3,
}

impl From<SnmpVersion> for Version {
    fn from(v: SnmpVersion) -> Self {
        match v {
            SnmpVersion::V1 => Version::V1,
            SnmpVersion::V2c => Version::V2c,
            SnmpVersion::V3 => Version::V3,
        }
    }
}

/// Target arguments.
#[derive(Debug, Parser)]
pub struct TargetArgs {
    /// Trap receiver host name or address.
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Trap receiver port [default: 162].
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// SNMP version. Only 2c can carry a trap.
    #[arg(short = 'v', long = "snmp-version")]
    pub snmp_version: Option<SnmpVersion>,

    /// Community string [default: none].
    #[arg(short = 'c', long = "community")]
    pub community: Option<String>,

    /// Send timeout in seconds [default: 5].
    #[arg(short = 't', long = "timeout")]
    pub timeout: Option<f64>,

    /// Read base settings from a JSON file; flags override it.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    /// Build the sender configuration: file first, then flags.
    pub fn trap_config(&self) -> Result<TrapConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
                serde_json::from_str::<TrapConfig>(&text)
                    .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
            }
            None => TrapConfig::default(),
        };

        config.host = Some(self.host.clone());
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(version) = self.snmp_version {
            config.version = version.into();
        }
        if let Some(community) = &self.community {
            config.community = Some(community.clone());
        }
        if let Some(timeout) = self.timeout {
            config.send_timeout = Some(
                Duration::try_from_secs_f64(timeout)
                    .map_err(|e| format!("invalid timeout {}: {}", timeout, e))?,
            );
        }
        Ok(config)
    }
}

/// Output and logging arguments.
#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Print a JSON summary of the trap instead of text.
    #[arg(long = "json")]
    pub json: bool,

    /// Print nothing on success.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Disable well-known OID name hints.
    #[arg(long = "no-hints")]
    pub no_hints: bool,

    /// Enable debug logging (snmp_trap_sender=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (snmp_trap_sender=trace).
    #[arg(short = 'D', long = "trace")]
    pub trace: bool,
}

impl OutputArgs {
    /// Initialize tracing based on debug/trace flags.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "snmp_trap_sender=trace"
        } else if self.debug {
            "snmp_trap_sender=debug"
        } else {
            "snmp_trap_sender=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// One `OID TYPE VALUE` triple from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct VarArg {
    pub oid: Oid,
    pub kind: ValueKind,
    pub value: String,
}

/// Split trailing arguments into `OID TYPE VALUE` triples.
///
/// `TYPE` is a single net-snmp type letter. Values are checked later, when
/// the sender parses them.
pub fn parse_var_args(args: &[String]) -> Result<Vec<VarArg>, String> {
    if !args.len().is_multiple_of(3) {
        return Err(format!(
            "variables must come in OID TYPE VALUE triples, got {} trailing argument(s)",
            args.len() % 3
        ));
    }

    args.chunks_exact(3)
        .map(|chunk| {
            let oid = parse_oid(&chunk[0])?;
            let kind = parse_kind(&chunk[1])?;
            Ok(VarArg {
                oid,
                kind,
                value: chunk[2].clone(),
            })
        })
        .collect()
}

fn parse_kind(s: &str) -> Result<ValueKind, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(tag), None) => {
            ValueKind::from_tag(tag).ok_or_else(|| format!("invalid type specifier: {}", s))
        }
        _ => Err(format!("invalid type specifier: {}", s)),
    }
}
