pub mod config;
pub mod del;
pub mod ls;
pub mod put;
pub mod query;
pub mod stat;

use super::Result;
use crate::cli::ConnectOpts;
use crate::client::{IpcSession, Session};
use crate::config::{load_configuration, StoredConfig};
use anyhow::Context;
use std::path::PathBuf;

/// One single way of reaching the server, picked from the command line or
/// from the configuration file. IPC wins over an endpoint string, which
/// wins over a host/port pair; never more than one path is attempted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectStrategy {
    Ipc(PathBuf),
    Endpoint(String),
    HostPort(String, u16),
}

impl ConnectStrategy {
    pub fn from_flags(opts: &ConnectOpts) -> Option<Self> {
        if let Some(path) = &opts.ipc_socket {
            Some(ConnectStrategy::Ipc(path.clone()))
        } else if let Some(endpoint) = &opts.rpc_endpoint {
            Some(ConnectStrategy::Endpoint(endpoint.clone()))
        } else if let (Some(host), Some(port)) = (&opts.rpc_host, opts.rpc_port) {
            Some(ConnectStrategy::HostPort(host.clone(), port))
        } else {
            None
        }
    }

    /// Same precedence over the persisted values. Empty strings count as
    /// unset so a blanked-out field never shadows the ones below it.
    pub fn from_config(config: &StoredConfig) -> Option<Self> {
        if let Some(path) = config
            .ipc_socket
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
        {
            Some(ConnectStrategy::Ipc(path.to_owned()))
        } else if let Some(endpoint) = non_empty(&config.rpc_endpoint) {
            Some(ConnectStrategy::Endpoint(endpoint.to_owned()))
        } else if let (Some(host), Some(port)) = (non_empty(&config.rpc_host), config.rpc_port) {
            Some(ConnectStrategy::HostPort(host.to_owned(), port))
        } else {
            None
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Resolves the connection parameters and opens the one session the
/// invocation will use. With no explicit flags the configuration file
/// decides; if that has nothing usable either, there is no point in going
/// on, so the full usage text is printed and the process exits.
pub fn connect(opts: &ConnectOpts) -> Result<Session> {
    let strategy = match ConnectStrategy::from_flags(opts) {
        Some(strategy) => strategy,
        None => {
            let config = load_configuration()?;
            match ConnectStrategy::from_config(&config) {
                Some(strategy) => strategy,
                None => crate::cli::exit_with_help(),
            }
        }
    };

    establish(strategy)
}

fn establish(strategy: ConnectStrategy) -> Result<Session> {
    match strategy {
        ConnectStrategy::Ipc(path) => {
            let ipc = IpcSession::connect(&path).with_context(|| {
                format!("failed to connect to the IPC socket {}", path.display())
            })?;
            // admin commands always speak RPC; the IPC session only
            // reports where the RPC listener is
            let (host, port) = split_endpoint(ipc.rpc_endpoint())?;
            Ok(Session::connect(&host, port)?)
        }
        ConnectStrategy::Endpoint(endpoint) => {
            let (host, port) = split_endpoint(&endpoint)?;
            Ok(Session::connect(&host, port)?)
        }
        ConnectStrategy::HostPort(host, port) => Ok(Session::connect(&host, port)?),
    }
}

fn split_endpoint(endpoint: &str) -> Result<(String, u16)> {
    let (host, port) = endpoint.rsplit_once(':').ok_or_else(|| {
        anyhow::anyhow!("malformed RPC endpoint {:?}, expected host:port", endpoint)
    })?;

    let port = port
        .parse()
        .with_context(|| format!("malformed port in RPC endpoint {:?}", endpoint))?;

    Ok((host.to_owned(), port))
}
