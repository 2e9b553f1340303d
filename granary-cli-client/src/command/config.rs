use super::*;
use crate::cli::ConfigArgs;
use crate::config::{update_configuration, ConfigPatch};

pub fn execute(args: ConfigArgs) -> Result<()> {
    update_configuration(ConfigPatch {
        ipc_socket: args.ipc_socket_value,
        rpc_host: args.rpc_host_value,
        rpc_port: args.rpc_port_value,
        rpc_endpoint: args.rpc_endpoint_value,
    })?;

    println!("Configuration successful");
    Ok(())
}
