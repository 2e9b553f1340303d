use granary_models::Metric;
use std::path::PathBuf;
use structopt::StructOpt;

pub fn parse_args() -> Opts {
    Opts::from_args()
}

/// Prints the full usage text to stderr and terminates with a non-zero
/// status. Used when no subcommand is given and when neither the command
/// line nor the configuration file yields usable connection parameters.
pub fn exit_with_help() -> ! {
    let _ = Opts::clap().write_long_help(&mut std::io::stderr());
    eprintln!();
    std::process::exit(1);
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "granary-ctl",
    about = "Administrative command line tool for the granary object store"
)]
pub struct Opts {
    #[structopt(flatten)]
    pub connect: ConnectOpts,

    #[structopt(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Default, StructOpt)]
pub struct ConnectOpts {
    /// Socket location of the granary server to connect to over IPC
    #[structopt(long, global = true)]
    pub ipc_socket: Option<PathBuf>,

    /// RPC host of the granary server
    #[structopt(long, global = true)]
    pub rpc_host: Option<String>,

    /// RPC port of the granary server
    #[structopt(long, global = true)]
    pub rpc_port: Option<u16>,

    /// RPC endpoint of the granary server, as host:port
    #[structopt(long, global = true)]
    pub rpc_endpoint: Option<String>,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Lists objects held by the connected instance
    Ls(LsArgs),
    /// Fetches one object and inspects its value and metadata
    Query(QueryArgs),
    /// Deletes one object
    Del(DelArgs),
    /// Reports the status of the connected instance
    Stat(StatArgs),
    /// Puts a value or a tabular file to the store
    Put(PutArgs),
    /// Edits the local configuration file
    Config(ConfigArgs),
}

#[derive(Debug, StructOpt)]
pub struct LsArgs {
    /// The pattern matched against object typenames
    #[structopt(long, default_value = "*")]
    pub pattern: String,

    /// Treat the pattern as a regular expression instead of a glob
    #[structopt(long)]
    pub regex: bool,

    /// Maximum number of objects to list
    #[structopt(long, default_value = "5")]
    pub limit: usize,
}

#[derive(Debug, StructOpt)]
pub struct QueryArgs {
    /// ID of the object to be fetched
    #[structopt(long)]
    pub object_id: String,

    /// Report whether the object exists instead of failing outright
    #[structopt(long)]
    pub exists: bool,

    /// Write the object's string form to stdout
    #[structopt(long)]
    pub stdout: bool,

    /// Write the object's string form to the given file
    #[structopt(long)]
    pub output_file: Option<PathBuf>,

    /// Print the object's metadata, either `simple` or `json`
    #[structopt(long, possible_values = &["simple", "json"])]
    pub meta: Option<MetaFormat>,

    /// Print a single metadata attribute of the object
    #[structopt(long, possible_values = &["nbytes", "signature", "typename"])]
    pub metric: Option<Metric>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaFormat {
    Simple,
    Json,
}

impl std::str::FromStr for MetaFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "simple" => Ok(MetaFormat::Simple),
            "json" => Ok(MetaFormat::Json),
            other => Err(format!("unknown metadata format {:?}", other)),
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct DelArgs {
    /// ID of the object to be deleted
    #[structopt(long)]
    pub object_id: String,

    /// Delete even if the object is still referred to by others
    #[structopt(long)]
    pub force: bool,

    /// Also delete the member objects, recursively
    #[structopt(long)]
    pub deep: bool,
}

#[derive(Debug, Default, StructOpt)]
pub struct StatArgs {
    /// Instance ID of the granary server the client is connected to
    #[structopt(long)]
    pub instance_id: bool,

    /// Deployment mode of the connected granary cluster
    #[structopt(long)]
    pub deployment: bool,

    /// Memory usage (in bytes) of the connected instance
    #[structopt(long)]
    pub memory_usage: bool,

    /// Memory limit (in bytes) of the connected instance
    #[structopt(long)]
    pub memory_limit: bool,

    /// Number of waiting requests on the connected instance
    #[structopt(long)]
    pub deferred_requests: bool,

    /// Number of alive IPC connections on the connected instance
    #[structopt(long)]
    pub ipc_connections: bool,

    /// Number of alive RPC connections on the connected instance
    #[structopt(long)]
    pub rpc_connections: bool,
}

#[derive(Debug, StructOpt)]
pub struct PutArgs {
    /// The literal value to put to the granary server
    #[structopt(long, conflicts_with = "file", required_unless = "file")]
    pub value: Option<String>,

    /// The file to decode as tabular data and put to the granary server
    #[structopt(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct ConfigArgs {
    /// The ipc_socket value to enter in the config file
    #[structopt(long)]
    pub ipc_socket_value: Option<PathBuf>,

    /// The rpc_host value to enter in the config file
    #[structopt(long)]
    pub rpc_host_value: Option<String>,

    /// The rpc_port value to enter in the config file
    #[structopt(long)]
    pub rpc_port_value: Option<u16>,

    /// The rpc_endpoint value to enter in the config file
    #[structopt(long)]
    pub rpc_endpoint_value: Option<String>,
}
