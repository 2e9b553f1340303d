pub mod error;
pub mod instance_status;
pub mod object_id;
pub mod object_meta;
pub mod payload;

pub use error::Error;
pub use instance_status::{InstanceStatus, StatProperty};
pub use object_id::ObjectId;
pub use object_meta::{Metric, ObjectMeta, ObjectRecord};
pub use payload::{Payload, TabularData};

use serde::{Deserialize, Serialize};

/// First reply on a fresh session. Admin tools use the reported endpoint
/// to hop from an IPC socket onto the instance's RPC listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterReply {
    pub instance_id: u64,
    pub rpc_endpoint: String,
}

/// Reply to a successful `put`, naming the freshly created object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutReply {
    pub id: ObjectId,
}
