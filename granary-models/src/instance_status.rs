use serde::{Deserialize, Serialize};

/// Point-in-time status snapshot of a single granary instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceStatus {
    pub instance_id: u64,
    pub deployment: String,
    pub memory_usage: u64,
    pub memory_limit: u64,
    pub deferred_requests: u64,
    pub ipc_connections: u64,
    pub rpc_connections: u64,
}

/// A single named field of [`InstanceStatus`], as selectable by the
/// `stat` property flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatProperty {
    InstanceId,
    Deployment,
    MemoryUsage,
    MemoryLimit,
    DeferredRequests,
    IpcConnections,
    RpcConnections,
}

impl StatProperty {
    pub const ALL: [StatProperty; 7] = [
        StatProperty::InstanceId,
        StatProperty::Deployment,
        StatProperty::MemoryUsage,
        StatProperty::MemoryLimit,
        StatProperty::DeferredRequests,
        StatProperty::IpcConnections,
        StatProperty::RpcConnections,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatProperty::InstanceId => "instance_id",
            StatProperty::Deployment => "deployment",
            StatProperty::MemoryUsage => "memory_usage",
            StatProperty::MemoryLimit => "memory_limit",
            StatProperty::DeferredRequests => "deferred_requests",
            StatProperty::IpcConnections => "ipc_connections",
            StatProperty::RpcConnections => "rpc_connections",
        }
    }
}

impl std::fmt::Display for StatProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl InstanceStatus {
    pub fn property(&self, property: StatProperty) -> String {
        match property {
            StatProperty::InstanceId => self.instance_id.to_string(),
            StatProperty::Deployment => self.deployment.clone(),
            StatProperty::MemoryUsage => self.memory_usage.to_string(),
            StatProperty::MemoryLimit => self.memory_limit.to_string(),
            StatProperty::DeferredRequests => self.deferred_requests.to_string(),
            StatProperty::IpcConnections => self.ipc_connections.to_string(),
            StatProperty::RpcConnections => self.rpc_connections.to_string(),
        }
    }
}

// The full-snapshot form printed by a bare `stat`.
impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "InstanceStatus:")?;
        for property in StatProperty::ALL.iter() {
            write!(f, "\n    {}: {}", property, self.property(*property))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_status() -> InstanceStatus {
        InstanceStatus {
            instance_id: 7,
            deployment: "local".to_owned(),
            memory_usage: 2048,
            memory_limit: 1 << 30,
            deferred_requests: 0,
            ipc_connections: 3,
            rpc_connections: 1,
        }
    }

    #[test]
    fn property_lookup_is_labeled_consistently() {
        let status = sample_status();
        assert_eq!(status.property(StatProperty::InstanceId), "7");
        assert_eq!(status.property(StatProperty::Deployment), "local");
        assert_eq!(status.property(StatProperty::MemoryLimit), "1073741824");
    }

    #[test]
    fn snapshot_lists_every_field_once() {
        let rendered = sample_status().to_string();
        assert!(rendered.starts_with("InstanceStatus:"));
        for property in StatProperty::ALL.iter() {
            assert_eq!(
                rendered.matches(property.name()).count(),
                1,
                "{} should appear exactly once",
                property
            );
        }
    }
}
