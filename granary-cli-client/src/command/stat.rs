use super::*;
use crate::cli::StatArgs;
use granary_models::StatProperty;

pub fn execute(session: &Session, args: StatArgs) -> Result<()> {
    let status = session
        .status()
        .context("failed to read the instance status")?;

    let properties = requested_properties(&args, std::env::args());

    if properties.is_empty() {
        println!("{}", status);
    } else {
        println!("InstanceStatus:");
        for property in properties {
            println!("    {}: {}", property, status.property(property));
        }
    }

    Ok(())
}

/// The properties picked by the flags, in the order the flags appeared on
/// the command line. The parser only records which flags were set, so the
/// ordering is recovered by scanning argv.
fn requested_properties<I>(args: &StatArgs, argv: I) -> Vec<StatProperty>
where
    I: IntoIterator<Item = String>,
{
    let selected = selected_properties(args);
    let mut ordered = Vec::new();

    for arg in argv {
        if let Some(property) = property_flag(&arg) {
            if selected.contains(&property) && !ordered.contains(&property) {
                ordered.push(property);
            }
        }
    }

    ordered
}

fn selected_properties(args: &StatArgs) -> Vec<StatProperty> {
    let flags = [
        (args.instance_id, StatProperty::InstanceId),
        (args.deployment, StatProperty::Deployment),
        (args.memory_usage, StatProperty::MemoryUsage),
        (args.memory_limit, StatProperty::MemoryLimit),
        (args.deferred_requests, StatProperty::DeferredRequests),
        (args.ipc_connections, StatProperty::IpcConnections),
        (args.rpc_connections, StatProperty::RpcConnections),
    ];

    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, property)| *property)
        .collect()
}

fn property_flag(arg: &str) -> Option<StatProperty> {
    let name = arg.strip_prefix("--")?;
    StatProperty::ALL
        .iter()
        .copied()
        .find(|property| property.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_property_flags_selects_nothing() {
        let properties =
            requested_properties(&StatArgs::default(), argv(&["granary-ctl", "stat"]));
        assert!(properties.is_empty());
    }

    #[test]
    fn properties_come_back_in_command_line_order() {
        let args = StatArgs {
            instance_id: true,
            memory_usage: true,
            ..StatArgs::default()
        };
        let properties = requested_properties(
            &args,
            argv(&["granary-ctl", "stat", "--memory_usage", "--instance_id"]),
        );
        assert_eq!(
            properties,
            vec![StatProperty::MemoryUsage, StatProperty::InstanceId]
        );
    }

    #[test]
    fn repeated_flags_are_reported_once() {
        let args = StatArgs {
            deployment: true,
            ..StatArgs::default()
        };
        let properties = requested_properties(
            &args,
            argv(&["granary-ctl", "stat", "--deployment", "--deployment"]),
        );
        assert_eq!(properties, vec![StatProperty::Deployment]);
    }

    #[test]
    fn stray_argv_entries_are_ignored_unless_selected() {
        // a flag-looking value that was never actually set on the parsed
        // arguments must not be reported
        let properties = requested_properties(
            &StatArgs::default(),
            argv(&["granary-ctl", "stat", "--instance_id"]),
        );
        assert!(properties.is_empty());
    }
}
