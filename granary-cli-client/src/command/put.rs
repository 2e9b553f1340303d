use super::*;
use crate::cli::PutArgs;
use crate::tabular;
use granary_models::Payload;

pub fn execute(session: &Session, args: PutArgs) -> Result<()> {
    match (args.value, args.file) {
        (Some(value), None) => {
            let id = session
                .put(&Payload::text(value.clone()))
                .with_context(|| format!("failed to put the value {:?} to the server", value))?;

            println!("{:?} was successfully put to the server as object {}", value, id);
        }
        (None, Some(path)) => {
            let table = tabular::read_table(&path)
                .with_context(|| format!("failed to decode {} as tabular data", path.display()))?;

            let id = session.put(&Payload::Table(table)).with_context(|| {
                format!("failed to put the file {} to the server", path.display())
            })?;

            println!(
                "{} was successfully put to the server as object {}",
                path.display(),
                id
            );
        }
        // the argument parser enforces exactly one of --value and --file
        _ => unreachable!(),
    }

    Ok(())
}
