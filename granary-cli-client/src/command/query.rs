use super::*;
use crate::cli::{MetaFormat, QueryArgs};
use crate::client::ClientError;
use granary_models::{ObjectId, ObjectRecord};

pub fn execute(session: &Session, args: QueryArgs) -> Result<()> {
    let object_id = ObjectId::wrap(&args.object_id);

    let record = report_fetch(&object_id, session.get_object(&object_id), args.exists)?;

    println!("The object you requested:\n{}", record.value_repr());

    if args.exists {
        println!("{}", existence_notice(&object_id, true));
    }

    if args.stdout {
        println!("{}", record.value_repr());
    }

    if let Some(output_file) = &args.output_file {
        std::fs::write(output_file, record.value_repr()).with_context(|| {
            format!(
                "failed to write the object {} to {}",
                object_id,
                output_file.display()
            )
        })?;
    }

    match args.meta {
        Some(MetaFormat::Simple) => println!("Metadata of the object:\n{}", record.meta),
        Some(MetaFormat::Json) => println!(
            "Metadata of the object in JSON format:\n{}",
            serde_json::to_string_pretty(&record.meta)?
        ),
        None => (),
    }

    if let Some(metric) = args.metric {
        println!("{}: {}", metric, record.meta.metric(metric));
    }

    Ok(())
}

/// Unwraps the fetch result. A failed fetch is always fatal, but when the
/// existence check was requested the not-found notice is printed first and
/// the failure is propagated afterwards.
fn report_fetch(
    object_id: &ObjectId,
    fetched: Result<ObjectRecord, ClientError>,
    exists: bool,
) -> Result<ObjectRecord> {
    match fetched {
        Ok(record) => Ok(record),
        Err(error) => {
            if exists {
                println!("{}", existence_notice(object_id, false));
            }
            Err(error).with_context(|| format!("failed to fetch the object {}", object_id))
        }
    }
}

fn existence_notice(object_id: &ObjectId, found: bool) -> String {
    if found {
        format!("The object {} exists", object_id)
    } else {
        format!("The object {} does not exist", object_id)
    }
}
