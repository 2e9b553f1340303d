use super::*;
use crate::cli::DelArgs;
use granary_models::ObjectId;

pub fn execute(session: &Session, args: DelArgs) -> Result<()> {
    let object_id = ObjectId::wrap(&args.object_id);

    session
        .delete(&object_id, args.force, args.deep)
        .with_context(|| format!("failed to delete the object {}", object_id))?;

    println!("The object {} was deleted successfully", object_id);
    Ok(())
}
