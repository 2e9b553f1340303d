use super::*;
use crate::cli::LsArgs;
use comfy_table::Table;
use granary_models::ObjectMeta;
use std::iter::FromIterator;

pub fn execute(session: &Session, args: LsArgs) -> Result<()> {
    let objects = session
        .list_objects(&args.pattern, args.regex, args.limit)
        .with_context(|| format!("failed to list objects matching {:?}", args.pattern))?;

    let table: ObjectTableView = objects.into_iter().collect();

    if table.is_empty() {
        println!("No objects matched the given pattern");
    } else {
        println!("{}", table);
    }

    Ok(())
}

#[derive(Debug)]
struct ObjectTableView {
    table: Table,
    rows_count: usize,
}

impl ObjectTableView {
    fn is_empty(&self) -> bool {
        self.rows_count == 0
    }
}

impl FromIterator<ObjectMeta> for ObjectTableView {
    fn from_iter<I: IntoIterator<Item = ObjectMeta>>(iter: I) -> Self {
        use bytesize::ByteSize;
        use comfy_table::modifiers::UTF8_ROUND_CORNERS;
        use comfy_table::presets::UTF8_FULL;
        use comfy_table::*;

        let mut table = Table::new();

        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Object ID")
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold),
                Cell::new("Typename")
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold),
                Cell::new("Size")
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold),
                Cell::new("Instance")
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold),
            ]);

        let mut rows_count = 0;
        for item in iter {
            let human_readable_size = ByteSize::b(item.nbytes).to_string_as(false);
            table.add_row(vec![
                Cell::new(item.id).set_alignment(CellAlignment::Center),
                Cell::new(item.typename).set_alignment(CellAlignment::Center),
                Cell::new(human_readable_size).set_alignment(CellAlignment::Center),
                Cell::new(item.instance_id).set_alignment(CellAlignment::Center),
            ]);
            rows_count += 1;
        }

        Self { table, rows_count }
    }
}

impl std::fmt::Display for ObjectTableView {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.table)
    }
}
