use super::Result;
use granary_models::TabularData;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Decodes a delimited file into a row/column structure. `put --file`
/// always uploads the decoded structure, never the raw bytes.
pub fn read_table(path: &Path) -> Result<TabularData> {
    let file = File::open(path)?;
    read_table_from(file)
}

fn read_table_from<R: Read>(reader: R) -> Result<TabularData> {
    let mut reader = csv::Reader::from_reader(reader);

    let columns = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(TabularData { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_becomes_the_columns() {
        let table = read_table_from("a,b,c\n1,2,3\n4,5,6\n".as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(
            table.rows,
            vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]
        );
    }

    #[test]
    fn a_lone_header_yields_no_rows() {
        let table = read_table_from("name,count\n".as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["name", "count"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn ragged_rows_are_a_decode_error() {
        assert!(read_table_from("a,b\n1,2,3\n".as_bytes()).is_err());
    }
}
