use crate::ObjectId;
use serde::{Deserialize, Serialize};

/// Metadata the store keeps alongside every object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub id: ObjectId,
    pub typename: String,
    pub nbytes: u64,
    pub signature: u64,
    pub instance_id: u64,
}

/// A single metadata attribute that can be requested on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Nbytes,
    Signature,
    Typename,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Nbytes => "nbytes",
            Metric::Signature => "signature",
            Metric::Typename => "typename",
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "nbytes" => Ok(Metric::Nbytes),
            "signature" => Ok(Metric::Signature),
            "typename" => Ok(Metric::Typename),
            other => Err(format!("unknown metric {:?}", other)),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ObjectMeta {
    pub fn metric(&self, metric: Metric) -> String {
        match metric {
            Metric::Nbytes => self.nbytes.to_string(),
            Metric::Signature => self.signature.to_string(),
            Metric::Typename => self.typename.clone(),
        }
    }
}

// The simple, line-per-field form shown by `query --meta simple`.
impl std::fmt::Display for ObjectMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "typename: {}", self.typename)?;
        writeln!(f, "nbytes: {}", self.nbytes)?;
        writeln!(f, "signature: {}", self.signature)?;
        write!(f, "instance_id: {}", self.instance_id)
    }
}

/// A fetched object: its metadata plus its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub meta: ObjectMeta,
    pub value: serde_json::Value,
}

impl ObjectRecord {
    /// The string form printed to stdout or written to an output file:
    /// string values verbatim, everything else as compact JSON.
    pub fn value_repr(&self) -> String {
        match &self.value {
            serde_json::Value::String(text) => text.clone(),
            value => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> ObjectMeta {
        ObjectMeta {
            id: ObjectId::Instance(42),
            typename: "granary::Tensor".to_owned(),
            nbytes: 1024,
            signature: 98765,
            instance_id: 0,
        }
    }

    #[test]
    fn metric_lookup_reads_the_named_attribute() {
        let meta = sample_meta();
        assert_eq!(meta.metric(Metric::Nbytes), "1024");
        assert_eq!(meta.metric(Metric::Signature), "98765");
        assert_eq!(meta.metric(Metric::Typename), "granary::Tensor");
    }

    #[test]
    fn simple_form_is_one_labeled_line_per_field() {
        let rendered = sample_meta().to_string();
        assert_eq!(
            rendered,
            "id: 42\ntypename: granary::Tensor\nnbytes: 1024\nsignature: 98765\ninstance_id: 0"
        );
    }

    #[test]
    fn string_values_render_without_quotes() {
        let record = ObjectRecord {
            meta: sample_meta(),
            value: serde_json::Value::String("hello".to_owned()),
        };
        assert_eq!(record.value_repr(), "hello");
    }

    #[test]
    fn structured_values_render_as_json() {
        let record = ObjectRecord {
            meta: sample_meta(),
            value: serde_json::json!([1, 2, 3]),
        };
        assert_eq!(record.value_repr(), "[1,2,3]");
    }
}
