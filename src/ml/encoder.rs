use crate::ml::ModelError;
use serde::{Deserialize, Serialize};

/// Maps each distinct label to a code in `0..n`. Codes follow the sorted
/// order of the labels, so fitting is independent of row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    field: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(field: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();

        Self {
            field: field.to_string(),
            classes,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Unseen labels are an error; there is no default code.
    pub fn transform(&self, label: &str) -> Result<usize, ModelError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| ModelError::UnknownLabel {
                field: self.field.clone(),
                label: label.to_string(),
            })
    }

    pub fn inverse(&self, code: usize) -> Result<&str, ModelError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| ModelError::UnknownCode {
                field: self.field.clone(),
                code,
            })
    }

    /// `classes` must stay sorted and unique for `transform` to be a bijection.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.classes.windows(2).all(|w| w[0] < w[1])
    }
}
