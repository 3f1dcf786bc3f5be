use crate::error::{Error, ErrorKind};
use indexmap::IndexMap;

/// Symbol table built by pass 1: label name to instruction index.
/// Insertion order is kept so listings print labels in source order.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, u16>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to an instruction index. Redefinition is an error: a
    /// device image with a silently moved label is worse than no image.
    pub fn insert(&mut self, name: &str, index: u16, line: usize) -> Result<(), Error> {
        if self.labels.contains_key(name) {
            return Err(Error::new(
                line,
                name,
                ErrorKind::RedefinedLabel(name.to_string()),
            ));
        }
        self.labels.insert(name.to_string(), index);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut labels = Labels::new();
        labels.insert("main", 0, 1).unwrap();
        labels.insert("loop", 2, 4).unwrap();
        assert_eq!(labels.get("loop"), Some(2));
        assert_eq!(labels.get("end"), None);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn redefinition_is_an_error() {
        let mut labels = Labels::new();
        labels.insert("main", 0, 1).unwrap();
        let err = labels.insert("main", 3, 7).unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(err.kind, ErrorKind::RedefinedLabel("main".to_string()));
        // the original binding survives
        assert_eq!(labels.get("main"), Some(0));
    }
}
