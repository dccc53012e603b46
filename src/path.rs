//! Walking into nested values by key and index.

use bytes::Bytes;

use crate::value::Value;

/// One step of a path: a dictionary key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(Bytes),
    Index(usize),
}

impl PathStep {
    fn apply<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match self {
            PathStep::Key(key) => value.get(key),
            PathStep::Index(index) => value.get_index(*index),
        }
    }

    fn apply_mut<'a>(&self, value: &'a mut Value) -> Option<&'a mut Value> {
        match self {
            PathStep::Key(key) => value.get_mut(key),
            PathStep::Index(index) => value.get_index_mut(*index),
        }
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(Bytes::copy_from_slice(key.as_bytes()))
    }
}

impl From<&[u8]> for PathStep {
    fn from(key: &[u8]) -> Self {
        PathStep::Key(Bytes::copy_from_slice(key))
    }
}

impl<const N: usize> From<&[u8; N]> for PathStep {
    fn from(key: &[u8; N]) -> Self {
        PathStep::Key(Bytes::copy_from_slice(key))
    }
}

impl From<Bytes> for PathStep {
    fn from(key: Bytes) -> Self {
        PathStep::Key(key)
    }
}

/// Builds a `Vec<PathStep>` from keys and indices.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, path};
///
/// let torrent = decode(b"d4:infod5:filesld6:lengthi5eeeee").unwrap();
/// let length = torrent.get_path(&path!["info", "files", 0, "length"]);
/// assert_eq!(length.and_then(|v| v.as_integer()), Some(5));
/// ```
#[macro_export]
macro_rules! path {
    ($($step:expr),* $(,)?) => {
        vec![$($crate::PathStep::from($step)),*]
    };
}

/// Result of [`Value::try_path`]: how far the walk got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLookup<'a> {
    /// Number of steps that were satisfied.
    pub matched: usize,
    /// The value reached after `matched` steps.
    pub value: &'a Value,
    complete: bool,
}

impl<'a> PathLookup<'a> {
    /// True when every step was satisfied.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The target value, if the whole path was walked.
    pub fn found(&self) -> Option<&'a Value> {
        self.complete.then_some(self.value)
    }
}

impl Value {
    /// Follows `path` from this value.
    ///
    /// Returns `None` as soon as a step cannot be satisfied: a key step on a
    /// non-dictionary or a missing key, an index step on a non-list or an
    /// index out of range.
    pub fn get_path(&self, path: &[PathStep]) -> Option<&Value> {
        path.iter().try_fold(self, |value, step| step.apply(value))
    }

    pub fn get_path_mut(&mut self, path: &[PathStep]) -> Option<&mut Value> {
        let mut current = self;
        for step in path {
            current = step.apply_mut(current)?;
        }
        Some(current)
    }

    /// Follows `path` as far as possible and reports how many steps matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::{decode, path};
    ///
    /// let value = decode(b"d1:ali1ei2eee").unwrap();
    /// let lookup = value.try_path(&path!["a", 5]);
    /// assert!(!lookup.is_complete());
    /// assert_eq!(lookup.matched, 1);
    /// assert!(lookup.value.is_list());
    /// ```
    pub fn try_path(&self, path: &[PathStep]) -> PathLookup<'_> {
        let mut current = self;
        let mut matched = 0;
        for step in path {
            match step.apply(current) {
                Some(next) => {
                    current = next;
                    matched += 1;
                }
                None => break,
            }
        }
        PathLookup {
            matched,
            value: current,
            complete: matched == path.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    fn sample() -> Value {
        decode(b"d4:infod5:filesld6:lengthi10e4:pathl1:a1:beed6:lengthi20e4:pathl1:ceee4:name3:dire4:listli1ei2eee")
            .unwrap()
    }

    #[test]
    fn test_get_path() {
        let value = sample();
        assert_eq!(
            value
                .get_path(&path!["info", "files", 1, "length"])
                .and_then(|v| v.as_integer()),
            Some(20)
        );
        assert_eq!(
            value
                .get_path(&path!["info", "files", 0, "path", 1])
                .and_then(|v| v.as_str()),
            Some("b")
        );
        assert_eq!(value.get_path(&[]), Some(&value));
    }

    #[test]
    fn test_get_path_misses() {
        let value = sample();
        // Missing key.
        assert!(value.get_path(&path!["info", "missing"]).is_none());
        // Index out of range.
        assert!(value.get_path(&path!["list", 2]).is_none());
        // Index into a dictionary and key into a list.
        assert!(value.get_path(&path!["info", 0]).is_none());
        assert!(value.get_path(&path!["list", "x"]).is_none());
        // Step through a leaf.
        assert!(value.get_path(&path!["list", 0, 0]).is_none());
    }

    #[test]
    fn test_try_path_partial() {
        let value = sample();
        let lookup = value.try_path(&path!["info", "files", 7, "length"]);
        assert_eq!(lookup.matched, 2);
        assert!(!lookup.is_complete());
        assert_eq!(lookup.found(), None);
        assert_eq!(lookup.value.as_list().map(|l| l.len()), Some(2));

        let lookup = value.try_path(&path![b"info", b"name"]);
        assert!(lookup.is_complete());
        assert_eq!(lookup.found().and_then(|v| v.as_str()), Some("dir"));
    }

    #[test]
    fn test_get_path_mut_keeps_canonical_form() {
        let mut value = sample();
        let name = value.get_path_mut(&path!["info", "name"]).unwrap();
        name.replace(Value::Integer(1));

        let files = value.get_path_mut(&path!["info", "files"]).unwrap();
        files.as_list_mut().unwrap().truncate(1);

        assert_eq!(
            crate::encode(&value),
            b"d4:infod5:filesld6:lengthi10e4:pathl1:a1:beee4:namei1ee4:listli1ei2eee".to_vec()
        );
    }
}
