//! Key input from byte streams.
//!
//! Thin wrappers that pull a whole key out of a reader, bounded by
//! [`RadixConfig::max_key_size`](crate::RadixConfig), and hand it to the slice-based
//! operations.

use std::io::Read;

use crate::node::NodeId;
use crate::node_ref::NodeRef;
use crate::trie::Removed;
use crate::{Error, Radix, Result};

/// Reads `reader` to the end, accepting between 1 and `max_key_size` bytes.
pub(crate) fn read_key<R: Read>(reader: R, max_key_size: usize) -> Result<Vec<u8>> {
    let mut key = Vec::new();
    let limit = (max_key_size as u64).saturating_add(1);
    reader
        .take(limit)
        .read_to_end(&mut key)
        .map_err(|e| Error::Io(e.kind()))?;

    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    if key.len() > max_key_size {
        return Err(Error::KeyTooLong { max: max_key_size });
    }
    Ok(key)
}

impl<V> Radix<V> {
    /// Reads a key from `reader` and inserts `value` under it.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::{Error, Radix, RadixConfig};
    ///
    /// let mut tree = Radix::with_config(RadixConfig::default().with_max_key_size(8));
    /// tree.insert_reader("nl.miek".as_bytes(), 1).unwrap();
    /// assert_eq!(tree.get("nl.miek"), Some(&1));
    ///
    /// let err = tree.insert_reader("nl.miek.www".as_bytes(), 2).unwrap_err();
    /// assert_eq!(err, Error::KeyTooLong { max: 8 });
    /// ```
    pub fn insert_reader<R: Read>(&mut self, reader: R, value: V) -> Result<NodeId> {
        let key = read_key(reader, self.config().max_key_size)?;
        self.insert(&key, value).ok_or(Error::InvalidKey)
    }

    /// Reads a key from `reader` and looks it up like [`find`](Radix::find).
    pub fn find_reader<R: Read>(&self, reader: R) -> Result<(Option<NodeRef<'_, V>>, bool)> {
        let key = read_key(reader, self.config().max_key_size)?;
        Ok(self.find(&key))
    }

    /// Reads a key from `reader` and removes it like [`remove`](Radix::remove).
    pub fn remove_reader<R: Read>(&mut self, reader: R) -> Result<Option<Removed<V>>> {
        let key = read_key(reader, self.config().max_key_size)?;
        Ok(self.remove(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"))
        }
    }

    #[test]
    fn test_read_key() {
        assert_eq!(read_key(&b"tester"[..], 512).unwrap(), b"tester");
        assert_eq!(read_key(&b"tester"[..], 6).unwrap(), b"tester");
    }

    #[test]
    fn test_read_key_errors() {
        assert_eq!(read_key(&b""[..], 512), Err(Error::InvalidKey));
        assert_eq!(read_key(&b"tester"[..], 5), Err(Error::KeyTooLong { max: 5 }));
        assert_eq!(
            read_key(Broken, 512),
            Err(Error::Io(io::ErrorKind::ConnectionReset))
        );
    }

    #[test]
    fn test_reader_operations() {
        let mut tree = Radix::new();
        let mut input = io::Cursor::new(b"slow".to_vec());
        let id = tree.insert_reader(&mut input, "bb").unwrap();
        assert_eq!(tree.node(id).unwrap().key(), b"slow");

        let (node, exact) = tree.find_reader(&b"slow"[..]).unwrap();
        assert!(exact);
        assert_eq!(node.unwrap().value(), Some(&"bb"));

        let removed = tree.remove_reader(&b"slow"[..]).unwrap().unwrap();
        assert_eq!(removed.value, "bb");
        assert!(tree.remove_reader(&b"slow"[..]).unwrap().is_none());
        assert_eq!(tree.insert_reader(&b""[..], "cc"), Err(Error::InvalidKey));
        assert!(tree.is_empty());
    }
}
