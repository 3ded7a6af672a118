use std::collections::hash_map::Values;

use super::Field;

/// [`Headers`] iterator.
///
/// Yields `(name, value)` with the name spelled as it was first inserted.
///
/// [`Headers`]: super::Headers
#[derive(Debug)]
pub struct Iter<'a> {
    inner: Values<'a, String, Field>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(inner: Values<'a, String, Field>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> { }
