use std::str::Chars;

/// A helper for building a string in-order based on an original string and a
/// series of insertions, deletions, and copies applied to it. It is safe to use
/// with UTF-8 strings as all operations are based on character indices. The
/// methods must be called in-order.
#[derive(Debug, Clone)]
pub struct StringBuilder<'a> {
    original: Chars<'a>,
    buffer: String,
}

impl<'a> StringBuilder<'a> {
    pub fn new(original: &'a str) -> Self {
        StringBuilder {
            original: original.chars(),
            buffer: String::with_capacity(original.len()),
        }
    }

    /// Insert a string at the end of the built buffer.
    pub fn insert(&mut self, text: &str) { self.buffer.push_str(text); }

    /// Skip copying `length` characters from the original string to the built
    /// buffer. Returns the skipped characters, which are fewer than `length`
    /// if the original string runs out.
    pub fn delete(&mut self, length: usize) -> String {
        self.original.by_ref().take(length).collect()
    }

    /// Copy `length` characters from the original string to the built buffer.
    /// Returns the number of characters copied, which is less than `length`
    /// if the original string runs out.
    pub fn retain(&mut self, length: usize) -> usize {
        let mut copied = 0;
        for character in self.original.by_ref().take(length) {
            self.buffer.push(character);
            copied += 1;
        }

        copied
    }

    /// Copy the rest of the original string to the built buffer.
    pub fn retain_rest(&mut self) { self.buffer.extend(self.original.by_ref()); }

    /// Number of characters of the original string not yet consumed.
    pub fn remaining(&self) -> usize { self.original.clone().count() }

    /// Returns the built string.
    pub fn build(self) -> String { self.buffer }
}
