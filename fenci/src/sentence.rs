/// Maintainer of an input sentence split into atomic units.
///
/// An atomic unit is either one non-Latin character or one maximal
/// run of Latin-range letters and digits, lower-cased. A character
/// belongs to a run iff it is a Unicode letter or digit whose UTF-8
/// encoding takes at most 2 bytes, so CJK ideographs always stand
/// alone while ASCII words and numbers coalesce.
#[derive(Default, Clone, Debug)]
pub(crate) struct Sentence {
    input: String,
    norm: String,
    chars: Vec<char>,
    u2c: Vec<usize>,
    u2b: Vec<usize>,
    u2n: Vec<usize>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.input.clear();
        self.norm.clear();
        self.chars.clear();
        self.u2c.clear();
        self.u2b.clear();
        self.u2n.clear();
    }

    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        self.input.push_str(input.as_ref());
        self.compile();
    }

    fn compile(&mut self) {
        self.u2c.push(0);
        self.u2b.push(0);
        self.u2n.push(0);

        // Take the input out so boundary records can be pushed while
        // scanning it.
        let input = std::mem::take(&mut self.input);

        // Raw byte offset where the pending alphanumeric run begins.
        let mut run_start = None;
        for (bi, ch) in input.char_indices() {
            if ch.len_utf8() <= 2 && ch.is_alphanumeric() {
                if run_start.is_none() {
                    run_start = Some(bi);
                }
                self.norm.push(ch.to_ascii_lowercase());
                self.chars.push(ch.to_ascii_lowercase());
            } else {
                if run_start.take().is_some() {
                    self.close_unit(bi);
                }
                self.norm.push(ch);
                self.chars.push(ch);
                self.close_unit(bi + ch.len_utf8());
            }
        }
        if run_start.is_some() {
            self.close_unit(input.len());
        }
        self.input = input;
    }

    fn close_unit(&mut self, end_byte: usize) {
        self.u2c.push(self.chars.len());
        self.u2b.push(end_byte);
        self.u2n.push(self.norm.len());
    }

    /// Returns the number of atomic units.
    #[inline(always)]
    pub fn len_units(&self) -> usize {
        self.u2b.len() - 1
    }

    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }

    /// Returns the lower-cased text of the whole sentence.
    #[inline(always)]
    pub fn normalized(&self) -> &str {
        &self.norm
    }

    /// Returns the lower-cased characters of the whole sentence.
    #[inline(always)]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns the raw byte offset of the `pos_unit`-th unit boundary.
    #[inline(always)]
    pub fn byte_position(&self, pos_unit: usize) -> usize {
        self.u2b[pos_unit]
    }

    /// Returns the byte offset in [`Self::normalized()`] of the
    /// `pos_unit`-th unit boundary.
    #[inline(always)]
    pub fn norm_position(&self, pos_unit: usize) -> usize {
        self.u2n[pos_unit]
    }

    /// Returns the character offset of the `pos_unit`-th unit boundary.
    #[inline(always)]
    pub fn char_position(&self, pos_unit: usize) -> usize {
        self.u2c[pos_unit]
    }

    /// Maps a character offset back to a unit boundary, or `None`
    /// when the offset falls inside a unit.
    #[inline(always)]
    pub fn unit_at_char(&self, pos_char: usize) -> Option<usize> {
        self.u2c.binary_search(&pos_char).ok()
    }

    /// Returns the lower-cased text of the `pos_unit`-th unit.
    #[inline(always)]
    pub fn unit_str(&self, pos_unit: usize) -> &str {
        &self.norm[self.u2n[pos_unit]..self.u2n[pos_unit + 1]]
    }
}
