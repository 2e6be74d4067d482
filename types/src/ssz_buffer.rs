/// Offset bookkeeping for serializing SSZ containers with variable-size
/// fields. Fixed fields and 4-byte offsets are appended in declaration order;
/// each variable field's payload goes to a heap that is appended after the
/// fixed part.
pub(crate) struct SszBuffer {
    fixed: Vec<u8>,
    heap: Vec<u8>,
    fixed_length: usize,
}

impl SszBuffer {
    pub fn new(fixed_length: usize) -> Self {
        Self {
            fixed: Vec::with_capacity(fixed_length),
            heap: Vec::new(),
            fixed_length,
        }
    }

    pub fn write_fixed(&mut self, bytes: &[u8]) {
        self.fixed.extend_from_slice(bytes);
    }

    /// Direct access to the fixed part for containers that write themselves.
    pub fn fixed_mut(&mut self) -> &mut Vec<u8> {
        &mut self.fixed
    }

    pub fn write_u8(&mut self, value: u8) {
        self.fixed.push(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.fixed.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes the offset of the next variable field and fills its payload
    /// from the closure.
    pub fn write_variable(&mut self, fill: impl FnOnce(&mut Vec<u8>)) {
        let offset = self.fixed_length + self.heap.len();
        let offset = u32::try_from(offset).expect("SSZ offset fits in u32");
        self.fixed.extend_from_slice(&offset.to_le_bytes());
        fill(&mut self.heap);
    }

    pub fn finish(mut self) -> Vec<u8> {
        assert_eq!(
            self.fixed.len(),
            self.fixed_length,
            "fixed part size does not match the declared layout",
        );

        self.fixed.append(&mut self.heap);
        self.fixed
    }
}
