#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: Payload,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: Payload) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: Payload) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: Payload) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: Payload) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Total body bytes written by one iteration
    pub fn total_bytes(&self) -> u64 {
        (self.payload.chunk.len() * self.payload.chunks) as u64
    }
}

/// A response body written as `chunks` writes of `chunk`
#[derive(Debug, Copy, Clone)]
pub struct Payload {
    chunk: &'static [u8],
    chunks: usize,
}

impl Payload {
    pub const fn new(chunk: &'static [u8], chunks: usize) -> Self {
        Self { chunk, chunks }
    }

    pub fn chunk(&self) -> &'static [u8] {
        self.chunk
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}
