use stable_arena::DroplessArena;

use super::ast::Node;

/// Backing storage for the MathML AST of one conversion.
///
/// The AST is made of plain references into the arena and is dropped together with it.
#[derive(Default)]
pub struct Arena {
    inner: DroplessArena,
}

impl Arena {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<'arena>(&'arena self, node: Node<'arena>) -> &'arena mut Node<'arena> {
        self.inner.alloc(node)
    }

    /// Store the children of a row or script element.
    pub fn push_slice<'arena>(
        &'arena self,
        nodes: &[&'arena Node<'arena>],
    ) -> &'arena [&'arena Node<'arena>] {
        match nodes {
            // `alloc_slice` does not accept empty slices.
            [] => &[],
            nodes => self.inner.alloc_slice(nodes),
        }
    }

    pub fn alloc_str(&self, src: &str) -> &str {
        match src {
            "" => "",
            src => self.inner.alloc_str(src),
        }
    }

    /// Store a single character as a string, for operator glyphs.
    pub fn alloc_char(&self, ch: char) -> &str {
        self.inner.alloc_str(ch.encode_utf8(&mut [0; 4]))
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Arena")
    }
}
