use slab::Slab;
use std::{collections::BTreeMap, ops::Range};

type NodeId = usize;

/// A prefix tree mapping character sequences to actions.
///
/// The nodes live in a single [`Slab`] owned by the trie so that there are no back-references
/// between them: a node only knows the ids of its children. The trie never invokes the actions it
/// stores, it only hands them back along with the span of input they matched.
#[derive(Clone, Debug)]
pub struct Trie<A> {
    nodes: Slab<TrieNode<A>>,
    root: NodeId,
    patterns: usize,
}

#[derive(Clone, Debug)]
struct TrieNode<A> {
    action: Option<A>,
    children: BTreeMap<char, NodeId>,
}

impl<A> TrieNode<A> {
    fn new() -> Self {
        Self {
            action: None,
            children: BTreeMap::new(),
        }
    }
}

/// The result of a successful [`Trie::get()`].
#[derive(Debug, PartialEq)]
pub struct TrieMatch<'trie, A> {
    action: &'trie A,
    span: Range<usize>,
}

impl<'trie, A> TrieMatch<'trie, A> {
    #[inline]
    pub fn action(&self) -> &'trie A {
        self.action
    }

    /// The byte range of the matched pattern, relative to the searched input.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.span.end - self.span.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

impl<A> Default for Trie<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Trie<A> {
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(TrieNode::new());
        Self {
            nodes,
            root,
            patterns: 0,
        }
    }

    /// Attach `action` to `pattern`, returning the action it replaces if there was one.
    ///
    /// The empty pattern lands on the root node, which [`Trie::get()`] never reports since a
    /// match always consumes at least one character.
    pub fn set(&mut self, pattern: &str, action: A) -> Option<A> {
        let mut node = self.root;
        for character in pattern.chars() {
            node = match self.nodes[node].children.get(&character) {
                Some(child) => *child,
                None => {
                    let child = self.nodes.insert(TrieNode::new());
                    self.nodes[node].children.insert(character, child);
                    child
                }
            };
        }

        let previous = self.nodes[node].action.replace(action);
        if previous.is_none() {
            self.patterns += 1;
        }
        previous
    }

    /// Walk the trie over `input`.
    ///
    /// When `greedy` is set, the walk goes on past the first node carrying an action and reports
    /// the last one it saw (longest match). Otherwise it stops on the first action it meets.
    pub fn get(&self, input: &str, greedy: bool) -> Option<TrieMatch<'_, A>> {
        let mut node = self.root;
        let mut found = None;
        for (offset, character) in input.char_indices() {
            let Some(child) = self.nodes[node].children.get(&character) else {
                break;
            };
            node = *child;

            if let Some(action) = &self.nodes[node].action {
                found = Some(TrieMatch {
                    action,
                    span: 0..offset + character.len_utf8(),
                });
                if !greedy {
                    break;
                }
            }
        }
        found
    }

    pub fn contains(&self, pattern: &str) -> bool {
        let mut node = self.root;
        for character in pattern.chars() {
            match self.nodes[node].children.get(&character) {
                Some(child) => node = *child,
                None => return false,
            }
        }
        self.nodes[node].action.is_some()
    }

    /// The number of patterns carrying an action.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns == 0
    }
}
