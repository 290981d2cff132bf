use std::cmp::Reverse;
use std::collections::BinaryHeap;

use derivative::Derivative;
use log::{debug, trace};

use crate::bitstream::Bits;
use crate::codec::{CodeTable, Decoder, Encoder};
use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;

/// Nodes compare by `(weight, sequence)` only, which is all the priority
/// queue needs. Equal weights come out in the order they went in.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    weight: u64,

    sequence: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    kind: NodeKind,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Leaf(Symbol),
    Internal { zero: Box<Node>, one: Box<Node> },
}

impl Node {
    fn leaf(symbol: Symbol, weight: u64, sequence: usize) -> Self {
        Self {
            weight,
            sequence,
            kind: NodeKind::Leaf(symbol),
        }
    }

    /// `None` when the combined weight does not fit in a `u64`.
    fn from_children(zero: Node, one: Node, sequence: usize) -> Option<Self> {
        Some(Self {
            weight: zero.weight.checked_add(one.weight)?,
            sequence,
            kind: NodeKind::Internal {
                zero: Box::new(zero),
                one: Box::new(one),
            },
        })
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The leaf's symbol, or [`Symbol::NotAChar`] for an internal node.
    pub fn symbol(&self) -> Symbol {
        match self.kind {
            NodeKind::Leaf(s) => s,
            NodeKind::Internal { .. } => Symbol::NotAChar,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn zero(&self) -> Option<&Node> {
        self.child(false)
    }

    pub fn one(&self) -> Option<&Node> {
        self.child(true)
    }

    /// Follows the branch for `bit`; leaves have no children.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { zero, one } => Some(if bit { one } else { zero }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Greedy construction: repeatedly merge the two lightest nodes until
    /// one remains. The first node removed becomes the zero branch.
    pub fn from_frequencies(freq: &FrequencyMap) -> Result<Self> {
        let mut pq: BinaryHeap<_> = freq
            .iter()
            .enumerate()
            .map(|(i, (symbol, count))| Reverse(Node::leaf(symbol, count, i)))
            .collect();
        let mut sequence = pq.len();

        while pq.len() > 1 {
            let (Some(Reverse(zero)), Some(Reverse(one))) = (pq.pop(), pq.pop()) else {
                break;
            };
            let merged = Node::from_children(zero, one, sequence)
                .ok_or(Error::InvalidInput("counts overflow"))?;
            pq.push(Reverse(merged));
            sequence += 1;
        }

        let root = pq
            .pop()
            .map(|r| r.0)
            .ok_or(Error::InvalidInput("empty frequency map"))?;
        let tree = Self { root };
        debug!(
            "built tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match &node.kind {
                NodeKind::Leaf(_) => 1,
                NodeKind::Internal { zero, one } => count(zero) + count(one),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match &node.kind {
                NodeKind::Leaf(_) => 0,
                NodeKind::Internal { zero, one } => 1 + depth(zero).max(depth(one)),
            }
        }
        depth(&self.root)
    }

    /// Records the root-to-leaf path of every leaf. A tree that is a single
    /// leaf gives that symbol the empty code.
    pub fn code_table(&self) -> CodeTable {
        fn traverse(node: &Node, path: &mut Bits, table: &mut CodeTable) {
            match &node.kind {
                NodeKind::Leaf(symbol) => {
                    table.insert(*symbol, path.clone().into_boxed_bitslice());
                }
                NodeKind::Internal { zero, one } => {
                    path.push(false);
                    traverse(zero, path, table);
                    path.pop();

                    path.push(true);
                    traverse(one, path, table);
                    path.pop();
                }
            }
        }

        let mut path = Bits::new();
        let mut table = CodeTable::default();
        traverse(&self.root, &mut path, &mut table);
        trace!("code table: {:?}", table);
        table
    }

    pub fn into_encoder_decoder_pair(self) -> (Encoder, Decoder) {
        let encoder = Encoder::new(self.code_table());
        (encoder, Decoder::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(b: u8) -> Symbol {
        Symbol::Byte(b)
    }

    #[test]
    fn node_from_children() {
        let zero = Node::leaf(sym(b'a'), 2, 0);
        let one = Node::leaf(sym(b'b'), 3, 1);

        let n = Node::from_children(zero, one, 2).unwrap();

        assert_eq!(n.weight(), 5);
        assert_eq!(n.symbol(), Symbol::NotAChar);
        assert_eq!(n.zero().unwrap().symbol(), sym(b'a'));
        assert_eq!(n.one().unwrap().symbol(), sym(b'b'));
        assert!(n.zero().unwrap().is_leaf());
    }

    #[test]
    fn node_compare_ignores_payload() {
        let a = Node::leaf(sym(1), 4, 0);
        let b = Node::leaf(sym(2), 4, 0);

        assert_eq!(a, b);
    }

    #[test]
    fn node_compare_ordering() {
        for i in 1..=1000 {
            let a = Node::leaf(sym(0), i, 5);
            let b = Node::leaf(sym(0), i + 1, 0);
            let c = Node::leaf(sym(0), i, 6);

            assert!(a < b);
            assert!(a < c);
        }
    }

    #[test]
    fn empty_map_is_rejected() {
        assert!(matches!(
            HuffmanTree::from_frequencies(&FrequencyMap::new()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn node_from_children_overflow() {
        let zero = Node::leaf(sym(b'a'), u64::MAX, 0);
        let one = Node::leaf(sym(b'b'), 1, 1);

        assert!(Node::from_children(zero, one, 2).is_none());
    }

    #[test]
    fn overflowing_counts_are_rejected() {
        let mut freq = FrequencyMap::new();
        freq.put(sym(b'a'), u64::MAX);
        freq.put(sym(b'b'), 1);
        freq.put(Symbol::PseudoEof, 1);

        assert!(matches!(
            HuffmanTree::from_frequencies(&freq),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn single_symbol_tree_is_a_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&[])).unwrap();

        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().symbol(), Symbol::PseudoEof);
        assert_eq!(tree.depth(), 0);

        let table = tree.code_table();
        assert_eq!(table.len(), 1);
        assert!(table.get(Symbol::PseudoEof).unwrap().is_empty());
    }

    #[test]
    fn aabbbc_shape() {
        let freq = FrequencyMap::from_text("aabbbc");
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();

        assert_eq!(tree.root().weight(), 7);
        assert_eq!(tree.leaf_count(), 4);

        // c and the marker merge first, then a joins them, then b
        let table = tree.code_table();
        let code = |s: Symbol| -> String {
            table
                .get(s)
                .unwrap()
                .iter()
                .map(|b| if *b { '1' } else { '0' })
                .collect()
        };
        assert_eq!(code(sym(b'b')), "0");
        assert_eq!(code(sym(b'a')), "10");
        assert_eq!(code(sym(b'c')), "110");
        assert_eq!(code(Symbol::PseudoEof), "111");
    }

    #[test]
    fn equal_maps_build_equal_codes() {
        let a = FrequencyMap::from_text("abcdefgh abcdefgh");
        let b: FrequencyMap = a.to_string().parse().unwrap();

        let ta = HuffmanTree::from_frequencies(&a).unwrap().code_table();
        let tb = HuffmanTree::from_frequencies(&b).unwrap().code_table();

        assert_eq!(ta.len(), tb.len());
        for (symbol, code) in ta.iter() {
            assert_eq!(Some(code), tb.get(symbol));
        }
    }

    #[test]
    fn every_symbol_gets_a_leaf() {
        let freq = FrequencyMap::from_bytes(&(0..=255).collect::<Vec<u8>>());
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();

        assert_eq!(tree.leaf_count(), 257);
        let table = tree.code_table();
        for s in freq.keys() {
            assert!(table.get(s).is_some());
        }
    }
}
