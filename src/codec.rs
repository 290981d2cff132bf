use std::collections::HashMap;
use std::io::{BufReader, Read, Write};

use bitvec::prelude::*;
use log::debug;

use crate::bitstream::{BitSource, BitWriter, Bits, SliceBits};
use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;

/// Symbol to code, as derived from a [`HuffmanTree`].
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: HashMap<Symbol, BitBox<u8, Msb0>>,
}

impl CodeTable {
    pub(crate) fn insert(&mut self, symbol: Symbol, code: BitBox<u8, Msb0>) {
        self.codes.insert(symbol, code);
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> {
        self.codes.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn lookup(&self, symbol: Symbol) -> Result<&BitSlice<u8, Msb0>> {
        self.get(symbol).ok_or(Error::UnknownSymbol(symbol))
    }
}

#[derive(Debug, Clone)]
pub struct Encoder {
    table: CodeTable,
}

impl Encoder {
    pub fn new(table: CodeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Concatenates the code of every byte, then the end-of-payload code.
    pub fn encode(&self, input: &[u8]) -> Result<Bits> {
        let mut out = Bits::new();
        for &b in input {
            out.extend_from_bitslice(self.table.lookup(Symbol::Byte(b))?);
        }
        out.extend_from_bitslice(self.table.lookup(Symbol::PseudoEof)?);

        Ok(out)
    }

    /// Streams the codes for `input` into `out` and returns how many bits
    /// were written.
    pub fn encode_to<R: Read, W: Write>(&self, input: R, out: &mut BitWriter<W>) -> Result<u64> {
        let start = out.bits_written();
        for b in BufReader::new(input).bytes() {
            out.write_bits(self.table.lookup(Symbol::Byte(b?))?)?;
        }
        out.write_bits(self.table.lookup(Symbol::PseudoEof)?)?;

        let written = out.bits_written() - start;
        debug!("encoded payload of {} bits", written);
        Ok(written)
    }
}

/// Walks the tree one bit at a time.
#[derive(Debug, Clone)]
pub struct Decoder {
    tree: HuffmanTree,
}

impl Decoder {
    pub fn new(tree: HuffmanTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn decode_bits(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode_to(&mut SliceBits::new(input), &mut out)?;
        Ok(out)
    }

    /// Writes decoded bytes to `out` until the end-of-payload leaf is
    /// reached, returning the number of bytes written. Bits after the
    /// marker are left unread.
    pub fn decode_to<S: BitSource, W: Write>(&self, input: &mut S, mut out: W) -> Result<u64> {
        let root = self.tree.root();
        if root.is_leaf() {
            // the only code is the empty one
            return match root.symbol() {
                Symbol::PseudoEof => Ok(0),
                _ => Err(Error::InvalidTree("single leaf without end-of-payload marker")),
            };
        }

        let mut written = 0;
        let mut current = root;
        loop {
            let bit = input.read_bit()?.ok_or(Error::TruncatedStream)?;
            let next = current
                .child(bit)
                .ok_or(Error::InvalidTree("walked past a leaf"))?;

            if !next.is_leaf() {
                current = next;
                continue;
            }

            match next.symbol() {
                Symbol::PseudoEof => break,
                Symbol::Byte(b) => {
                    out.write_all(&[b])?;
                    written += 1;
                    current = root;
                }
                Symbol::NotAChar => return Err(Error::InvalidTree("leaf marked as internal")),
            }
        }

        debug!("decoded {} bytes", written);
        Ok(written)
    }
}
