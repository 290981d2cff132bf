//! Huffman coding of byte streams.
//!
//! Compression counts byte frequencies, builds a prefix tree from them and
//! writes the frequency map as a text header followed by the bit-packed
//! payload. Decompression reads the header back, rebuilds the same tree and
//! walks it bit by bit until the end-of-payload marker.
//!
//! ```
//! let packed = huffman::compress(b"aabbbc").unwrap();
//! assert!(packed.starts_with(b"{97:2, 98:3, 99:1, 256:1}"));
//! assert_eq!(huffman::decompress(&packed).unwrap(), b"aabbbc");
//! ```

pub mod bitstream;
pub mod codec;
pub mod compress;
pub mod error;
pub mod frequency;
mod header;
pub mod naming;
pub mod symbol;
pub mod tree;

pub use bitstream::{BitReader, BitSource, BitWriter, Bits, SliceBits};
pub use codec::{CodeTable, Decoder, Encoder};
pub use compress::{
    compress, compress_file, decompress, decompress_file, read_compressed, write_compressed,
    Compressed, Decompressed,
};
pub use error::{Error, Result};
pub use frequency::FrequencyMap;
pub use naming::{compressed_path, decompressed_path};
pub use symbol::{Symbol, NOT_A_CHAR, PSEUDO_EOF};
pub use tree::{HuffmanTree, Node, NodeKind};

/// Counts `symbols` and builds their tree in one step.
pub fn huffman(symbols: &[u8]) -> Result<HuffmanTree> {
    HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(symbols))
}
