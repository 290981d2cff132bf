//! Compressed layout: the frequency map header text, immediately followed by
//! the packed payload bits.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::codec::{Decoder, Encoder};
use crate::error::Result;
use crate::frequency::FrequencyMap;
use crate::naming::{compressed_path, decompressed_path};
use crate::tree::HuffmanTree;

/// Outcome of [`compress_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub path: PathBuf,
    pub payload_bits: u64,
}

/// Outcome of [`decompress_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Writes the header for `freq` and the encoding of `input` to `out`.
/// `freq` must have been counted over the same input. Returns the payload
/// length in bits.
pub fn write_compressed<R: Read, W: Write>(
    freq: &FrequencyMap,
    input: R,
    mut out: W,
) -> Result<u64> {
    let encoder = Encoder::new(HuffmanTree::from_frequencies(freq)?.code_table());

    write!(out, "{}", freq)?;
    let mut bits = BitWriter::new(out);
    let n = encoder.encode_to(input, &mut bits)?;
    bits.finish()?;

    Ok(n)
}

/// Reads a header and payload from `input` and writes the decoded bytes to
/// `out`. Returns the number of bytes written.
pub fn read_compressed<R: BufRead, W: Write>(mut input: R, out: W) -> Result<u64> {
    let freq = FrequencyMap::read_header(&mut input)?;
    let decoder = Decoder::new(HuffmanTree::from_frequencies(&freq)?);

    decoder.decode_to(&mut BitReader::new(input), out)
}

pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let freq = FrequencyMap::from_bytes(input);
    let mut out = Vec::new();
    write_compressed(&freq, input, &mut out)?;
    Ok(out)
}

pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    read_compressed(input, &mut out)?;
    Ok(out)
}

/// Compresses `path` into `path.huf`, reading the input twice: once to count
/// and once to encode.
pub fn compress_file<P: AsRef<Path>>(path: P) -> Result<Compressed> {
    let path = path.as_ref();
    let freq = FrequencyMap::from_reader(File::open(path)?)?;

    let out_path = compressed_path(path);
    let input = File::open(path)?;
    let mut out = BufWriter::new(File::create(&out_path)?);
    let payload_bits = write_compressed(&freq, input, &mut out)?;
    out.flush()?;

    debug!(
        "compressed {:?} into {:?} ({} payload bits)",
        path, out_path, payload_bits
    );
    Ok(Compressed {
        path: out_path,
        payload_bits,
    })
}

/// Decompresses `name.ext.huf` into `name_unc.ext`.
pub fn decompress_file<P: AsRef<Path>>(path: P) -> Result<Decompressed> {
    let path = path.as_ref();
    let out_path = decompressed_path(path)?;

    let input = BufReader::new(File::open(path)?);
    let mut out = BufWriter::new(File::create(&out_path)?);
    let bytes = read_compressed(input, &mut out)?;
    out.flush()?;

    debug!("decompressed {:?} into {:?} ({} bytes)", path, out_path, bytes);
    Ok(Decompressed {
        path: out_path,
        bytes,
    })
}
