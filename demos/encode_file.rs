use std::env;
use std::fs;

fn main() {
    env_logger::init();

    let fp = env::args()
        .nth(1)
        .expect("Please provide path to input file as first argument.");

    let original = fs::metadata(&fp).expect("First argument was not a valid filepath.").len();

    let compressed = huffman::compress_file(&fp).unwrap();
    let packed = fs::metadata(&compressed.path).unwrap().len();
    println!(
        "{} -> {}: {} -> {} bytes ({} payload bits)",
        fp,
        compressed.path.display(),
        original,
        packed,
        compressed.payload_bits
    );

    let decompressed = huffman::decompress_file(&compressed.path).unwrap();
    println!(
        "{} -> {}: {} bytes",
        compressed.path.display(),
        decompressed.path.display(),
        decompressed.bytes
    );
}
