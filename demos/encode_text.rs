use huffman::{huffman, Symbol};

fn main() {
    env_logger::init();

    let s = String::from("Hello my name is Sam!");
    let tree = huffman(s.as_bytes()).expect("frequency map always holds the end marker");
    let (e, d) = tree.into_encoder_decoder_pair();

    let mut codes: Vec<_> = e.table().iter().collect();
    codes.sort_by_key(|(symbol, code)| (code.len(), *symbol));
    for (symbol, code) in codes {
        let bits: String = code.iter().map(|b| if *b { '1' } else { '0' }).collect();
        match symbol {
            Symbol::Byte(b) => println!("{:?}\t{}", b as char, bits),
            other => println!("{}\t{}", other, bits),
        }
    }

    let out = e.encode(s.as_bytes()).unwrap();
    let dec = String::from_utf8(d.decode_bits(&out).unwrap());

    println!("{} bits: {:?}", out.len(), dec);
}
