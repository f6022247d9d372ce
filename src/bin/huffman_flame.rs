use huffcode::{HuffmanDecoder, HuffmanEncoder, HuffmanTree};

fn main() {
    let input = (0..10000u32)
        .map(|i| b"aaaabbbccd"[(i % 10) as usize])
        .collect::<Vec<_>>();
    let tree = match HuffmanTree::from_text(&input) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    for _ in 0..1000 {
        let bits = HuffmanEncoder::new(&tree)
            .encode_text(&input)
            .expect("input is drawn from the alphabet");
        let output = HuffmanDecoder::new(&tree)
            .decode_text(&bits)
            .expect("encoder output decodes");
        assert_eq!(output.len(), input.len());
    }
}
