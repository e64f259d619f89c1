// Copyright (C) 2020-2026 Andy Kurnia.

use kanagram::{alphabet, error, lexport};

fn usage() -> error::Returns<()> {
    Err("usage: buildlex <words.txt> <out.kana>\n       buildlex words <in.kana> <out.txt>".into())
}

fn write_words(in_path: &str, out_path: &str) -> error::Returns<()> {
    let english_alphabet = alphabet::make_english_alphabet();
    let index = lexport::load_index(&english_alphabet, in_path)?;
    let mut words = index.all_words().to_vec();
    words.sort_unstable();
    let mut giant_string = String::new();
    for word in words.iter() {
        giant_string.push_str(&english_alphabet.fmt_word(word));
        giant_string.push('\n');
    }
    std::fs::write(out_path, giant_string)?;
    log::info!("wrote {} words to {}", words.len(), out_path);
    Ok(())
}

pub fn main() -> error::Returns<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .map_err(|e| e.to_string())?;
    let args = std::env::args().collect::<Vec<_>>();
    let t0 = std::time::Instant::now();
    if args.len() == 3 {
        let english_alphabet = alphabet::make_english_alphabet();
        let index = lexport::build_from_text(
            &english_alphabet,
            &std::fs::read_to_string(&args[1])?,
        )?;
        let bin = lexport::to_bytes(&index);
        std::fs::write(&args[2], &bin)?;
        log::info!(
            "{} words in {} anagram sets, {} bytes",
            index.num_words(),
            index.word_products().len(),
            bin.len()
        );
    } else if args.len() == 4 && args[1] == "words" {
        write_words(&args[2], &args[3])?;
    } else {
        return usage();
    }
    println!("time taken: {:?}", t0.elapsed());
    Ok(())
}
