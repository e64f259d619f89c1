// Copyright (C) 2020-2026 Andy Kurnia.

mod common;

use kanagram::{alphabet, error, lexport};

fn tiles(alphabet: &alphabet::Alphabet, s: &str) -> Vec<u8> {
    s.chars().map(|c| alphabet.letter_of(c).unwrap()).collect()
}

#[test]
fn text_and_binary_files_load_the_same_index() {
    let alphabet = alphabet::make_english_alphabet();
    let text_path = common::temp_path("words.txt");
    let bin_path = common::temp_path("words.kana");
    std::fs::write(&text_path, common::WORDS).unwrap();
    let from_text = lexport::load_index(&alphabet, &text_path).unwrap();
    std::fs::write(&bin_path, lexport::to_bytes(&from_text)).unwrap();
    let from_bin = lexport::load_index(&alphabet, &bin_path).unwrap();

    assert_eq!(from_text.num_words(), from_bin.num_words());
    assert_eq!(from_text.word_products(), from_bin.word_products());
    assert_eq!(from_text.blank_products(), from_bin.blank_products());
    assert_eq!(
        from_text.double_blank_products(),
        from_bin.double_blank_products()
    );
    for p in from_text.word_products() {
        assert_eq!(from_text.group(p), from_bin.group(p));
    }
    for p in from_text.double_blank_products() {
        assert_eq!(
            from_text.words(p, 2).collect::<Vec<_>>(),
            from_bin.words(p, 2).collect::<Vec<_>>()
        );
    }
    // writing the loaded index gives the same bytes
    assert_eq!(lexport::to_bytes(&from_text), lexport::to_bytes(&from_bin));

    std::fs::remove_file(&text_path).unwrap();
    std::fs::remove_file(&bin_path).unwrap();
}

#[test]
fn queries_find_anagrams_through_blanks() {
    let alphabet = alphabet::make_english_alphabet();
    let index = common::english_index();
    assert!(index.contains_word(&tiles(&alphabet, "STONE")));
    assert!(!index.contains_word(&tiles(&alphabet, "SETNO")));

    // STONE, NOTES, ONSET in file order
    let p = index.product_of(&tiles(&alphabet, "ENOST")).unwrap();
    let group = index
        .group(p)
        .iter()
        .map(|word| alphabet.fmt_word(word))
        .collect::<Vec<_>>();
    assert_eq!(group, ["NOTES", "STONE", "ONSET"]);

    // ?EINRST: the blank can only be an A
    let p = index.product_of(&tiles(&alphabet, "EINRST")).unwrap();
    assert_eq!(index.blanks(p), &[alphabet.letter_of('A').unwrap()]);
    assert_eq!(index.words(p, 1).count(), 4);

    // ?? alone completes every two-letter word
    let two_letter_words = common::WORDS
        .lines()
        .filter(|line| line.len() == 2)
        .count();
    assert_eq!(index.words(1, 2).count(), two_letter_words);
    assert_eq!(index.words(1, 3).count(), 0);
}

#[test]
fn broken_inputs_are_errors() {
    let alphabet = alphabet::make_english_alphabet();
    let err = lexport::build_from_text(&alphabet, "CAT\nC4T\n")
        .err()
        .unwrap();
    assert_eq!(error::kind_of(&err), Some(error::ErrorKind::BadTile));
    let err = lexport::build_from_text(&alphabet, &"Z".repeat(26))
        .err()
        .unwrap();
    assert_eq!(error::kind_of(&err), Some(error::ErrorKind::WordTooLong));

    let bin = lexport::to_bytes(&common::english_index());
    let err = lexport::from_bytes(&alphabet, &bin[..bin.len() - 3])
        .err()
        .unwrap();
    assert_eq!(error::kind_of(&err), Some(error::ErrorKind::BadRecord));
    let err = lexport::load_index(&alphabet, &common::temp_path("missing.kana"))
        .err()
        .unwrap();
    assert_eq!(error::kind_of(&err), Some(error::ErrorKind::Io));
}
