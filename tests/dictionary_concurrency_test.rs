#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use segdict::dictionary::base::BaseDictionary;
    use segdict::dictionary::overlay::OverlayDictionary;
    use segdict::dictionary::{Dictionary, TokenSink, prefixes};
    use segdict::token::{Token, TokenSource};

    const READERS: usize = 8;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn vocabulary() -> Vec<Token> {
        let stems = ["北京大学", "中华人民共和国", "自然语言处理", "机器学习", "云计算平台"];
        (0..400)
            .map(|i| {
                let stem = stems[i % stems.len()];
                Token::new(format!("{stem}{i}"), (i + 1) as f64, "n")
            })
            .collect()
    }

    fn assert_closed(dict: &dyn Dictionary, word: &str) {
        for prefix in prefixes(word) {
            assert!(
                dict.frequency(prefix).is_some(),
                "prefix '{prefix}' of visible word '{word}' is missing"
            );
        }
    }

    #[test]
    fn test_readers_never_see_word_without_prefixes() {
        init_logger();
        let dict = Arc::new(BaseDictionary::new());
        let words = Arc::new(vocabulary());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let dict = Arc::clone(&dict);
                let words = Arc::clone(&words);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        for token in words.iter() {
                            if let Some(freq) = dict.frequency(token.text())
                                && freq != 0.0
                            {
                                assert_eq!(freq, token.frequency());
                                assert_closed(dict.as_ref(), token.text());
                                assert_eq!(dict.pos(token.text()).as_deref(), Some("n"));
                            }
                        }
                    }
                })
            })
            .collect();

        for token in words.iter() {
            dict.add_token(token);
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }

        let expected: f64 = words.iter().map(|t| t.frequency()).sum();
        assert_eq!(dict.total(), expected);
        assert!((dict.log_total() - expected.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_overlay_edits_under_concurrent_lookups() {
        init_logger();
        let base = BaseDictionary::new();
        base.load(vec![Token::new("酒", 5.0, "n"), Token::new("中国", 3.0, "ns")]);
        let overlay = Arc::new(OverlayDictionary::new(Arc::new(base)));
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let overlay = Arc::clone(&overlay);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        let freq = overlay.frequency("酒");
                        assert!(freq == Some(5.0) || freq == Some(9.0), "got {freq:?}");
                        assert_eq!(overlay.frequency("中国"), Some(3.0));
                        if overlay.frequency("葡萄酒").is_some_and(|f| f != 0.0) {
                            assert!(overlay.contains("葡萄"));
                        }
                        let total = overlay.total();
                        assert!(total >= 8.0, "total dropped to {total}");
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            overlay.add_my_token(Token::untagged("酒", 9.0));
            overlay.add_my_token(Token::untagged("葡萄酒", 1.0));
            overlay.del_my_word("酒");
            overlay.del_my_word("葡萄酒");
        }
        done.store(true, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(overlay.frequency("酒"), Some(5.0));
        assert_eq!(overlay.overlay_total(), 0.0);
        assert!((overlay.log_total() - 8.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_load_drains_channel() {
        init_logger();
        let dict = BaseDictionary::new();
        let (tx, rx) = crossbeam_channel::bounded::<Token>(16);

        let producer = thread::spawn(move || {
            for i in 1..=100 {
                tx.send(Token::untagged(format!("词{i}"), i as f64)).unwrap();
            }
        });

        dict.load(rx);
        producer.join().unwrap();

        assert_eq!(dict.word_count(), 100);
        assert_eq!(dict.total(), 5050.0);
        assert!((dict.log_total() - 5050.0_f64.ln()).abs() < 1e-12);
        assert_eq!(dict.frequency("词"), Some(0.0));
        assert_eq!(dict.frequency("词1"), Some(1.0));
    }

    #[test]
    fn test_segmenter_accepts_either_dictionary() {
        fn best_prefix(dict: &dyn Dictionary, text: &str) -> Option<String> {
            let mut best = None;
            for end in text.char_indices().map(|(i, c)| i + c.len_utf8()) {
                let candidate = &text[..end];
                match dict.frequency(candidate) {
                    None => break,
                    Some(freq) if freq > 0.0 => best = Some(candidate.to_string()),
                    Some(_) => {}
                }
            }
            best
        }

        let base = Arc::new(BaseDictionary::new());
        base.add_token(Token::untagged("北京", 5.0));
        base.add_token(Token::untagged("北京大学", 2.0));
        let overlay = OverlayDictionary::new(Arc::clone(&base));
        overlay.add_my_token(Token::untagged("北京大学生", 1.0));

        assert_eq!(best_prefix(base.as_ref(), "北京大学生活").as_deref(), Some("北京大学"));
        assert_eq!(best_prefix(&overlay, "北京大学生活").as_deref(), Some("北京大学生"));
    }
}
