#![allow(missing_docs)]

mod common;

use bytechipper::{BCError, SpecialPolicy, SpecialSet, tokenizer::ENDOFTEXT};
use common::{SPECIAL, SPECIAL_ID, toy_tokenizer};

#[test]
fn special_tokens_take_primacy() {
    let tokenizer = toy_tokenizer();
    let policy = SpecialPolicy::allow_all();

    let mut expected = tokenizer.encode("a", &policy).unwrap();
    expected.push(SPECIAL_ID);
    expected.extend(tokenizer.encode("b", &policy).unwrap());

    let text = format!("a{SPECIAL}b");
    assert_eq!(tokenizer.encode(&text, &policy).unwrap(), expected);
    assert_eq!(tokenizer.decode(&expected).unwrap(), text);
}

#[test]
fn specials_split_words() {
    let tokenizer = toy_tokenizer();
    let policy = SpecialPolicy::allow_all();

    let text = format!("hello{ENDOFTEXT} world");
    let mut expected = tokenizer.encode_ordinary("hello").unwrap();
    expected.push(50000);
    expected.extend(tokenizer.encode_ordinary(" world").unwrap());
    assert_eq!(tokenizer.encode(&text, &policy).unwrap(), expected);
}

#[test]
fn disallowed_by_default() {
    let tokenizer = toy_tokenizer();
    let text = format!("a{SPECIAL}b");

    match tokenizer.encode(&text, &SpecialPolicy::default()) {
        Err(BCError::DisallowedSpecialToken { token }) => assert_eq!(token, SPECIAL),
        other => panic!("expected DisallowedSpecialToken, got {other:?}"),
    }
    assert!(tokenizer.token_count(&text).is_err());

    // The tokenizer stays usable after a rejected call.
    assert_eq!(tokenizer.token_count("hello").unwrap(), 1);
}

#[test]
fn allowed_subset() {
    let tokenizer = toy_tokenizer();
    let text = format!("{ENDOFTEXT}{SPECIAL}");

    let only_special = SpecialPolicy::default().with_allowed(SpecialSet::only([SPECIAL]));
    assert!(matches!(
        tokenizer.encode(&text, &only_special),
        Err(BCError::DisallowedSpecialToken { token }) if token == ENDOFTEXT
    ));

    let permissive = only_special.with_disallowed(SpecialSet::None);
    let tokens = tokenizer.encode(&text, &permissive).unwrap();
    assert_eq!(tokens.last(), Some(&SPECIAL_ID));
    assert!(!tokens.contains(&50000));
    assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
}

#[test]
fn ordinary_encoding_ignores_specials() {
    let tokenizer = toy_tokenizer();
    let text = format!("a{SPECIAL}b");
    let tokens = tokenizer.encode_ordinary(&text).unwrap();
    assert!(!tokens.contains(&SPECIAL_ID));
    assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
}

#[test]
fn unknown_token_id() {
    let tokenizer = toy_tokenizer();
    match tokenizer.decode(&[999_999_999]) {
        Err(BCError::UnknownTokenId { token }) => assert_eq!(token, 999_999_999),
        other => panic!("expected UnknownTokenId, got {other:?}"),
    }
    assert!(tokenizer.decode(&[b'a' as u32]).is_ok());
}
