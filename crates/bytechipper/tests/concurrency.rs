#![allow(missing_docs)]

mod common;

use std::{
    sync::{
        Arc,
        Barrier,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use bytechipper::{
    BCError,
    SpecialPolicy,
    Tokenizer,
    get_encoding,
    register_model_alias,
    register_scheme,
    registry::EncodingRegistry,
};
use common::{SAMPLES, toy_descriptor, toy_tokenizer};
use serial_test::serial;

#[test]
fn concurrent_encodes_match_serial() {
    const THREADS: usize = 64;

    let tokenizer = Arc::new(toy_tokenizer());
    let inputs: Vec<String> = (0..THREADS)
        .map(|i| format!("{} {i}", SAMPLES[i % SAMPLES.len()]))
        .collect();
    let serial: Vec<Vec<u32>> = inputs
        .iter()
        .map(|text| tokenizer.encode(text, &SpecialPolicy::default()).unwrap())
        .collect();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = inputs
        .into_iter()
        .map(|text| {
            let tokenizer = tokenizer.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                tokenizer.encode(&text, &SpecialPolicy::default()).unwrap()
            })
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(&serial) {
        assert_eq!(&handle.join().unwrap(), expected);
    }
}

#[test]
fn batch_encode_matches_serial() {
    let tokenizer = toy_tokenizer();
    let batch = tokenizer.encode_batch(SAMPLES, &SpecialPolicy::default()).unwrap();
    for (text, tokens) in SAMPLES.iter().zip(&batch) {
        assert_eq!(&tokenizer.encode_ordinary(text).unwrap(), tokens);
    }
    assert_eq!(tokenizer.decode_batch(&batch).unwrap(), SAMPLES);
}

fn assert_single_flight(
    get: impl Fn() -> Arc<Tokenizer<u32>> + Send + Sync + 'static,
    calls: &AtomicUsize,
) {
    const CALLERS: usize = 16;
    let get = Arc::new(get);
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let get = get.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (*get)()
            })
        })
        .collect();

    let tokenizers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for tokenizer in &tokenizers[1..] {
        assert!(Arc::ptr_eq(&tokenizers[0], tokenizer));
    }
}

#[test]
fn registry_constructs_once() {
    let registry = Arc::new(EncodingRegistry::default());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    registry.register_scheme("scheme_x", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        // Widen the window in which other callers arrive mid-construction.
        thread::sleep(Duration::from_millis(50));
        Ok(toy_descriptor("scheme_x"))
    });

    let getter = registry.clone();
    assert_single_flight(move || getter.get_encoding("scheme_x").unwrap(), &calls);
}

#[test]
#[serial]
fn global_registry_constructs_once() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    register_scheme("concurrency_scheme_x", || {
        CALLS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        Ok(toy_descriptor("concurrency_scheme_x"))
    });
    register_model_alias("concurrency-model", "concurrency_scheme_x");

    assert_single_flight(|| get_encoding("concurrency_scheme_x").unwrap(), &CALLS);

    let by_model = bytechipper::encoding_for_model("concurrency-model").unwrap();
    assert!(Arc::ptr_eq(&by_model, &get_encoding("concurrency_scheme_x").unwrap()));
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn global_registry_unknown_names() {
    match get_encoding("no_such_scheme") {
        Err(BCError::UnknownEncoding { name, available }) => {
            assert_eq!(name, "no_such_scheme");
            assert!(available.contains(&"cl100k_base".to_string()));
            assert!(available.windows(2).all(|w| w[0] <= w[1]));
        }
        other => panic!("expected UnknownEncoding, got {other:?}"),
    }
    assert!(matches!(
        bytechipper::encoding_for_model("no-such-model"),
        Err(BCError::UnknownModel(_))
    ));
}
