//! Independent derivations on separate threads.

use std::{sync::Arc, thread};

use keystream_core::{DeriveParams, HmacAlgorithm, Prf, PrfSelector, Reader, derive};

#[test]
fn parallel_derivations_agree() {
    let params = DeriveParams::new().with_iterations(64).with_prf(HmacAlgorithm::Sha512);
    let expected = derive("password", "salt", 200, &params).expect("derive");

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| derive("password", "salt", 200, &params).expect("derive")))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

#[test]
fn readers_move_across_threads() {
    let params = DeriveParams::new().with_iterations(8);
    let expected = derive("password", "salt", 96, &params).expect("derive");

    let mut reader = Reader::new("password", "salt", &params).expect("reader");
    let first = reader.read(40).expect("read");

    let (mut reader, second) = thread::spawn(move || {
        let second = reader.read(56).expect("read");
        (reader, second)
    })
    .join()
    .expect("thread");

    assert_eq!(&expected[..40], &first[..]);
    assert_eq!(&expected[40..], &second[..]);

    reader.close();
    assert!(reader.is_closed());
}

#[test]
fn shared_custom_prf() {
    let prf: Arc<dyn Prf> = Arc::new(HmacAlgorithm::Sha1);
    let params = DeriveParams::new().with_iterations(2).with_prf(PrfSelector::Direct(prf));

    thread::scope(|s| {
        let handles: Vec<_> = ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|p| {
                let params = &params;
                s.spawn(move || (p, derive(p, "salt", 20, params).expect("derive")))
            })
            .collect();

        for handle in handles {
            let (p, key) = handle.join().expect("thread");
            let by_name = DeriveParams::new().with_iterations(2).with_prf("HMAC_SHA1");
            assert_eq!(key, derive(p, "salt", 20, &by_name).expect("derive"));
        }
    });
}
