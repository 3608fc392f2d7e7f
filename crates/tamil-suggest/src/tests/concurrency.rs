use std::thread;

use super::*;

const TOKENS: [&str; 6] = ["anbu", "enathu", "naan", "veedu", "kan", "amma"];

#[test]
fn test_concurrent_requests_match_sequential() {
    let expected: Vec<_> = {
        let p = make_pipeline();
        TOKENS
            .iter()
            .map(|t| suggest(&p, t, "spoken", 8).suggestions)
            .collect()
    };

    let shared = make_pipeline();
    thread::scope(|s| {
        for worker in 0..8 {
            let shared = &shared;
            let expected = &expected;
            s.spawn(move || {
                for round in 0..20 {
                    let i = (worker + round) % TOKENS.len();
                    let r = suggest(shared, TOKENS[i], "spoken", 8);
                    assert_eq!(r.suggestions, expected[i], "token {}", TOKENS[i]);
                }
            });
        }
    });

    assert_eq!(shared.caches().response.len(), TOKENS.len());
}

#[test]
fn test_pipeline_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Pipeline>();
}
