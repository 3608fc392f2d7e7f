use std::sync::atomic::Ordering;
use std::sync::Arc;

use tamil_core::cache::cache_key;

use super::*;
use crate::types::{CacheStatus, GenerationPath, Suggestion};

#[test]
fn test_second_call_is_cache_hit() {
    let p = make_pipeline();
    let first = suggest(&p, "anbu", "spoken", 8);
    assert_eq!(first.cache_status, CacheStatus::Miss);
    assert!(!first.used_runner);

    let second = suggest(&p, "anbu", "spoken", 8);
    assert_eq!(second.cache_status, CacheStatus::Hit);
    assert_eq!(second.suggestions, first.suggestions);
    assert!(second.used_runner);
    assert_eq!(second.generated_by, GenerationPath::Local);
}

#[test]
fn test_cache_key_includes_limit_and_mode() {
    let p = make_pipeline();
    suggest(&p, "anbu", "spoken", 8);
    assert_eq!(suggest(&p, "anbu", "spoken", 5).cache_status, CacheStatus::Miss);
    assert_eq!(suggest(&p, "anbu", "formal", 8).cache_status, CacheStatus::Miss);
    assert_eq!(suggest(&p, "anbu", "spoken", 5).cache_status, CacheStatus::Hit);
    assert_eq!(p.caches().response.len(), 3);
}

#[test]
fn test_empty_mode_uses_default_mode() {
    let p = make_pipeline();
    suggest(&p, "anbu", "spoken", 8);
    assert_eq!(suggest(&p, "anbu", "", 8).cache_status, CacheStatus::Hit);
}

#[test]
fn test_zero_limit_shares_key_with_default_limit() {
    let p = make_pipeline();
    suggest(&p, "anbu", "spoken", 0);
    assert_eq!(suggest(&p, "anbu", "spoken", 8).cache_status, CacheStatus::Hit);
}

#[test]
fn test_surrounding_whitespace_shares_key() {
    let p = make_pipeline();
    suggest(&p, "  anbu ", "spoken", 8);
    assert_eq!(suggest(&p, "anbu", "spoken", 8).cache_status, CacheStatus::Hit);
}

#[test]
fn test_token_cache_skips_repeat_conversions() {
    let converter = Arc::new(CountingConverter::default());
    let p = Pipeline::new(&test_settings(), test_oracle(), converter.clone());

    suggest(&p, "anbu", "spoken", 8);
    let cold = converter.calls.load(Ordering::SeqCst);
    assert!(cold > 0);

    // A different limit misses the response cache but reuses every
    // conversion from the token cache.
    suggest(&p, "anbu", "spoken", 3);
    assert_eq!(converter.calls.load(Ordering::SeqCst), cold);
}

#[test]
fn test_clear_caches_forces_recomputation() {
    let converter = Arc::new(CountingConverter::default());
    let p = Pipeline::new(&test_settings(), test_oracle(), converter.clone());

    let first = suggest(&p, "veedu", "spoken", 8);
    let cold = converter.calls.load(Ordering::SeqCst);
    p.clear_caches();
    assert!(p.caches().response.is_empty());
    assert!(p.caches().token.is_empty());
    assert_eq!(p.health().caches.response.hits, 0);

    let again = suggest(&p, "veedu", "spoken", 8);
    assert_eq!(again.cache_status, CacheStatus::Miss);
    assert_eq!(again.suggestions, first.suggestions);
    assert_eq!(converter.calls.load(Ordering::SeqCst), cold * 2);
}

#[test]
fn test_expired_response_is_recomputed() {
    let settings = settings_with(
        "[cache.response]\nmax_size = 5000\nttl_secs = 600",
        "[cache.response]\nmax_size = 5000\nttl_secs = 0",
    );
    let p = Pipeline::new(&settings, test_oracle(), Arc::new(TableConverter::global()));
    suggest(&p, "anbu", "spoken", 8);
    assert_eq!(suggest(&p, "anbu", "spoken", 8).cache_status, CacheStatus::Miss);
}

#[test]
fn test_response_cache_evicts_beyond_capacity() {
    let settings = settings_with(
        "[cache.response]\nmax_size = 5000",
        "[cache.response]\nmax_size = 2",
    );
    let p = Pipeline::new(&settings, test_oracle(), Arc::new(TableConverter::global()));
    for text in ["anbu", "naan", "veedu"] {
        suggest(&p, text, "spoken", 8);
    }
    assert_eq!(p.caches().response.len(), 2);
    assert_eq!(suggest(&p, "anbu", "spoken", 8).cache_status, CacheStatus::Miss);
    assert_eq!(suggest(&p, "veedu", "spoken", 8).cache_status, CacheStatus::Hit);
}

#[test]
fn test_general_cache_is_available_to_callers() {
    let p = make_pipeline();
    let key = cache_key(&["prefetch", "anbu"]);
    let value = vec![Suggestion {
        word: "அன்பு".into(),
        score: 0.9,
    }];
    p.caches().general.set(key.clone(), value.clone());
    assert_eq!(p.caches().general.get(&key), Some(value));
    assert_eq!(p.health().caches.general.size, 1);
}
